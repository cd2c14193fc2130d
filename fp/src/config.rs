//! FlockPlan configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use flockcalc::MarketRates;
use serde::{Deserialize, Serialize};

use crate::catalog::TemplateCatalog;
use crate::engine::DEFAULT_UPCOMING_WINDOW_DAYS;

/// Main FlockPlan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Calculator configuration
    pub planning: PlanningConfig,

    /// Task engine configuration
    pub tasks: TasksConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .flockplan.yml
        let local_config = PathBuf::from(".flockplan.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/flockplan/flockplan.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("flockplan").join("flockplan.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// The market rate table: the configured YAML file, or the defaults
    pub fn market_rates(&self) -> Result<MarketRates> {
        match &self.planning.rates_file {
            Some(path) => {
                let content =
                    fs::read_to_string(path).context(format!("Failed to read rates file {}", path.display()))?;
                serde_yaml::from_str(&content).context("Failed to parse market rates")
            }
            None => Ok(MarketRates::default()),
        }
    }

    /// The template catalog: the configured YAML file, or the builtin one
    pub fn template_catalog(&self) -> Result<TemplateCatalog> {
        TemplateCatalog::load(self.tasks.catalog_file.as_deref())
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "db-path")]
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured database path, or the platform data directory
    pub fn resolve_db_path(&self) -> PathBuf {
        if let Some(path) = &self.db_path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("flockplan").join("flockplan.db"))
            .unwrap_or_else(|| PathBuf::from("flockplan.db"))
    }
}

/// Calculator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Market rates YAML override; defaults apply when unset
    #[serde(rename = "rates-file")]
    pub rates_file: Option<PathBuf>,
}

/// Task engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Template catalog YAML override; the builtin catalog applies when unset
    #[serde(rename = "catalog-file")]
    pub catalog_file: Option<PathBuf>,

    /// Window for the upcoming-tasks view, in days
    #[serde(rename = "upcoming-window-days")]
    pub upcoming_window_days: u32,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            catalog_file: None,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }
}
