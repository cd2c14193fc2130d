//! Task template catalog
//!
//! Templates are day-keyed task definitions the engine expands into dated
//! tasks. The catalog ships builtin (embedded in the binary) and can be
//! replaced wholesale with a YAML file via configuration. It is read-only
//! to the engine and injected as a value, so tests run on synthetic
//! catalogs.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use eyre::{Context, Result, bail};
use flockcalc::{CycleType, ExperienceLevel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::TaskCategory;

/// The builtin broiler catalog
const BUILTIN_CATALOG: &str = include_str!("builtin.yml");

/// Structured topic tag for beginner guidance.
///
/// Templates that want a beginner tip appended carry one of these instead
/// of relying on keyword matching against the description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipTopic {
    Temperature,
    Feeding,
    Cleaning,
    Vaccination,
}

impl TipTopic {
    /// The guidance line appended to beginner task descriptions
    pub fn beginner_tip(&self) -> &'static str {
        match self {
            Self::Temperature => {
                "Chicks cannot regulate their own heat in the first week; trust how the birds spread out over the thermometer reading."
            }
            Self::Feeding => "Feed left standing overnight draws damp and rats; give smaller portions more often.",
            Self::Cleaning => "Wet litter is the fastest route to disease; change it before it smells.",
            Self::Vaccination => "Write the vaccine batch number in your records in case a problem shows up later.",
        }
    }
}

/// A day-keyed task definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTemplate {
    /// Stable catalog id, carried onto generated tasks
    pub id: String,

    /// 1-based day offset from the cycle start
    #[serde(rename = "day")]
    pub day_number: u32,

    pub category: TaskCategory,

    /// Skipping this task risks the flock
    #[serde(default)]
    pub critical: bool,

    /// Which cycle bucket this template belongs to
    pub cycle: CycleType,

    /// None applies to every experience level
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,

    /// Topic tag for beginner guidance; None appends nothing
    #[serde(default)]
    pub topic: Option<TipTopic>,

    pub title: String,

    /// May carry the `{flock_size}` placeholder
    pub description: String,

    #[serde(rename = "minutes")]
    pub estimated_minutes: u32,
}

/// File shape for a catalog YAML document
#[derive(Debug, Deserialize)]
struct CatalogFile {
    templates: Vec<TaskTemplate>,
}

/// The read-only template catalog the engine expands
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<TaskTemplate>,
}

impl TemplateCatalog {
    /// Wrap an in-memory template list (no validation; for tests and
    /// collaborators that build their own)
    pub fn new(templates: Vec<TaskTemplate>) -> Self {
        Self { templates }
    }

    /// Load a catalog: the given YAML file, or the builtin one
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let raw = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading template catalog");
                fs::read_to_string(path).context(format!("Failed to read catalog file {}", path.display()))?
            }
            None => {
                debug!("Using builtin template catalog");
                BUILTIN_CATALOG.to_string()
            }
        };

        let file: CatalogFile = serde_yaml::from_str(&raw).context("Failed to parse template catalog")?;
        let catalog = Self::new(file.templates);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject catalogs the generator cannot safely expand
    pub fn validate(&self) -> Result<()> {
        if self.templates.is_empty() {
            bail!("Template catalog contains no templates");
        }

        let mut seen = HashSet::new();
        for template in &self.templates {
            if !seen.insert(template.id.as_str()) {
                bail!("Duplicate template id: {}", template.id);
            }
            if template.day_number == 0 {
                bail!("Template {} targets day 0; days are 1-based", template.id);
            }
            let max = template.cycle.max_days();
            if template.day_number > max {
                bail!(
                    "Template {} targets day {} but a {} cycle ends by day {}",
                    template.id,
                    template.day_number,
                    template.cycle,
                    max
                );
            }
        }
        Ok(())
    }

    pub fn templates(&self) -> &[TaskTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
