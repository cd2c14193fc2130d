//! Cycle type classification
//!
//! A farming cycle is bucketed by its duration into short, standard or
//! extended. The bucket selects the feed cost, market weight and task
//! templates that apply. It is always derived from the duration, never
//! stored on its own.

use serde::{Deserialize, Serialize};

/// Duration bucket for a farming cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleType {
    /// Up to 21 days
    Short,
    /// 22 to 30 days
    Standard,
    /// 31 days and beyond
    Extended,
}

impl CycleType {
    /// Classify a duration in days
    pub fn from_duration(duration_days: u32) -> Self {
        if duration_days <= 21 {
            Self::Short
        } else if duration_days <= 30 {
            Self::Standard
        } else {
            Self::Extended
        }
    }

    /// Last day number a task template of this cycle type may target
    pub fn max_days(&self) -> u32 {
        match self {
            Self::Short => 21,
            Self::Standard => 30,
            Self::Extended => 60,
        }
    }
}

impl std::fmt::Display for CycleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Short => write!(f, "short"),
            Self::Standard => write!(f, "standard"),
            Self::Extended => write!(f, "extended"),
        }
    }
}
