//! Planning input and boundary validation
//!
//! The calculator itself does not revalidate its input; callers run
//! [`PlanningInput::validate`] at the boundary and only hand validated
//! values to the engine. Feeding the engine out-of-range values produces
//! nonsensical results by design.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::ExperienceLevel;

/// Shortest cycle the planner accepts, in days
pub const MIN_DURATION_DAYS: u32 = 21;

/// Longest cycle the planner accepts, in days
pub const MAX_DURATION_DAYS: u32 = 60;

/// Rejected planning input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("budget must be positive, got {0}")]
    NonPositiveBudget(i64),

    #[error("floor space must be positive, got {0} m2")]
    NonPositiveSpace(f64),

    #[error("cycle duration must be between 21 and 60 days, got {0}")]
    DurationOutOfRange(u32),

    #[error("unknown experience level: {0} (expected beginner, intermediate or advanced)")]
    UnknownExperienceLevel(String),
}

/// What the farmer has to work with for one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningInput {
    /// Available budget in currency units
    pub budget: i64,

    /// Usable floor space in square meters
    pub space_m2: f64,

    /// The farmer's experience level
    pub experience: ExperienceLevel,

    /// Intended cycle duration in days (21-60)
    pub duration_days: u32,
}

impl PlanningInput {
    pub fn new(budget: i64, space_m2: f64, experience: ExperienceLevel, duration_days: u32) -> Self {
        Self {
            budget,
            space_m2,
            experience,
            duration_days,
        }
    }

    /// Boundary validation. Call before handing the input to the engine.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.budget <= 0 {
            return Err(InvalidInput::NonPositiveBudget(self.budget));
        }
        if !(self.space_m2 > 0.0) {
            return Err(InvalidInput::NonPositiveSpace(self.space_m2));
        }
        if self.duration_days < MIN_DURATION_DAYS || self.duration_days > MAX_DURATION_DAYS {
            return Err(InvalidInput::DurationOutOfRange(self.duration_days));
        }
        Ok(())
    }
}
