//! Farm plan domain type
//!
//! A FarmPlan is one committed growing cycle: the flock size the farmer
//! settled on, who owns it, when it starts and how long it runs. Task
//! generation hangs off the plan; deleting the plan cascades to its tasks.

use chrono::NaiveDate;
use flockcalc::{CycleType, ExperienceLevel, Recommendation};
use serde::{Deserialize, Serialize};

use super::id::new_id;
use super::now_ms;

/// One committed growing cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmPlan {
    /// Unique identifier (e.g. "019b2e-plan-24-birds-30-days")
    pub id: String,

    /// The farmer this plan belongs to; backs the ownership check on
    /// task mutations
    pub owner_id: String,

    /// Number of birds the farmer committed to raise
    pub flock_size: u32,

    /// Cycle duration in days (21-60)
    pub duration_days: u32,

    /// The farmer's experience level at planning time
    pub experience: ExperienceLevel,

    /// First day of the cycle; day 1 tasks land on this date
    pub start_date: NaiveDate,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl FarmPlan {
    /// Create a new plan with a generated id
    pub fn new(
        owner_id: impl Into<String>,
        flock_size: u32,
        duration_days: u32,
        experience: ExperienceLevel,
        start_date: NaiveDate,
    ) -> Self {
        let now = now_ms();
        Self {
            id: new_id("plan", &format!("{} birds {} days", flock_size, duration_days)),
            owner_id: owner_id.into(),
            flock_size,
            duration_days,
            experience,
            start_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a plan straight from a calculator recommendation
    pub fn from_recommendation(
        owner_id: impl Into<String>,
        recommendation: &Recommendation,
        duration_days: u32,
        experience: ExperienceLevel,
        start_date: NaiveDate,
    ) -> Self {
        Self::new(owner_id, recommendation.flock_size, duration_days, experience, start_date)
    }

    /// The cycle bucket this plan falls into
    pub fn cycle(&self) -> CycleType {
        CycleType::from_duration(self.duration_days)
    }

    /// Calendar date of the last cycle day
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + chrono::Days::new((self.duration_days - 1) as u64)
    }
}
