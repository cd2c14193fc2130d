//! Daily task domain type
//!
//! DailyTask rows are created in one batch when a plan's schedule is
//! generated. Afterward only the completion fields (`completed`,
//! `completed_at`, `photo_ref`, `notes`) ever change, and only through the
//! completion and annotation operations. Tasks die with their plan.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::new_id;

/// What kind of work a task is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Preparation,
    Feeding,
    Monitoring,
    Cleaning,
    Vaccination,
    Harvest,
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preparation => write!(f, "preparation"),
            Self::Feeding => write!(f, "feeding"),
            Self::Monitoring => write!(f, "monitoring"),
            Self::Cleaning => write!(f, "cleaning"),
            Self::Vaccination => write!(f, "vaccination"),
            Self::Harvest => write!(f, "harvest"),
        }
    }
}

/// Category string that matches no known category
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown task category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for TaskCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preparation" => Ok(Self::Preparation),
            "feeding" => Ok(Self::Feeding),
            "monitoring" => Ok(Self::Monitoring),
            "cleaning" => Ok(Self::Cleaning),
            "vaccination" => Ok(Self::Vaccination),
            "harvest" => Ok(Self::Harvest),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// One dated item on a plan's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    /// Unique identifier
    pub id: String,

    /// The plan this task belongs to
    pub plan_id: String,

    /// Source template id; None for rows the generator synthesized
    pub template_id: Option<String>,

    /// 1-based offset from the cycle start
    pub day_number: u32,

    /// start_date + (day_number - 1)
    pub scheduled_date: NaiveDate,

    pub title: String,
    pub description: String,
    pub category: TaskCategory,

    /// Skipping this task risks the flock
    pub critical: bool,

    pub completed: bool,

    /// Set exactly once, at the single true completion event
    pub completed_at: Option<DateTime<Utc>>,

    /// Reference to an uploaded photo, attached by the farmer
    pub photo_ref: Option<String>,

    pub notes: Option<String>,
}

impl DailyTask {
    /// Create a fresh, uncompleted task row
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plan_id: impl Into<String>,
        template_id: Option<String>,
        day_number: u32,
        scheduled_date: NaiveDate,
        title: impl Into<String>,
        description: impl Into<String>,
        category: TaskCategory,
        critical: bool,
    ) -> Self {
        let title = title.into();
        Self {
            id: new_id("task", &title),
            plan_id: plan_id.into(),
            template_id,
            day_number,
            scheduled_date,
            title,
            description: description.into(),
            category,
            critical,
            completed: false,
            completed_at: None,
            photo_ref: None,
            notes: None,
        }
    }

    /// Not completed and scheduled before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.scheduled_date < today
    }

    /// Not completed and scheduled today or later
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        !self.completed && self.scheduled_date >= today
    }
}
