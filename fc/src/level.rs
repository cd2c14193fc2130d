//! Farmer experience levels

use serde::{Deserialize, Serialize};

use crate::input::InvalidInput;

/// How much broiler-raising experience the farmer has.
///
/// The level drives stocking density (beginners get a conservative figure),
/// the mortality buffer percentage, and which task templates apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// First or second cycle
    #[default]
    Beginner,
    /// A few successful cycles behind them
    Intermediate,
    /// Runs cycles routinely
    Advanced,
}

impl ExperienceLevel {
    /// All levels, in ascending order of experience
    pub const ALL: [ExperienceLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(InvalidInput::UnknownExperienceLevel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for level in ExperienceLevel::ALL {
            let parsed: ExperienceLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Beginner".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::Beginner);
        assert_eq!(" ADVANCED ".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::Advanced);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "expert".parse::<ExperienceLevel>().unwrap_err();
        assert!(err.to_string().contains("expert"));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ExperienceLevel::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }
}
