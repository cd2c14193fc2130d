//! Calculator result types
//!
//! One invocation produces either a [`Recommendation`] or a
//! [`ResourceShortfall`]. An infeasible plan is an expected business
//! outcome, not an error, so both sides are plain data.

use serde::{Deserialize, Serialize};

use crate::cycle::CycleType;

/// Cost of raising a given flock, broken out by category.
///
/// Invariant: `total = subtotal + misc_cost + mortality_buffer`, where
/// `subtotal = chick_cost + feed_cost + medicine_cost`. Every component is
/// a non-negative whole currency amount, rounded up where a percentage was
/// applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub flock_size: u32,
    pub chick_cost: i64,
    pub feed_cost: i64,
    pub medicine_cost: i64,
    /// Miscellaneous surcharge, percent of subtotal, rounded up
    pub misc_cost: i64,
    /// Cost cover for expected losses, percent of subtotal keyed by
    /// experience, rounded up
    pub mortality_buffer: i64,
    pub subtotal: i64,
    pub total: i64,
}

/// Expected returns for a given flock.
///
/// Invariant: `surviving_count <= flock_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityResult {
    /// Flock reduced by the mortality rate, floored
    pub surviving_count: u32,
    /// Surviving birds at market weight and price, rounded up
    pub revenue: i64,
    pub net_profit: i64,
    pub profit_per_bird: i64,
    /// Return on investment, percent, 2-decimal rounding
    pub roi_percent: f64,
    /// Smallest flock whose revenue covers the total cost
    pub break_even_flock: u32,
}

/// The resource holding the flock size down, with the raw current value.
/// Both factors are reported when the two capacities tie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum LimitingFactor {
    Space { current_m2: f64, suggestion: String },
    Budget { current: i64, suggestion: String },
}

/// A viable plan. Immutable; produced fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// min(max_from_space, max_from_budget)
    pub flock_size: u32,
    pub cycle: CycleType,
    pub max_from_space: i64,
    pub max_from_budget: i64,
    /// Per-bird budget-capacity estimate used to cap the flock
    pub cost_per_bird: i64,
    pub costs: CostBreakdown,
    pub profitability: ProfitabilityResult,
    /// Advisory strings in a fixed, deterministic order
    pub advice: Vec<String>,
    pub limiting_factors: Vec<LimitingFactor>,
}

/// Neither space nor budget supports even one bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceShortfall {
    pub suggestions: Vec<String>,
}

/// What one calculator invocation returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Viable(Recommendation),
    Insufficient(ResourceShortfall),
}

impl Outcome {
    pub fn is_viable(&self) -> bool {
        matches!(self, Self::Viable(_))
    }

    /// The recommendation, if the plan is viable
    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            Self::Viable(rec) => Some(rec),
            Self::Insufficient(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiting_factor_serde_tag() {
        let factor = LimitingFactor::Budget {
            current: 1_000,
            suggestion: "add funds".to_string(),
        };
        let json = serde_json::to_string(&factor).unwrap();
        assert!(json.contains("\"resource\":\"budget\""));
        assert!(json.contains("\"current\":1000"));
    }

    #[test]
    fn test_outcome_serde_tag() {
        let outcome = Outcome::Insufficient(ResourceShortfall {
            suggestions: vec!["a".to_string(), "b".to_string()],
        });
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"insufficient\""));

        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
