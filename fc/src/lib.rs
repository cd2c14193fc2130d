//! FlockCalc - planning calculator for small-flock broiler farming
//!
//! Given a budget, available floor space, the farmer's experience level and
//! the intended cycle duration, the calculator works out the largest flock
//! the farmer can support, what it will cost, and whether it is worth it.
//!
//! # Core Concepts
//!
//! - **Pure Engine**: [`Calculator::recommend`] is a pure function of its
//!   input and the injected [`MarketRates`]; identical input always yields
//!   identical output
//! - **Boundary Validation**: callers validate [`PlanningInput`] before
//!   invoking the engine; the engine itself does not revalidate
//! - **Injected Constants**: prices, densities and mortality rates come from
//!   a [`MarketRates`] table so alternate markets substitute without touching
//!   the algorithm
//!
//! # Modules
//!
//! - [`engine`] - The calculator itself
//! - [`rates`] - Injectable market constants
//! - [`input`] - Planning input and boundary validation
//! - [`outcome`] - Recommendation, cost breakdown and profitability types

pub mod advice;
pub mod cycle;
pub mod engine;
pub mod input;
pub mod level;
pub mod outcome;
pub mod rates;

// Re-export commonly used types
pub use cycle::CycleType;
pub use engine::Calculator;
pub use input::{InvalidInput, MAX_DURATION_DAYS, MIN_DURATION_DAYS, PlanningInput};
pub use level::ExperienceLevel;
pub use outcome::{
    CostBreakdown, LimitingFactor, Outcome, ProfitabilityResult, Recommendation, ResourceShortfall,
};
pub use rates::{MarketRates, PerCycle, PerLevel};
