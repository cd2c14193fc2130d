//! Injectable market constants
//!
//! All prices, densities and mortality rates the engine consumes live in a
//! [`MarketRates`] table handed to [`crate::Calculator::new`]. The defaults
//! below describe a typical smallholder broiler market; an alternate region
//! substitutes its own table (the CLI loads one from YAML) without touching
//! the algorithm.
//!
//! Currency amounts are whole units and always round UP when a percentage
//! is applied, so the plan never under-provisions.

use serde::{Deserialize, Serialize};

use crate::cycle::CycleType;
use crate::level::ExperienceLevel;

/// A value that varies by cycle type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerCycle<T> {
    pub short: T,
    pub standard: T,
    pub extended: T,
}

impl<T: Copy> PerCycle<T> {
    pub fn for_cycle(&self, cycle: CycleType) -> T {
        match cycle {
            CycleType::Short => self.short,
            CycleType::Standard => self.standard,
            CycleType::Extended => self.extended,
        }
    }
}

/// A value that varies by experience level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerLevel<T> {
    pub beginner: T,
    pub intermediate: T,
    pub advanced: T,
}

impl<T: Copy> PerLevel<T> {
    pub fn for_level(&self, level: ExperienceLevel) -> T {
        match level {
            ExperienceLevel::Beginner => self.beginner,
            ExperienceLevel::Intermediate => self.intermediate,
            ExperienceLevel::Advanced => self.advanced,
        }
    }
}

/// The constant table behind every calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketRates {
    /// Display label for currency amounts
    pub currency: String,

    /// Price of one day-old chick
    #[serde(rename = "chick-price")]
    pub chick_price: i64,

    /// Feed cost per bird for a full cycle
    #[serde(rename = "feed-cost")]
    pub feed_cost: PerCycle<i64>,

    /// Medicine and vitamins per bird for a full cycle
    #[serde(rename = "medicine-cost")]
    pub medicine_cost: i64,

    /// Miscellaneous surcharge, percent of the cost subtotal
    #[serde(rename = "misc-percent")]
    pub misc_percent: u32,

    /// Expected mortality, percent of the flock
    #[serde(rename = "mortality-percent")]
    pub mortality_percent: PerLevel<u32>,

    /// Stocking density in birds per square meter
    #[serde(rename = "density-per-m2")]
    pub density_per_m2: PerLevel<f64>,

    /// Average market weight at the end of the cycle, in kg
    #[serde(rename = "market-weight-kg")]
    pub market_weight_kg: PerCycle<f64>,

    /// Live-weight price per kg at market
    #[serde(rename = "price-per-kg")]
    pub price_per_kg: i64,

    /// Smallest budget a starter flock realistically needs
    #[serde(rename = "min-viable-budget")]
    pub min_viable_budget: i64,

    /// Smallest floor space a starter flock realistically needs
    #[serde(rename = "min-viable-space-m2")]
    pub min_viable_space_m2: f64,
}

impl Default for MarketRates {
    fn default() -> Self {
        Self {
            currency: "Rp".to_string(),
            chick_price: 5_000,
            feed_cost: PerCycle {
                short: 9_000,
                standard: 14_000,
                extended: 19_000,
            },
            medicine_cost: 1_500,
            misc_percent: 5,
            mortality_percent: PerLevel {
                beginner: 8,
                intermediate: 5,
                advanced: 3,
            },
            density_per_m2: PerLevel {
                beginner: 8.0,
                intermediate: 10.0,
                advanced: 12.0,
            },
            market_weight_kg: PerCycle {
                short: 1.2,
                standard: 1.9,
                extended: 2.5,
            },
            price_per_kg: 18_000,
            min_viable_budget: 90_000,
            min_viable_space_m2: 2.0,
        }
    }
}
