//! The planning calculator
//!
//! Pure function of the input and the injected rate table. The flock size
//! is capped by whichever of floor space and budget supports fewer birds;
//! the cost breakdown and profitability are then computed for that flock.
//!
//! Note on the mortality buffer: it is deliberately computed twice from
//! different bases. `cost_per_bird` applies the percentage to the per-bird
//! subtotal (budget-capacity estimate); the persisted breakdown applies the
//! same percentage to the realized flock subtotal. Unifying the two would
//! change the recommended flock size, so both are kept as-is.

use tracing::debug;

use crate::advice::{advice_for, limiting_factors, shortfall_suggestions};
use crate::cycle::CycleType;
use crate::input::PlanningInput;
use crate::level::ExperienceLevel;
use crate::outcome::{CostBreakdown, Outcome, ProfitabilityResult, Recommendation, ResourceShortfall};
use crate::rates::MarketRates;

/// `ceil(value * percent / 100)` for non-negative values
fn ceil_percent(value: i64, percent: u32) -> i64 {
    (value * percent as i64 + 99) / 100
}

/// `ceil(numerator / denominator)` for positive values
fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator - 1) / denominator
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The resource & profitability calculator
#[derive(Debug, Clone)]
pub struct Calculator {
    rates: MarketRates,
}

impl Calculator {
    /// Create a calculator over an injected rate table
    pub fn new(rates: MarketRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &MarketRates {
        &self.rates
    }

    /// Compute a recommendation for validated planning input.
    ///
    /// The input must already have passed [`PlanningInput::validate`];
    /// out-of-range values are not rechecked here.
    pub fn recommend(&self, input: &PlanningInput) -> Outcome {
        let cycle = CycleType::from_duration(input.duration_days);
        let max_from_space = self.max_from_space(input.space_m2, input.experience);
        let cost_per_bird = self.cost_per_bird(cycle, input.experience);
        let max_from_budget = input.budget / cost_per_bird;
        let optimal = max_from_space.min(max_from_budget);

        debug!(%cycle, max_from_space, max_from_budget, cost_per_bird, optimal, "recommend: capacity");

        if optimal <= 0 {
            return Outcome::Insufficient(ResourceShortfall {
                suggestions: shortfall_suggestions(&self.rates),
            });
        }

        let flock_size = optimal as u32;
        let costs = self.cost_breakdown(flock_size, cycle, input.experience);
        let profitability = self.profitability(flock_size, cycle, input.experience, costs.total);
        let advice = advice_for(input, profitability.roi_percent);
        let limiting = limiting_factors(input, max_from_space, max_from_budget);

        Outcome::Viable(Recommendation {
            flock_size,
            cycle,
            max_from_space,
            max_from_budget,
            cost_per_bird,
            costs,
            profitability,
            advice,
            limiting_factors: limiting,
        })
    }

    /// Largest flock the floor space supports at this experience level
    fn max_from_space(&self, space_m2: f64, experience: ExperienceLevel) -> i64 {
        (space_m2 * self.rates.density_per_m2.for_level(experience)).floor() as i64
    }

    /// Per-bird cost estimate used to cap the flock against the budget
    fn cost_per_bird(&self, cycle: CycleType, experience: ExperienceLevel) -> i64 {
        let subtotal = self.rates.chick_price + self.rates.feed_cost.for_cycle(cycle) + self.rates.medicine_cost;
        subtotal
            + ceil_percent(subtotal, self.rates.misc_percent)
            + ceil_percent(subtotal, self.rates.mortality_percent.for_level(experience))
    }

    /// Cost of raising `flock_size` birds; misc and mortality buffer are
    /// percentages of the realized subtotal, each rounded up independently
    fn cost_breakdown(&self, flock_size: u32, cycle: CycleType, experience: ExperienceLevel) -> CostBreakdown {
        let n = flock_size as i64;
        let chick_cost = self.rates.chick_price * n;
        let feed_cost = self.rates.feed_cost.for_cycle(cycle) * n;
        let medicine_cost = self.rates.medicine_cost * n;
        let subtotal = chick_cost + feed_cost + medicine_cost;
        let misc_cost = ceil_percent(subtotal, self.rates.misc_percent);
        let mortality_buffer = ceil_percent(subtotal, self.rates.mortality_percent.for_level(experience));

        CostBreakdown {
            flock_size,
            chick_cost,
            feed_cost,
            medicine_cost,
            misc_cost,
            mortality_buffer,
            subtotal,
            total: subtotal + misc_cost + mortality_buffer,
        }
    }

    fn profitability(
        &self,
        flock_size: u32,
        cycle: CycleType,
        experience: ExperienceLevel,
        total_cost: i64,
    ) -> ProfitabilityResult {
        let n = flock_size as i64;
        let mortality = self.rates.mortality_percent.for_level(experience) as i64;
        let surviving = n * (100 - mortality) / 100;

        let weight_kg = self.rates.market_weight_kg.for_cycle(cycle);
        let revenue = (surviving as f64 * weight_kg * self.rates.price_per_kg as f64).ceil() as i64;
        let net_profit = revenue - total_cost;
        let unit_revenue = (weight_kg * self.rates.price_per_kg as f64).ceil() as i64;

        ProfitabilityResult {
            surviving_count: surviving as u32,
            revenue,
            net_profit,
            profit_per_bird: net_profit / n,
            roi_percent: round2(net_profit as f64 / total_cost as f64 * 100.0),
            break_even_flock: ceil_div(total_cost, unit_revenue) as u32,
        }
    }
}
