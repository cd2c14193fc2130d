//! Advisory text and limiting-factor reporting
//!
//! The rule list is deterministic: the safety-fund and buyer reminders
//! always lead, then beginner tips, then ROI commentary, then the
//! small-space tip. The strings are user-visible content; changing them
//! changes the product.

use crate::input::PlanningInput;
use crate::level::ExperienceLevel;
use crate::outcome::LimitingFactor;
use crate::rates::MarketRates;

/// Always issued first
pub const SAFETY_FUND_ADVICE: &str =
    "Keep a safety fund of around 10% of your budget for surprises such as feed price spikes or extra medicine.";

/// Always issued second
pub const FIND_BUYERS_ADVICE: &str =
    "Line up buyers before harvest week; a flock sold two days late eats into the margin every day.";

/// Appended for beginners, in this order
pub const BEGINNER_TIPS: [&str; 3] = [
    "Visit the coop at least three times a day during the first week; most losses happen early.",
    "Record feed given and birds lost every day so you can spot problems before they grow.",
    "Ask a nearby experienced farmer to look over your brooder setup before the chicks arrive.",
];

/// Issued when ROI is below 20%
pub const LOW_ROI_ADVICE: &str =
    "The projected margin is thin; consider a longer cycle or negotiating a better feed price before committing.";

/// Issued when ROI is above 50%
pub const EXCELLENT_ROI_ADVICE: &str =
    "The projected return is excellent; consider reinvesting part of the profit into the next cycle.";

/// Issued when floor space is under 10 m2
pub const SMALL_SPACE_ADVICE: &str =
    "With a small floor area, ventilation matters twice as much; keep air moving and litter dry.";

/// Build the advisory list for a viable plan
pub fn advice_for(input: &PlanningInput, roi_percent: f64) -> Vec<String> {
    let mut advice = vec![SAFETY_FUND_ADVICE.to_string(), FIND_BUYERS_ADVICE.to_string()];

    if input.experience == ExperienceLevel::Beginner {
        advice.extend(BEGINNER_TIPS.iter().map(|tip| tip.to_string()));
    }

    if roi_percent < 20.0 {
        advice.push(LOW_ROI_ADVICE.to_string());
    } else if roi_percent > 50.0 {
        advice.push(EXCELLENT_ROI_ADVICE.to_string());
    }

    if input.space_m2 < 10.0 {
        advice.push(SMALL_SPACE_ADVICE.to_string());
    }

    advice
}

/// Report whichever capacity is the bottleneck; both on a tie
pub fn limiting_factors(input: &PlanningInput, max_from_space: i64, max_from_budget: i64) -> Vec<LimitingFactor> {
    let mut factors = Vec::new();

    if max_from_space <= max_from_budget {
        factors.push(LimitingFactor::Space {
            current_m2: input.space_m2,
            suggestion: "Add usable floor space, or stock closer to the density your experience allows.".to_string(),
        });
    }
    if max_from_budget <= max_from_space {
        factors.push(LimitingFactor::Budget {
            current: input.budget,
            suggestion: "Raise the budget or trim per-bird costs; every extra unit of budget buys flock headroom.".to_string(),
        });
    }

    factors
}

/// The two fixed suggestions returned when the plan is infeasible
pub fn shortfall_suggestions(rates: &MarketRates) -> Vec<String> {
    vec![
        format!(
            "A starter flock needs a budget of at least {} {}.",
            rates.currency, rates.min_viable_budget
        ),
        format!(
            "Allow at least {} m2 of floor space for a starter flock.",
            rates.min_viable_space_m2
        ),
    ]
}
