//! Template expansion
//!
//! Pure half of task generation: select the templates that apply to a
//! plan, personalize them, pin them to calendar dates. Persistence happens
//! in the engine facade.

use chrono::Days;
use flockcalc::ExperienceLevel;
use tracing::debug;

use crate::catalog::{TaskTemplate, TemplateCatalog};
use crate::domain::{DailyTask, FarmPlan, TaskCategory};

use super::error::TaskError;

/// Critical monitoring templates inside this first-week window earn a
/// synthesized double-check row for beginners
pub const DOUBLE_CHECK_WINDOW_DAYS: u32 = 7;

/// Placeholder in template descriptions for the plan's flock size
const FLOCK_SIZE_PLACEHOLDER: &str = "{flock_size}";

/// Expand the catalog into the plan's full task list, in day order
pub fn expand(plan: &FarmPlan, catalog: &TemplateCatalog) -> Result<Vec<DailyTask>, TaskError> {
    let selected = select_templates(plan, catalog)?;
    debug!(plan_id = %plan.id, selected = selected.len(), "expand: templates selected");

    let mut tasks = Vec::with_capacity(selected.len());
    for template in selected {
        let scheduled_date = plan.start_date + Days::new((template.day_number - 1) as u64);
        tasks.push(DailyTask::new(
            plan.id.clone(),
            Some(template.id.clone()),
            template.day_number,
            scheduled_date,
            template.title.clone(),
            personalize(template, plan),
            template.category,
            template.critical,
        ));

        if wants_double_check(plan, template) {
            tasks.push(double_check_task(plan, template, scheduled_date));
        }
    }

    // Stable: keeps critical-first selection order and each double-check
    // row right behind its source
    tasks.sort_by_key(|task| task.day_number);
    Ok(tasks)
}

/// Templates for the plan's cycle and experience level, day ascending,
/// critical-first within a day. Falls back to the experience-agnostic
/// subset when the experience-specific selection comes up empty.
fn select_templates<'a>(plan: &FarmPlan, catalog: &'a TemplateCatalog) -> Result<Vec<&'a TaskTemplate>, TaskError> {
    let cycle = plan.cycle();
    let in_cycle = |template: &&TaskTemplate| -> bool {
        template.cycle == cycle && template.day_number <= plan.duration_days
    };

    let mut selected: Vec<&TaskTemplate> = catalog
        .templates()
        .iter()
        .filter(in_cycle)
        .filter(|t| t.experience.is_none() || t.experience == Some(plan.experience))
        .collect();

    if selected.is_empty() {
        selected = catalog
            .templates()
            .iter()
            .filter(in_cycle)
            .filter(|t| t.experience.is_none())
            .collect();
    }

    if selected.is_empty() {
        return Err(TaskError::NoTemplatesFound { cycle });
    }

    selected.sort_by(|a, b| {
        a.day_number
            .cmp(&b.day_number)
            .then(b.critical.cmp(&a.critical))
    });
    Ok(selected)
}

/// Substitute the flock-size placeholder and, for beginners, append the
/// template's topic tip
fn personalize(template: &TaskTemplate, plan: &FarmPlan) -> String {
    let mut description = template
        .description
        .replace(FLOCK_SIZE_PLACEHOLDER, &plan.flock_size.to_string());

    if plan.experience == ExperienceLevel::Beginner {
        if let Some(topic) = template.topic {
            description.push_str("\n\nTip: ");
            description.push_str(topic.beginner_tip());
        }
    }

    description
}

fn wants_double_check(plan: &FarmPlan, template: &TaskTemplate) -> bool {
    plan.experience == ExperienceLevel::Beginner
        && template.critical
        && template.category == TaskCategory::Monitoring
        && template.day_number <= DOUBLE_CHECK_WINDOW_DAYS
}

/// Synthesized verification row: same day, never critical, no template id
fn double_check_task(plan: &FarmPlan, template: &TaskTemplate, scheduled_date: chrono::NaiveDate) -> DailyTask {
    DailyTask::new(
        plan.id.clone(),
        None,
        template.day_number,
        scheduled_date,
        format!("Double-check: {}", template.title),
        format!(
            "Second walk-through for day {}: repeat \"{}\" and confirm nothing has drifted since the first pass.",
            template.day_number, template.title
        ),
        template.category,
        false,
    )
}
