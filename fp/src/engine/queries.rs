//! Read-only views over a plan's tasks
//!
//! Pure aggregation over task rows; the caller supplies `today` so every
//! view is reproducible in tests.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::DailyTask;

/// Default window for the upcoming-tasks view, in days
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 7;

/// One day of the schedule
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub day_number: u32,
    pub scheduled_date: NaiveDate,
    pub tasks: Vec<DailyTask>,
}

/// The whole schedule grouped by day, with aggregate counts
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
    pub days: Vec<DayGroup>,
    pub total: usize,
    pub completed: usize,
    pub critical: usize,
    /// Not completed and scheduled today or later
    pub upcoming: usize,
}

/// Aggregate completion numbers for a plan
#[derive(Debug, Clone, Serialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub critical: usize,
    pub completed_critical: usize,
    /// Not completed, scheduled before today
    pub overdue: usize,
    /// Not completed, scheduled today
    pub today_pending: usize,
    pub completion_percent: f64,
    pub critical_completion_percent: f64,
}

/// Percentage with 2-decimal rounding; 0 when the denominator is 0
fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64 * 100.0 * 100.0).round() / 100.0
}

fn critical_first(a: &DailyTask, b: &DailyTask) -> std::cmp::Ordering {
    b.critical.cmp(&a.critical)
}

/// Group all tasks by day number, day ascending
pub fn schedule_view(mut tasks: Vec<DailyTask>, today: NaiveDate) -> ScheduleView {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let critical = tasks.iter().filter(|t| t.critical).count();
    let upcoming = tasks.iter().filter(|t| t.is_upcoming(today)).count();

    tasks.sort_by(|a, b| a.day_number.cmp(&b.day_number).then_with(|| critical_first(a, b)));

    let mut days: Vec<DayGroup> = Vec::new();
    for task in tasks {
        match days.last_mut() {
            Some(group) if group.day_number == task.day_number => group.tasks.push(task),
            _ => days.push(DayGroup {
                day_number: task.day_number,
                scheduled_date: task.scheduled_date,
                tasks: vec![task],
            }),
        }
    }

    ScheduleView {
        days,
        total,
        completed,
        critical,
        upcoming,
    }
}

/// Tasks scheduled for today, critical-first
pub fn todays_tasks(mut tasks: Vec<DailyTask>, today: NaiveDate) -> Vec<DailyTask> {
    tasks.retain(|t| t.scheduled_date == today);
    tasks.sort_by(critical_first);
    tasks
}

/// Open tasks inside the window, by date then critical-first
pub fn upcoming_tasks(mut tasks: Vec<DailyTask>, today: NaiveDate, window_days: u32) -> Vec<DailyTask> {
    let horizon = today + Days::new(window_days as u64);
    tasks.retain(|t| !t.completed && t.scheduled_date >= today && t.scheduled_date <= horizon);
    tasks.sort_by(|a, b| a.scheduled_date.cmp(&b.scheduled_date).then_with(|| critical_first(a, b)));
    tasks
}

pub fn statistics(tasks: &[DailyTask], today: NaiveDate) -> TaskStatistics {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let critical = tasks.iter().filter(|t| t.critical).count();
    let completed_critical = tasks.iter().filter(|t| t.critical && t.completed).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();
    let today_pending = tasks
        .iter()
        .filter(|t| !t.completed && t.scheduled_date == today)
        .count();

    TaskStatistics {
        total,
        completed,
        critical,
        completed_critical,
        overdue,
        today_pending,
        completion_percent: percent(completed, total),
        critical_completion_percent: percent(completed_critical, critical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(day: u32, critical: bool, completed: bool) -> DailyTask {
        let mut task = DailyTask::new(
            "plan-1",
            Some(format!("tpl-{}", day)),
            day,
            date(2024, 1, 1) + Days::new((day - 1) as u64),
            format!("Task day {}", day),
            "do it",
            TaskCategory::Feeding,
            critical,
        );
        task.completed = completed;
        task
    }

    #[test]
    fn test_percent_zero_denominator() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 3), 33.33);
        assert_eq!(percent(2, 3), 66.67);
        assert_eq!(percent(3, 3), 100.0);
    }

    #[test]
    fn test_schedule_view_groups_by_day() {
        let tasks = vec![task(2, false, false), task(1, true, true), task(2, true, false)];
        let view = schedule_view(tasks, date(2024, 1, 1));

        assert_eq!(view.total, 3);
        assert_eq!(view.completed, 1);
        assert_eq!(view.critical, 2);
        assert_eq!(view.upcoming, 2);

        assert_eq!(view.days.len(), 2);
        assert_eq!(view.days[0].day_number, 1);
        assert_eq!(view.days[0].scheduled_date, date(2024, 1, 1));
        assert_eq!(view.days[1].day_number, 2);
        assert_eq!(view.days[1].tasks.len(), 2);
        // Critical-first inside the day group
        assert!(view.days[1].tasks[0].critical);
    }

    #[test]
    fn test_todays_tasks_critical_first() {
        let tasks = vec![task(3, false, false), task(3, true, false), task(4, true, false)];
        let today = date(2024, 1, 3);
        let todays = todays_tasks(tasks, today);

        assert_eq!(todays.len(), 2);
        assert!(todays[0].critical);
        assert!(!todays[1].critical);
    }

    #[test]
    fn test_upcoming_window_bounds() {
        // Days 1..=12 relative to a today of day 2: window of 7 covers
        // dates of day 2 through day 9
        let tasks: Vec<DailyTask> = (1..=12).map(|d| task(d, false, false)).collect();
        let today = date(2024, 1, 2);
        let upcoming = upcoming_tasks(tasks, today, 7);

        assert_eq!(upcoming.len(), 8);
        assert_eq!(upcoming.first().unwrap().scheduled_date, date(2024, 1, 2));
        assert_eq!(upcoming.last().unwrap().scheduled_date, date(2024, 1, 9));
    }

    #[test]
    fn test_upcoming_skips_completed() {
        let tasks = vec![task(2, false, true), task(3, false, false)];
        let upcoming = upcoming_tasks(tasks, date(2024, 1, 2), 7);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].day_number, 3);
    }

    #[test]
    fn test_upcoming_orders_date_then_critical() {
        let tasks = vec![task(5, false, false), task(4, false, false), task(5, true, false)];
        let upcoming = upcoming_tasks(tasks, date(2024, 1, 4), 7);
        assert_eq!(upcoming[0].day_number, 4);
        assert!(upcoming[1].critical);
        assert!(!upcoming[2].critical);
    }

    #[test]
    fn test_statistics_counts() {
        let tasks = vec![
            task(1, true, true),   // completed critical, past
            task(2, true, false),  // overdue critical
            task(3, false, false), // today, pending
            task(4, false, false), // future
        ];
        let stats = statistics(&tasks, date(2024, 1, 3));

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.critical, 2);
        assert_eq!(stats.completed_critical, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.today_pending, 1);
        assert_eq!(stats.completion_percent, 25.0);
        assert_eq!(stats.critical_completion_percent, 50.0);

        assert!(stats.completed <= stats.total);
        assert!(stats.completed_critical <= stats.critical);
    }

    #[test]
    fn test_statistics_empty_plan() {
        let stats = statistics(&[], date(2024, 1, 1));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_percent, 0.0);
        assert_eq!(stats.critical_completion_percent, 0.0);
    }
}
