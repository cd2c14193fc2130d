//! Task generation engine and completion workflow
//!
//! The engine expands the injected template catalog into dated tasks for a
//! farm plan (exactly once per plan), serves the read views, and owns the
//! completion/annotation workflow with its ownership check.

mod error;
mod expand;
mod queries;

pub use error::TaskError;
pub use expand::{DOUBLE_CHECK_WINDOW_DAYS, expand};
pub use queries::{
    DEFAULT_UPCOMING_WINDOW_DAYS, DayGroup, ScheduleView, TaskStatistics, schedule_view, statistics, todays_tasks,
    upcoming_tasks,
};

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::catalog::TemplateCatalog;
use crate::domain::{DailyTask, FarmPlan};
use crate::store::{Store, StoreError};

/// The task generation engine for one store and catalog
pub struct TaskEngine {
    store: Store,
    catalog: TemplateCatalog,
}

impl TaskEngine {
    pub fn new(store: Store, catalog: TemplateCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Expand the catalog for `plan` and persist the batch.
    ///
    /// At most one generation per plan: the existence guard and the insert
    /// share a transaction in the store, so a second call (or a concurrent
    /// one) fails with [`TaskError::AlreadyGenerated`] and writes nothing.
    pub fn generate(&mut self, plan: &FarmPlan) -> Result<Vec<DailyTask>, TaskError> {
        let tasks = expand(plan, &self.catalog)?;
        self.store.insert_tasks(&plan.id, &tasks).map_err(|err| match err {
            StoreError::TasksExist { plan_id } => TaskError::AlreadyGenerated { plan_id },
            other => TaskError::Store(other),
        })?;

        info!(plan_id = %plan.id, count = tasks.len(), "Generated task schedule");
        Ok(tasks)
    }

    /// The whole schedule grouped by day, with aggregate counts
    pub fn schedule(&self, plan_id: &str, today: NaiveDate) -> Result<ScheduleView, TaskError> {
        Ok(schedule_view(self.store.tasks_for_plan(plan_id)?, today))
    }

    /// Tasks dated `today`, critical-first
    pub fn today(&self, plan_id: &str, today: NaiveDate) -> Result<Vec<DailyTask>, TaskError> {
        Ok(todays_tasks(self.store.tasks_for_plan(plan_id)?, today))
    }

    /// Open tasks within `window_days` of `today`
    pub fn upcoming(&self, plan_id: &str, today: NaiveDate, window_days: u32) -> Result<Vec<DailyTask>, TaskError> {
        Ok(upcoming_tasks(self.store.tasks_for_plan(plan_id)?, today, window_days))
    }

    pub fn statistics(&self, plan_id: &str, today: NaiveDate) -> Result<TaskStatistics, TaskError> {
        Ok(statistics(&self.store.tasks_for_plan(plan_id)?, today))
    }

    /// Mark a task completed, stamping the single true completion time and
    /// attaching notes/photo when provided.
    ///
    /// Not idempotent: completing a completed task is a caller error. The
    /// completed check and the write are one conditional update, so two
    /// racing calls cannot both succeed.
    pub fn complete(
        &self,
        task_id: &str,
        actor_id: &str,
        notes: Option<String>,
        photo_ref: Option<String>,
    ) -> Result<DailyTask, TaskError> {
        let task = self.owned_task(task_id, actor_id)?;
        if task.completed {
            return Err(TaskError::AlreadyCompleted {
                task_id: task_id.to_string(),
            });
        }

        let changed = self
            .store
            .complete_task(task_id, Utc::now(), notes.as_deref(), photo_ref.as_deref())?;
        if changed == 0 {
            // Lost a race against another completion
            return Err(TaskError::AlreadyCompleted {
                task_id: task_id.to_string(),
            });
        }

        debug!(task_id, actor_id, "Task completed");
        self.fetch(task_id)
    }

    /// Overwrite a task's notes; allowed before or after completion
    pub fn annotate(&self, task_id: &str, actor_id: &str, notes: &str) -> Result<DailyTask, TaskError> {
        self.owned_task(task_id, actor_id)?;
        self.store.set_notes(task_id, notes)?;
        self.fetch(task_id)
    }

    /// Overwrite a task's photo reference; allowed before or after completion
    pub fn attach_photo(&self, task_id: &str, actor_id: &str, photo_ref: &str) -> Result<DailyTask, TaskError> {
        self.owned_task(task_id, actor_id)?;
        self.store.set_photo(task_id, photo_ref)?;
        self.fetch(task_id)
    }

    /// Fetch a task iff it belongs to `actor_id`. A missing row and a
    /// foreign row return the same error.
    fn owned_task(&self, task_id: &str, actor_id: &str) -> Result<DailyTask, TaskError> {
        match self.store.task_with_owner(task_id)? {
            Some((task, owner_id)) if owner_id == actor_id => Ok(task),
            _ => Err(TaskError::NotFoundOrForbidden),
        }
    }

    fn fetch(&self, task_id: &str) -> Result<DailyTask, TaskError> {
        self.store.task(task_id)?.ok_or(TaskError::NotFoundOrForbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flockcalc::ExperienceLevel;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> TaskEngine {
        let store = Store::open_in_memory().unwrap();
        let catalog = TemplateCatalog::load(None).unwrap();
        TaskEngine::new(store, catalog)
    }

    fn saved_plan(engine: &TaskEngine, experience: ExperienceLevel, duration_days: u32) -> FarmPlan {
        let plan = FarmPlan::new("farmer-1", 16, duration_days, experience, date(2024, 1, 1));
        engine.store().insert_plan(&plan).unwrap();
        plan
    }

    #[test]
    fn test_generate_persists_the_batch() {
        let mut engine = engine();
        let plan = saved_plan(&engine, ExperienceLevel::Beginner, 21);

        let tasks = engine.generate(&plan).unwrap();
        assert!(!tasks.is_empty());

        let stored = engine.store().tasks_for_plan(&plan.id).unwrap();
        assert_eq!(stored.len(), tasks.len());
    }

    #[test]
    fn test_second_generation_is_refused() {
        let mut engine = engine();
        let plan = saved_plan(&engine, ExperienceLevel::Beginner, 21);

        let first = engine.generate(&plan).unwrap();
        let err = engine.generate(&plan).unwrap_err();
        assert!(matches!(err, TaskError::AlreadyGenerated { .. }));

        // And nothing was double-inserted
        let stored = engine.store().tasks_for_plan(&plan.id).unwrap();
        assert_eq!(stored.len(), first.len());
    }

    #[test]
    fn test_complete_then_recomplete() {
        let mut engine = engine();
        let plan = saved_plan(&engine, ExperienceLevel::Intermediate, 30);
        let tasks = engine.generate(&plan).unwrap();
        let task_id = tasks[0].id.clone();

        let done = engine
            .complete(&task_id, "farmer-1", Some("all good".to_string()), None)
            .unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());
        assert_eq!(done.notes.as_deref(), Some("all good"));

        let err = engine.complete(&task_id, "farmer-1", None, None).unwrap_err();
        assert!(matches!(err, TaskError::AlreadyCompleted { .. }));

        // The original completion timestamp survives the failed retry
        let after = engine.store().task(&task_id).unwrap().unwrap();
        assert_eq!(after.completed_at, done.completed_at);
    }

    #[test]
    fn test_foreign_actor_sees_not_found() {
        let mut engine = engine();
        let plan = saved_plan(&engine, ExperienceLevel::Beginner, 21);
        let tasks = engine.generate(&plan).unwrap();

        let err = engine.complete(&tasks[0].id, "someone-else", None, None).unwrap_err();
        assert!(matches!(err, TaskError::NotFoundOrForbidden));

        let err = engine.complete("no-such-task", "farmer-1", None, None).unwrap_err();
        assert!(matches!(err, TaskError::NotFoundOrForbidden));
    }

    #[test]
    fn test_annotate_and_photo_ignore_completion_state() {
        let mut engine = engine();
        let plan = saved_plan(&engine, ExperienceLevel::Advanced, 35);
        let tasks = engine.generate(&plan).unwrap();
        let task_id = tasks[0].id.clone();

        let noted = engine.annotate(&task_id, "farmer-1", "looked thin").unwrap();
        assert_eq!(noted.notes.as_deref(), Some("looked thin"));
        assert!(!noted.completed);

        engine.complete(&task_id, "farmer-1", None, None).unwrap();
        let with_photo = engine.attach_photo(&task_id, "farmer-1", "photos/day1.jpg").unwrap();
        assert_eq!(with_photo.photo_ref.as_deref(), Some("photos/day1.jpg"));
        // Completion survived the annotation
        assert!(with_photo.completed);
        // Notes overwrite, they do not append
        let renoted = engine.annotate(&task_id, "farmer-1", "recovered").unwrap();
        assert_eq!(renoted.notes.as_deref(), Some("recovered"));
    }

    #[test]
    fn test_views_share_one_today() {
        let mut engine = engine();
        let plan = saved_plan(&engine, ExperienceLevel::Beginner, 21);
        engine.generate(&plan).unwrap();
        let today = date(2024, 1, 1);

        let view = engine.schedule(&plan.id, today).unwrap();
        assert_eq!(view.upcoming, view.total); // nothing completed yet

        let todays = engine.today(&plan.id, today).unwrap();
        assert!(todays.iter().all(|t| t.scheduled_date == today));

        let stats = engine.statistics(&plan.id, today).unwrap();
        assert_eq!(stats.total, view.total);
        assert_eq!(stats.overdue, 0);
    }
}
