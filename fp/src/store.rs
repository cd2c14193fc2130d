//! SQLite persistence for farm plans and daily tasks
//!
//! The store owns the two serialization points the engine contract leans
//! on: task generation runs its existence guard and batch insert inside one
//! immediate transaction, and task completion is a single conditional
//! update keyed on the uncompleted state. Tasks belong to their plan and
//! die with it via foreign-key cascade.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use flockcalc::ExperienceLevel;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{DailyTask, FarmPlan, TaskCategory};

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// The generation guard tripped: the plan already has tasks
    #[error("plan {plan_id} already has generated tasks")]
    TasksExist { plan_id: String },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS farm_plans (
    id            TEXT PRIMARY KEY,
    owner_id      TEXT NOT NULL,
    flock_size    INTEGER NOT NULL,
    duration_days INTEGER NOT NULL,
    experience    TEXT NOT NULL,
    start_date    TEXT NOT NULL,
    created_at    INTEGER NOT NULL,
    updated_at    INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS daily_tasks (
    id             TEXT PRIMARY KEY,
    plan_id        TEXT NOT NULL REFERENCES farm_plans(id) ON DELETE CASCADE,
    template_id    TEXT,
    day_number     INTEGER NOT NULL,
    scheduled_date TEXT NOT NULL,
    title          TEXT NOT NULL,
    description    TEXT NOT NULL,
    category       TEXT NOT NULL,
    critical       INTEGER NOT NULL,
    completed      INTEGER NOT NULL DEFAULT 0,
    completed_at   TEXT,
    photo_ref      TEXT,
    notes          TEXT
);

CREATE INDEX IF NOT EXISTS idx_daily_tasks_plan ON daily_tasks(plan_id);
CREATE INDEX IF NOT EXISTS idx_farm_plans_owner ON farm_plans(owner_id);
";

/// SQLite-backed store for plans and tasks
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "Opened store");
        Self::init(conn)
    }

    /// In-memory store for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // ---- plans ----

    pub fn insert_plan(&self, plan: &FarmPlan) -> Result<(), StoreError> {
        debug!(plan_id = %plan.id, "insert_plan");
        self.conn.execute(
            "INSERT INTO farm_plans (id, owner_id, flock_size, duration_days, experience, start_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                plan.id,
                plan.owner_id,
                plan.flock_size,
                plan.duration_days,
                plan.experience.to_string(),
                plan.start_date.to_string(),
                plan.created_at,
                plan.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn plan(&self, id: &str) -> Result<Option<FarmPlan>, StoreError> {
        let plan = self
            .conn
            .query_row("SELECT * FROM farm_plans WHERE id = ?1", params![id], plan_from_row)
            .optional()?;
        Ok(plan)
    }

    pub fn plans_for_owner(&self, owner_id: &str) -> Result<Vec<FarmPlan>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM farm_plans WHERE owner_id = ?1 ORDER BY created_at")?;
        let plans = stmt
            .query_map(params![owner_id], plan_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(plans)
    }

    /// Delete a plan; its tasks go with it. Returns false when the plan
    /// did not exist.
    pub fn delete_plan(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.conn.execute("DELETE FROM farm_plans WHERE id = ?1", params![id])?;
        debug!(plan_id = %id, deleted, "delete_plan");
        Ok(deleted > 0)
    }

    // ---- tasks ----

    /// Insert a plan's generated batch, guarded against double generation.
    ///
    /// Guard and insert share one immediate transaction, so two concurrent
    /// generation attempts serialize and the loser sees
    /// [`StoreError::TasksExist`].
    pub fn insert_tasks(&mut self, plan_id: &str, tasks: &[DailyTask]) -> Result<(), StoreError> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM daily_tasks WHERE plan_id = ?1",
            params![plan_id],
            |row| row.get(0),
        )?;
        if existing > 0 {
            return Err(StoreError::TasksExist {
                plan_id: plan_id.to_string(),
            });
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO daily_tasks (id, plan_id, template_id, day_number, scheduled_date, title, description,
                                          category, critical, completed, completed_at, photo_ref, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for task in tasks {
                stmt.execute(params![
                    task.id,
                    task.plan_id,
                    task.template_id,
                    task.day_number,
                    task.scheduled_date.to_string(),
                    task.title,
                    task.description,
                    task.category.to_string(),
                    task.critical,
                    task.completed,
                    task.completed_at.map(|t| t.to_rfc3339()),
                    task.photo_ref,
                    task.notes,
                ])?;
            }
        }

        tx.commit()?;
        debug!(plan_id = %plan_id, count = tasks.len(), "insert_tasks committed");
        Ok(())
    }

    pub fn has_tasks(&self, plan_id: &str) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM daily_tasks WHERE plan_id = ?1",
            params![plan_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All of a plan's tasks, day ascending, critical-first within a day,
    /// insert order as the final tiebreak
    pub fn tasks_for_plan(&self, plan_id: &str) -> Result<Vec<DailyTask>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM daily_tasks WHERE plan_id = ?1 ORDER BY day_number ASC, critical DESC, rowid ASC",
        )?;
        let tasks = stmt
            .query_map(params![plan_id], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    pub fn task(&self, id: &str) -> Result<Option<DailyTask>, StoreError> {
        let task = self
            .conn
            .query_row("SELECT * FROM daily_tasks WHERE id = ?1", params![id], task_from_row)
            .optional()?;
        Ok(task)
    }

    /// A task together with the owner of its plan, for ownership checks
    pub fn task_with_owner(&self, id: &str) -> Result<Option<(DailyTask, String)>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT t.*, p.owner_id FROM daily_tasks t
                 JOIN farm_plans p ON p.id = t.plan_id
                 WHERE t.id = ?1",
                params![id],
                |row| Ok((task_from_row(row)?, row.get::<_, String>(13)?)),
            )
            .optional()?;
        Ok(row)
    }

    /// Conditionally mark a task completed. Returns the number of rows
    /// changed: 0 means the task was missing or already completed, and the
    /// existing completion state is untouched.
    pub fn complete_task(
        &self,
        id: &str,
        at: DateTime<Utc>,
        notes: Option<&str>,
        photo_ref: Option<&str>,
    ) -> Result<usize, StoreError> {
        let changed = self.conn.execute(
            "UPDATE daily_tasks
             SET completed = 1,
                 completed_at = ?2,
                 notes = COALESCE(?3, notes),
                 photo_ref = COALESCE(?4, photo_ref)
             WHERE id = ?1 AND completed = 0",
            params![id, at.to_rfc3339(), notes, photo_ref],
        )?;
        Ok(changed)
    }

    pub fn set_notes(&self, id: &str, notes: &str) -> Result<usize, StoreError> {
        Ok(self
            .conn
            .execute("UPDATE daily_tasks SET notes = ?2 WHERE id = ?1", params![id, notes])?)
    }

    pub fn set_photo(&self, id: &str, photo_ref: &str) -> Result<usize, StoreError> {
        Ok(self.conn.execute(
            "UPDATE daily_tasks SET photo_ref = ?2 WHERE id = ?1",
            params![id, photo_ref],
        )?)
    }
}

fn parse_text<T, E>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<FarmPlan> {
    Ok(FarmPlan {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        flock_size: row.get(2)?,
        duration_days: row.get(3)?,
        experience: parse_text::<ExperienceLevel, _>(row, 4)?,
        start_date: parse_text::<NaiveDate, _>(row, 5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<DailyTask> {
    let completed_at: Option<String> = row.get(10)?;
    let completed_at = completed_at
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))
        })
        .transpose()?;

    Ok(DailyTask {
        id: row.get(0)?,
        plan_id: row.get(1)?,
        template_id: row.get(2)?,
        day_number: row.get(3)?,
        scheduled_date: parse_text::<NaiveDate, _>(row, 4)?,
        title: row.get(5)?,
        description: row.get(6)?,
        category: parse_text::<TaskCategory, _>(row, 7)?,
        critical: row.get(8)?,
        completed: row.get(9)?,
        completed_at,
        photo_ref: row.get(11)?,
        notes: row.get(12)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(owner: &str) -> FarmPlan {
        FarmPlan::new(owner, 12, 30, ExperienceLevel::Beginner, date(2024, 1, 1))
    }

    fn task(plan_id: &str, day: u32, critical: bool) -> DailyTask {
        DailyTask::new(
            plan_id,
            Some(format!("tpl-d{}", day)),
            day,
            date(2024, 1, 1) + chrono::Days::new((day - 1) as u64),
            format!("Task day {}", day),
            "do the thing",
            TaskCategory::Monitoring,
            critical,
        )
    }

    #[test]
    fn test_plan_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();

        let loaded = store.plan(&plan.id).unwrap().unwrap();
        assert_eq!(loaded, plan);
        assert!(store.plan("missing").unwrap().is_none());
    }

    #[test]
    fn test_plans_for_owner() {
        let store = Store::open_in_memory().unwrap();
        let mine = plan("farmer-1");
        let theirs = plan("farmer-2");
        store.insert_plan(&mine).unwrap();
        store.insert_plan(&theirs).unwrap();

        let plans = store.plans_for_owner("farmer-1").unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, mine.id);
    }

    #[test]
    fn test_insert_tasks_guard() {
        let mut store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();

        let batch = vec![task(&plan.id, 1, true), task(&plan.id, 2, false)];
        store.insert_tasks(&plan.id, &batch).unwrap();

        let err = store.insert_tasks(&plan.id, &batch).unwrap_err();
        assert!(matches!(err, StoreError::TasksExist { .. }));
        assert_eq!(store.tasks_for_plan(&plan.id).unwrap().len(), 2);
    }

    #[test]
    fn test_task_round_trip_preserves_fields() {
        let mut store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();

        let original = task(&plan.id, 5, true);
        store.insert_tasks(&plan.id, std::slice::from_ref(&original)).unwrap();

        let loaded = store.task(&original.id).unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_tasks_order_day_then_critical() {
        let mut store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();

        let batch = vec![
            task(&plan.id, 2, false),
            task(&plan.id, 1, false),
            task(&plan.id, 1, true),
        ];
        store.insert_tasks(&plan.id, &batch).unwrap();

        let tasks = store.tasks_for_plan(&plan.id).unwrap();
        assert_eq!(tasks[0].day_number, 1);
        assert!(tasks[0].critical);
        assert_eq!(tasks[1].day_number, 1);
        assert!(!tasks[1].critical);
        assert_eq!(tasks[2].day_number, 2);
    }

    #[test]
    fn test_complete_task_is_conditional() {
        let mut store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();
        let t = task(&plan.id, 1, true);
        store.insert_tasks(&plan.id, std::slice::from_ref(&t)).unwrap();

        let first_at = Utc::now();
        assert_eq!(store.complete_task(&t.id, first_at, Some("done"), None).unwrap(), 1);

        // Second attempt changes nothing, timestamp included
        assert_eq!(store.complete_task(&t.id, Utc::now(), None, None).unwrap(), 0);
        let loaded = store.task(&t.id).unwrap().unwrap();
        assert!(loaded.completed);
        assert_eq!(loaded.completed_at.unwrap().to_rfc3339(), first_at.to_rfc3339());
        assert_eq!(loaded.notes.as_deref(), Some("done"));
    }

    #[test]
    fn test_complete_keeps_existing_annotations() {
        let mut store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();
        let t = task(&plan.id, 1, false);
        store.insert_tasks(&plan.id, std::slice::from_ref(&t)).unwrap();

        store.set_notes(&t.id, "pre-completion note").unwrap();
        store.complete_task(&t.id, Utc::now(), None, None).unwrap();

        let loaded = store.task(&t.id).unwrap().unwrap();
        assert_eq!(loaded.notes.as_deref(), Some("pre-completion note"));
    }

    #[test]
    fn test_task_with_owner() {
        let mut store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();
        let t = task(&plan.id, 1, false);
        store.insert_tasks(&plan.id, std::slice::from_ref(&t)).unwrap();

        let (loaded, owner) = store.task_with_owner(&t.id).unwrap().unwrap();
        assert_eq!(loaded.id, t.id);
        assert_eq!(owner, "farmer-1");
        assert!(store.task_with_owner("missing").unwrap().is_none());
    }

    #[test]
    fn test_delete_plan_cascades() {
        let mut store = Store::open_in_memory().unwrap();
        let plan = plan("farmer-1");
        store.insert_plan(&plan).unwrap();
        store
            .insert_tasks(&plan.id, &[task(&plan.id, 1, false), task(&plan.id, 2, false)])
            .unwrap();

        assert!(store.delete_plan(&plan.id).unwrap());
        assert!(store.plan(&plan.id).unwrap().is_none());
        assert!(store.tasks_for_plan(&plan.id).unwrap().is_empty());
        assert!(!store.delete_plan(&plan.id).unwrap());
    }
}
