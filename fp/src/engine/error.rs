//! Task engine errors
//!
//! Everything here is recoverable at the calling layer; the engine never
//! retries internally.

use flockcalc::CycleType;
use thiserror::Error;

use crate::store::StoreError;

/// Errors from task generation and the completion workflow
#[derive(Debug, Error)]
pub enum TaskError {
    /// The catalog holds nothing usable for this cycle. Generation must
    /// never silently produce an empty schedule.
    #[error("no task templates found for a {cycle} cycle")]
    NoTemplatesFound { cycle: CycleType },

    #[error("tasks were already generated for plan {plan_id}")]
    AlreadyGenerated { plan_id: String },

    /// A missing task and someone else's task look identical from the
    /// outside; the caller learns nothing about other farmers' rows.
    #[error("task not found")]
    NotFoundOrForbidden,

    /// Completion is not idempotent: the completion timestamp records a
    /// single true event, so a repeat call is a caller error.
    #[error("task {task_id} is already completed")]
    AlreadyCompleted { task_id: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
