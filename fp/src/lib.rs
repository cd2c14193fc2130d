//! FlockPlan - daily task planning for small-flock broiler cycles
//!
//! FlockPlan turns a viable plan from [`flockcalc`] into a persisted farm
//! plan and expands a template catalog into a dated, personalized task list
//! for it: what to do on which day, with beginner guidance folded in.
//!
//! # Core Concepts
//!
//! - **One Generation Per Plan**: a plan's task list is created exactly
//!   once; the existence guard and the batch insert share one transaction
//! - **Injected Catalog**: the task engine takes its template catalog as a
//!   value, never reaching into ambient state, so synthetic catalogs drop
//!   straight into tests
//! - **Dates From Day Numbers**: templates carry 1-based day offsets; the
//!   schedule pins them to calendar dates from the plan's start date
//!
//! # Modules
//!
//! - [`catalog`] - Task template catalog and YAML loading
//! - [`engine`] - Task generation, queries and the completion workflow
//! - [`store`] - SQLite persistence for plans and tasks
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod store;

// Re-export commonly used types
pub use catalog::{TaskTemplate, TemplateCatalog, TipTopic};
pub use config::Config;
pub use domain::{DailyTask, FarmPlan, TaskCategory};
pub use engine::{DayGroup, ScheduleView, TaskEngine, TaskError, TaskStatistics};
pub use store::{Store, StoreError};

// Re-export the planning vocabulary for convenience
pub use flockcalc::{CycleType, ExperienceLevel, MarketRates, Outcome, PlanningInput, Recommendation};
