//! Core state management for the to-do app.
//! This crate is the single source of truth for task/category invariants.

pub mod logging;
pub mod model;
pub mod outcome;
pub mod seed;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, CategoryPatch, NewCategory};
pub use model::naming::{names_match, normalize_name, normalize_title};
pub use model::task::{NewTask, Task, TaskId};
pub use outcome::ActionOutcome;
pub use seed::{SeedData, SeedError};
pub use service::board::{Board, SharedTaskStore};
pub use store::category_store::{
    CategoryCascade, CategoryResult, CategoryStore, CategoryStoreError,
};
pub use store::observable::{Observable, SubscriptionId};
pub use store::task_store::{group_by_category, TaskGroup, TaskResult, TaskStore, TaskStoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
