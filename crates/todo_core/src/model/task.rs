//! Task domain model.
//!
//! # Responsibility
//! - Define the task record held by the task store.
//! - Accept `text`/`done` as alternate field names for `title`/`completed`
//!   when deserializing.
//!
//! # Invariants
//! - `id` is generated once and never reused.
//! - `created_at` is immutable after creation.
//! - `category` is a soft reference by category name, not ownership.

use crate::model::naming::now_epoch_ms;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: TaskId,
    #[serde(alias = "text")]
    pub title: String,
    #[serde(default, alias = "done")]
    pub completed: bool,
    /// Name of the category this task belongs to.
    pub category: String,
    /// Unix epoch milliseconds.
    #[serde(default = "now_epoch_ms")]
    pub created_at: i64,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
}

impl Task {
    /// Creates an open task stamped with the current time.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            category: category.into(),
            created_at: now_epoch_ms(),
            due_date: None,
        }
    }
}

/// Request model for adding a task.
///
/// `category = None` means "use the caller's default", which the board
/// resolves to the selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub category: Option<String>,
    pub due_date: Option<i64>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn due(mut self, due_epoch_ms: i64) -> Self {
        self.due_date = Some(due_epoch_ms);
        self
    }
}
