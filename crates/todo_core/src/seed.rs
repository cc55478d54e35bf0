//! Initial store snapshot.
//!
//! # Responsibility
//! - Describe the seed handed to `Board::from_seed` at startup.
//! - Parse seed JSON produced by an external loader.
//!
//! # Invariants
//! - Parsing never touches the file system; callers pass the JSON text.
//! - Validation against store invariants happens in `Board::from_seed`.

use crate::model::category::Category;
use crate::model::task::{Task, TaskId};
use crate::store::category_store::CategoryStoreError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BUILTIN_CATEGORIES: [(&str, &str); 4] = [
    ("Work", "#FF6B6B"),
    ("Personal", "#4ECDC4"),
    ("Shopping", "#45B7D3"),
    ("Health", "#A4D8A4"),
];

/// Errors raised while parsing or applying a seed.
#[derive(Debug)]
pub enum SeedError {
    /// Seed text is not valid seed JSON.
    Json(serde_json::Error),
    /// Seed categories break a category-store invariant.
    Categories(CategoryStoreError),
    /// A seeded task has a blank title.
    EmptyTaskTitle(TaskId),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid seed json: {err}"),
            Self::Categories(err) => write!(f, "invalid seed categories: {err}"),
            Self::EmptyTaskTitle(id) => write!(f, "seed task has empty title: {id}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Categories(err) => Some(err),
            Self::EmptyTaskTitle(_) => None,
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CategoryStoreError> for SeedError {
    fn from(value: CategoryStoreError) -> Self {
        Self::Categories(value)
    }
}

/// Categories, tasks and selection to start from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// `None` selects the first category.
    #[serde(default)]
    pub selected_category: Option<String>,
}

impl SeedData {
    /// Default categories with "Work" selected and no tasks.
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .zip(0_u32..)
            .map(|((name, color), index)| Category::new(*name, *color, index))
            .collect();
        Self {
            categories,
            tasks: Vec::new(),
            selected_category: Some("Work".to_string()),
        }
    }

    /// Parses seed JSON.
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }
}
