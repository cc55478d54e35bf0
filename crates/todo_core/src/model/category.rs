//! Category domain model.
//!
//! # Responsibility
//! - Define the category record referenced by tasks.
//! - Define create/patch request shapes used by the category store.
//!
//! # Invariants
//! - `id` is stable and never reused for another category.
//! - `name` is the reference key tasks point at; compare it only through
//!   `model::naming::names_match`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// One task category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default = "Uuid::new_v4")]
    pub id: CategoryId,
    /// Reference name. Store-created names are already normalized.
    pub name: String,
    /// Display color, opaque to core (for example `#FF6B6B`).
    #[serde(default)]
    pub color: String,
    /// Display ordering hint.
    #[serde(default)]
    pub index: u32,
}

impl Category {
    /// Creates a category with a generated stable ID.
    ///
    /// The name is stored as given; callers that need normalization go
    /// through the category store.
    pub fn new(name: impl Into<String>, color: impl Into<String>, index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            index,
        }
    }
}

/// Request model for adding a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub index: u32,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            index,
        }
    }
}

/// Partial update for an existing category. `None` fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub index: Option<u32>,
}

impl CategoryPatch {
    /// Patch that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
