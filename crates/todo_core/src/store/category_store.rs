//! Category store.
//!
//! # Responsibility
//! - Own the ordered category list and the selected category.
//! - Enforce name uniqueness and the non-empty category set.
//! - Cascade renames/deletes into the task side through `CategoryCascade`.
//!
//! # Invariants
//! - Category names are unique under `normalize_name`.
//! - At least one category exists at all times.
//! - The selection is unset or names an existing category.
//! - Every operation validates fully before changing any state.
//! - Category and selection snapshots are committed before the cascade
//!   runs; their subscribers are notified after it returns.

use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::model::naming::{names_match, normalize_name};
use crate::store::observable::{Observable, SubscriptionId};
use crate::store::task_store::TaskStore;
use log::{info, warn};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

pub type CategoryResult<T> = Result<T, CategoryStoreError>;

/// Narrow write interface the category store needs from the task side.
pub trait CategoryCascade {
    /// Retargets every task in `old_name` to `new_name`; returns how many
    /// tasks moved.
    fn cascade_rename_category(&mut self, old_name: &str, new_name: &str) -> usize;
}

impl CategoryCascade for TaskStore {
    fn cascade_rename_category(&mut self, old_name: &str, new_name: &str) -> usize {
        TaskStore::cascade_rename_category(self, old_name, new_name)
    }
}

impl<C: CategoryCascade + ?Sized> CategoryCascade for &mut C {
    fn cascade_rename_category(&mut self, old_name: &str, new_name: &str) -> usize {
        (**self).cascade_rename_category(old_name, new_name)
    }
}

impl<C: CategoryCascade + ?Sized> CategoryCascade for Rc<RefCell<C>> {
    fn cascade_rename_category(&mut self, old_name: &str, new_name: &str) -> usize {
        self.borrow_mut().cascade_rename_category(old_name, new_name)
    }
}

/// Validation failures for category writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryStoreError {
    /// Name is blank after trim.
    EmptyName,
    /// Another category already uses this normalized name.
    DuplicateName(String),
    /// No category has this id.
    NotFound(CategoryId),
    /// No category matches this name.
    UnknownCategoryName(String),
    /// Deleting would leave zero categories.
    LastCategory,
    /// Initial snapshot contained no categories.
    NoCategories,
}

impl Display for CategoryStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name must not be empty"),
            Self::DuplicateName(_) => write!(f, "This category already exists"),
            Self::NotFound(_) | Self::UnknownCategoryName(_) => write!(f, "Category not found"),
            Self::LastCategory => write!(f, "You must have at least one category"),
            Self::NoCategories => write!(f, "At least one category is required"),
        }
    }
}

impl Error for CategoryStoreError {}

/// In-memory observable category list plus selection.
pub struct CategoryStore<C: CategoryCascade> {
    categories: Observable<Vec<Category>>,
    selected: Observable<Option<String>>,
    cascade: C,
}

impl<C: CategoryCascade> CategoryStore<C> {
    /// Creates a store from an initial snapshot.
    ///
    /// # Errors
    /// - `NoCategories` when `categories` is empty.
    /// - `EmptyName` / `DuplicateName` when seeded names break uniqueness.
    /// - `UnknownCategoryName` when `selected` names no seeded category.
    pub fn new(
        categories: Vec<Category>,
        selected: Option<String>,
        cascade: C,
    ) -> CategoryResult<Self> {
        if categories.is_empty() {
            return Err(CategoryStoreError::NoCategories);
        }
        for (position, category) in categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(CategoryStoreError::EmptyName);
            }
            if categories[..position]
                .iter()
                .any(|earlier| names_match(&earlier.name, &category.name))
            {
                return Err(CategoryStoreError::DuplicateName(normalize_name(
                    &category.name,
                )));
            }
        }

        let selected = match selected {
            Some(name) => Some(
                categories
                    .iter()
                    .find(|category| names_match(&category.name, &name))
                    .map(|category| category.name.clone())
                    .ok_or(CategoryStoreError::UnknownCategoryName(name))?,
            ),
            None => None,
        };

        Ok(Self {
            categories: Observable::new(categories),
            selected: Observable::new(selected),
            cascade,
        })
    }

    /// Current category snapshot.
    pub fn categories(&self) -> Arc<Vec<Category>> {
        self.categories.snapshot()
    }

    /// Currently selected category name.
    pub fn selected(&self) -> Option<&str> {
        self.selected.get().as_deref()
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get().iter().find(|category| category.id == id)
    }

    /// Finds a category whose name matches under normalization.
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .get()
            .iter()
            .find(|category| names_match(&category.name, name))
    }

    pub fn len(&self) -> usize {
        self.categories.get().len()
    }

    /// Always `false` for a constructed store; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.categories.get().is_empty()
    }

    pub fn cascade(&self) -> &C {
        &self.cascade
    }

    pub fn subscribe_categories<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Vec<Category>>) + 'static,
    {
        self.categories.subscribe(listener)
    }

    pub fn unsubscribe_categories(&mut self, id: SubscriptionId) -> bool {
        self.categories.unsubscribe(id)
    }

    pub fn subscribe_selected<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Option<String>>) + 'static,
    {
        self.selected.subscribe(listener)
    }

    pub fn unsubscribe_selected(&mut self, id: SubscriptionId) -> bool {
        self.selected.unsubscribe(id)
    }

    /// Appends a category with a normalized name and a fresh id.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed name is empty.
    /// - `DuplicateName` when the normalized name is already used.
    pub fn add_category(&mut self, input: NewCategory) -> CategoryResult<CategoryId> {
        let name = self.validate_name(&input.name, None)?;
        let category = Category {
            id: Uuid::new_v4(),
            name,
            color: input.color,
            index: input.index,
        };
        let id = category.id;

        let mut next = self.categories.get().clone();
        next.push(category);
        self.categories.set(next);

        info!(
            "event=category_add module=category_store status=ok category_id={} total={}",
            id,
            self.len()
        );
        Ok(id)
    }

    /// Applies a patch to one category, cascading a rename into tasks.
    ///
    /// # Errors
    /// - `NotFound` when `id` is unknown.
    /// - `EmptyName` / `DuplicateName` when the new name is rejected.
    pub fn update_category(&mut self, id: CategoryId, patch: CategoryPatch) -> CategoryResult<()> {
        let index = self
            .position(id)
            .ok_or(CategoryStoreError::NotFound(id))?;
        let new_name = match patch.name.as_deref() {
            Some(name) => Some(self.validate_name(name, Some(id))?),
            None => None,
        };

        let mut next = self.categories.get().clone();
        let old_name = next[index].name.clone();
        let category = &mut next[index];
        if let Some(name) = &new_name {
            category.name = name.clone();
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(order) = patch.index {
            category.index = order;
        }

        match new_name.filter(|name| *name != old_name) {
            Some(name) => {
                self.commit_with_cascade(next, &old_name, &name);
                info!(
                    "event=category_rename module=category_store status=ok category_id={}",
                    id
                );
            }
            None => {
                self.categories.set(next);
                info!(
                    "event=category_update module=category_store status=ok category_id={}",
                    id
                );
            }
        }
        Ok(())
    }

    /// Removes one category and moves its tasks to the first remaining one.
    ///
    /// # Errors
    /// - `LastCategory` when only one category exists.
    /// - `NotFound` when `id` is unknown.
    pub fn delete_category(&mut self, id: CategoryId) -> CategoryResult<()> {
        if self.len() <= 1 {
            warn!("event=category_delete module=category_store status=rejected reason=last_category");
            return Err(CategoryStoreError::LastCategory);
        }
        let index = self
            .position(id)
            .ok_or(CategoryStoreError::NotFound(id))?;

        let mut next = self.categories.get().clone();
        let removed = next.remove(index);
        let fallback = next[0].name.clone();

        self.commit_with_cascade(next, &removed.name, &fallback);
        info!(
            "event=category_delete module=category_store status=ok category_id={} remaining={}",
            id,
            self.len()
        );
        Ok(())
    }

    /// Selects the category whose name matches `name` under normalization.
    ///
    /// # Errors
    /// - `UnknownCategoryName` when nothing matches.
    pub fn select_category(&mut self, name: &str) -> CategoryResult<()> {
        let resolved = self
            .find_by_name(name)
            .map(|category| category.name.clone())
            .ok_or_else(|| CategoryStoreError::UnknownCategoryName(name.to_string()))?;
        if self.selected() != Some(resolved.as_str()) {
            self.selected.set(Some(resolved));
        }
        Ok(())
    }

    /// Unsets the selection.
    pub fn clear_selection(&mut self) {
        if self.selected.get().is_some() {
            self.selected.set(None);
        }
    }

    fn position(&self, id: CategoryId) -> Option<usize> {
        self.categories
            .get()
            .iter()
            .position(|category| category.id == id)
    }

    /// Normalizes `name` and checks it against every category except
    /// `exclude`.
    fn validate_name(&self, name: &str, exclude: Option<CategoryId>) -> CategoryResult<String> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Err(CategoryStoreError::EmptyName);
        }
        let taken = self
            .categories
            .get()
            .iter()
            .filter(|category| Some(category.id) != exclude)
            .any(|category| normalize_name(&category.name) == normalized);
        if taken {
            warn!("event=category_validate module=category_store status=rejected reason=duplicate_name");
            return Err(CategoryStoreError::DuplicateName(normalized));
        }
        Ok(normalized)
    }

    /// Commits categories and selection, runs the task cascade, then
    /// notifies category/selection subscribers.
    fn commit_with_cascade(&mut self, next: Vec<Category>, old_name: &str, new_name: &str) {
        self.categories.stage(next);
        let retarget_selection = self.selected() == Some(old_name);
        if retarget_selection {
            self.selected.stage(Some(new_name.to_string()));
        }

        let moved = self.cascade.cascade_rename_category(old_name, new_name);

        self.categories.notify();
        if retarget_selection {
            self.selected.notify();
        }
        info!(
            "event=category_cascade module=category_store status=ok moved_tasks={} selection_retargeted={}",
            moved, retarget_selection
        );
    }
}
