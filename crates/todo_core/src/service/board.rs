//! Board facade over the task and category stores.
//!
//! # Responsibility
//! - Wire the shared task store into the category store as its cascade.
//! - Resolve "new task goes to the selected category".
//! - Apply a seed snapshot at startup.
//!
//! # Invariants
//! - Every task category resolves to an existing category after
//!   `from_seed` and after every board operation, except
//!   `update_task_category` with a name that matches no category.
//! - Task category names are stored exactly as the category store holds
//!   them, since cascades compare names exactly.

use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::model::naming::normalize_title;
use crate::model::task::{NewTask, Task, TaskId};
use crate::seed::{SeedData, SeedError};
use crate::store::category_store::{CategoryResult, CategoryStore};
use crate::store::observable::SubscriptionId;
use crate::store::task_store::{TaskGroup, TaskResult, TaskStore, TaskStoreError};
use log::{info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Task store handle shared between the board and the category store.
pub type SharedTaskStore = Rc<RefCell<TaskStore>>;

/// Composed task/category state for one UI session.
pub struct Board {
    tasks: SharedTaskStore,
    categories: CategoryStore<SharedTaskStore>,
}

impl Board {
    /// Builds a board from the built-in default categories.
    pub fn with_defaults() -> Result<Self, SeedError> {
        Self::from_seed(SeedData::builtin())
    }

    /// Builds a board from a seed snapshot.
    ///
    /// Seed tasks whose category matches no seeded category (under
    /// normalization) are moved to the first category.
    ///
    /// # Errors
    /// - `SeedError::Categories` when seeded categories are invalid.
    /// - `SeedError::EmptyTaskTitle` when a seeded task has a blank title.
    pub fn from_seed(seed: SeedData) -> Result<Self, SeedError> {
        if let Some(task) = seed
            .tasks
            .iter()
            .find(|task| normalize_title(&task.title).is_none())
        {
            return Err(SeedError::EmptyTaskTitle(task.id));
        }

        let tasks: SharedTaskStore = Rc::new(RefCell::new(TaskStore::new()));
        let selected = seed
            .selected_category
            .or_else(|| seed.categories.first().map(|category| category.name.clone()));
        let categories = CategoryStore::new(seed.categories, selected, Rc::clone(&tasks))?;

        let mut reassigned = 0;
        let resolved = seed
            .tasks
            .into_iter()
            .map(|mut task| {
                match categories.find_by_name(&task.category) {
                    Some(category) => task.category = category.name.clone(),
                    None => {
                        reassigned += 1;
                        task.category = categories.categories()[0].name.clone();
                    }
                }
                task
            })
            .collect::<Vec<_>>();
        if reassigned > 0 {
            warn!(
                "event=seed_apply module=board status=reassigned dangling_tasks={}",
                reassigned
            );
        }

        let task_count = resolved.len();
        *tasks.borrow_mut() = TaskStore::with_tasks(resolved);
        info!(
            "event=seed_apply module=board status=ok categories={} tasks={}",
            categories.len(),
            task_count
        );

        Ok(Self { tasks, categories })
    }

    pub fn categories(&self) -> Arc<Vec<Category>> {
        self.categories.categories()
    }

    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.categories.category(id).cloned()
    }

    pub fn find_category(&self, name: &str) -> Option<Category> {
        self.categories.find_by_name(name).cloned()
    }

    pub fn selected(&self) -> Option<String> {
        self.categories.selected().map(str::to_string)
    }

    pub fn tasks(&self) -> Arc<Vec<Task>> {
        self.tasks.borrow().tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.tasks.borrow().task(id).cloned()
    }

    pub fn tasks_by_category(&self) -> Vec<TaskGroup> {
        self.tasks.borrow().tasks_by_category()
    }

    /// Shared handle for callers that drive the task store directly.
    pub fn task_store(&self) -> SharedTaskStore {
        Rc::clone(&self.tasks)
    }

    pub fn category_store(&self) -> &CategoryStore<SharedTaskStore> {
        &self.categories
    }

    pub fn add_category(&mut self, input: NewCategory) -> CategoryResult<CategoryId> {
        self.categories.add_category(input)
    }

    pub fn update_category(&mut self, id: CategoryId, patch: CategoryPatch) -> CategoryResult<()> {
        self.categories.update_category(id, patch)
    }

    pub fn delete_category(&mut self, id: CategoryId) -> CategoryResult<()> {
        self.categories.delete_category(id)
    }

    pub fn select_category(&mut self, name: &str) -> CategoryResult<()> {
        self.categories.select_category(name)
    }

    pub fn clear_selection(&mut self) {
        self.categories.clear_selection();
    }

    /// Adds a task; `input.category = None` uses the selected category.
    ///
    /// An explicit category is matched under normalization and stored with
    /// the matched category's actual name, so later cascades find it.
    ///
    /// # Errors
    /// - `UnknownCategory` when the explicit category matches nothing.
    /// - `EmptyTitle` / `MissingCategory` from the task store.
    pub fn add_task(&mut self, mut input: NewTask) -> TaskResult<TaskId> {
        if let Some(requested) = input.category.take() {
            let resolved = self
                .categories
                .find_by_name(&requested)
                .map(|category| category.name.clone())
                .ok_or(TaskStoreError::UnknownCategory(requested))?;
            input.category = Some(resolved);
        }
        let selected = self.categories.selected();
        self.tasks.borrow_mut().add_task(input, selected)
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.tasks.borrow_mut().delete_task(id)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        self.tasks.borrow_mut().toggle_task(id)
    }

    pub fn update_task_title(&mut self, id: TaskId, title: &str) -> TaskResult<bool> {
        self.tasks.borrow_mut().update_task_title(id, title)
    }

    pub fn update_task_due_date(&mut self, id: TaskId, due_date: Option<i64>) -> bool {
        self.tasks.borrow_mut().update_task_due_date(id, due_date)
    }

    /// Retargets one task. A name matching an existing category under
    /// normalization is stored as that category's actual name; anything else
    /// is stored unchanged.
    pub fn update_task_category(&mut self, id: TaskId, category: &str) -> bool {
        let resolved = self
            .categories
            .find_by_name(category)
            .map_or(category, |found| found.name.as_str());
        self.tasks.borrow_mut().update_task_category(id, resolved)
    }

    pub fn reorder_tasks(&mut self, from_id: TaskId, to_id: TaskId) -> bool {
        self.tasks.borrow_mut().reorder_tasks(from_id, to_id)
    }

    pub fn subscribe_tasks<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Vec<Task>>) + 'static,
    {
        self.tasks.borrow_mut().subscribe(listener)
    }

    pub fn subscribe_grouped<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[TaskGroup]) + 'static,
    {
        self.tasks.borrow_mut().subscribe_grouped(listener)
    }

    pub fn unsubscribe_tasks(&mut self, id: SubscriptionId) -> bool {
        self.tasks.borrow_mut().unsubscribe(id)
    }

    pub fn subscribe_categories<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Vec<Category>>) + 'static,
    {
        self.categories.subscribe_categories(listener)
    }

    pub fn subscribe_selected<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Option<String>>) + 'static,
    {
        self.categories.subscribe_selected(listener)
    }
}
