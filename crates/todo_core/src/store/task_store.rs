//! Task store.
//!
//! # Responsibility
//! - Own the ordered task collection and publish snapshots to subscribers.
//! - Expose bulk category retargeting for category-store cascades.
//! - Derive the category -> tasks grouping from the current snapshot.
//!
//! # Invariants
//! - Iteration order is insertion order unless `reorder_tasks` moves a task.
//! - Operations on a missing task id are silent no-ops.
//! - Subscribers are notified only when the collection actually changed.
//! - This store never reads category state.

use crate::model::naming::{normalize_title, now_epoch_ms};
use crate::model::task::{NewTask, Task, TaskId};
use crate::store::observable::{Observable, SubscriptionId};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub type TaskResult<T> = Result<T, TaskStoreError>;

/// Validation failures for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Title is blank after trim.
    EmptyTitle,
    /// Neither the request nor the caller supplied a category.
    MissingCategory,
    /// Requested category matches no existing category. Raised by callers
    /// that can see category state, such as the board.
    UnknownCategory(String),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Task title must not be empty"),
            Self::MissingCategory => write!(f, "Task must belong to a category"),
            Self::UnknownCategory(_) => write!(f, "Category not found"),
        }
    }
}

impl Error for TaskStoreError {}

/// Tasks sharing one category name, in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup {
    pub category: String,
    pub tasks: Vec<Task>,
}

/// Groups tasks by category name.
///
/// Groups appear in order of their first task; tasks keep collection order
/// inside each group.
pub fn group_by_category(tasks: &[Task]) -> Vec<TaskGroup> {
    let mut groups: Vec<TaskGroup> = Vec::new();
    for task in tasks {
        match groups
            .iter_mut()
            .find(|group| group.category == task.category)
        {
            Some(group) => group.tasks.push(task.clone()),
            None => groups.push(TaskGroup {
                category: task.category.clone(),
                tasks: vec![task.clone()],
            }),
        }
    }
    groups
}

/// In-memory observable task collection.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Observable<Vec<Task>>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Creates a store from an initial snapshot, kept in the given order.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Observable::new(tasks),
        }
    }

    /// Current task snapshot.
    pub fn tasks(&self) -> Arc<Vec<Task>> {
        self.tasks.snapshot()
    }

    /// Looks up one task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get().iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.get().is_empty()
    }

    /// Derived category grouping of the current snapshot.
    pub fn tasks_by_category(&self) -> Vec<TaskGroup> {
        group_by_category(self.tasks.get())
    }

    /// Subscribes to task snapshots.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Vec<Task>>) + 'static,
    {
        self.tasks.subscribe(listener)
    }

    /// Subscribes to the derived category grouping.
    ///
    /// The grouping is recomputed from each published snapshot.
    pub fn subscribe_grouped<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&[TaskGroup]) + 'static,
    {
        self.tasks
            .subscribe(move |tasks| listener(&group_by_category(tasks)))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.tasks.unsubscribe(id)
    }

    /// Appends a new task.
    ///
    /// `default_category` is used when `input.category` is `None`.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    /// - `MissingCategory` when no category is available.
    pub fn add_task(
        &mut self,
        input: NewTask,
        default_category: Option<&str>,
    ) -> TaskResult<TaskId> {
        let title = normalize_title(&input.title).ok_or(TaskStoreError::EmptyTitle)?;
        let category = input
            .category
            .or_else(|| default_category.map(str::to_string))
            .ok_or(TaskStoreError::MissingCategory)?;

        let task = Task {
            id: Uuid::new_v4(),
            title,
            completed: false,
            category,
            created_at: now_epoch_ms(),
            due_date: input.due_date,
        };
        let id = task.id;

        let mut next = self.tasks.get().clone();
        next.push(task);
        self.tasks.set(next);

        info!(
            "event=task_add module=task_store status=ok task_id={} total={}",
            id,
            self.len()
        );
        Ok(id)
    }

    /// Removes a task. Returns `false` when `id` was absent.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let current = self.tasks.get();
        if !current.iter().any(|task| task.id == id) {
            debug!("event=task_delete module=task_store status=noop task_id={id}");
            return false;
        }

        let next = current
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect::<Vec<_>>();
        self.tasks.set(next);
        info!("event=task_delete module=task_store status=ok task_id={id}");
        true
    }

    /// Flips completion state. Returns `false` when `id` was absent.
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        self.modify_task(id, "task_toggle", |task| {
            task.completed = !task.completed;
        })
    }

    /// Replaces the title of one task.
    ///
    /// Returns `Ok(false)` when `id` was absent.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    pub fn update_task_title(&mut self, id: TaskId, title: &str) -> TaskResult<bool> {
        let title = normalize_title(title).ok_or(TaskStoreError::EmptyTitle)?;
        Ok(self.modify_task(id, "task_update_title", move |task| {
            task.title = title;
        }))
    }

    /// Sets or clears the due date. Returns `false` when `id` was absent.
    pub fn update_task_due_date(&mut self, id: TaskId, due_date: Option<i64>) -> bool {
        self.modify_task(id, "task_update_due_date", move |task| {
            task.due_date = due_date;
        })
    }

    /// Retargets one task. The category name is not checked for existence.
    pub fn update_task_category(&mut self, id: TaskId, category: &str) -> bool {
        let category = category.to_string();
        self.modify_task(id, "task_update_category", move |task| {
            task.category = category;
        })
    }

    /// Moves every task in `old_category` to `new_category` in one pass.
    ///
    /// Returns the number of retargeted tasks; zero means nothing was
    /// published.
    pub fn cascade_rename_category(&mut self, old_category: &str, new_category: &str) -> usize {
        if old_category == new_category {
            return 0;
        }

        let mut moved = 0;
        let next = self
            .tasks
            .get()
            .iter()
            .map(|task| {
                if task.category == old_category {
                    moved += 1;
                    Task {
                        category: new_category.to_string(),
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect::<Vec<_>>();

        if moved > 0 {
            self.tasks.set(next);
        }
        info!(
            "event=task_cascade module=task_store status=ok moved={}",
            moved
        );
        moved
    }

    /// Moves `from_id` into the position currently held by `to_id`.
    ///
    /// Splice semantics: the task is removed, then inserted at `to_id`'s
    /// original index. Returns `false` when either id is absent or both
    /// are the same.
    pub fn reorder_tasks(&mut self, from_id: TaskId, to_id: TaskId) -> bool {
        if from_id == to_id {
            return false;
        }
        let current = self.tasks.get();
        let from_index = current.iter().position(|task| task.id == from_id);
        let to_index = current.iter().position(|task| task.id == to_id);
        let (Some(from_index), Some(to_index)) = (from_index, to_index) else {
            debug!("event=task_reorder module=task_store status=noop");
            return false;
        };

        let mut next = current.clone();
        let moved = next.remove(from_index);
        next.insert(to_index, moved);
        self.tasks.set(next);
        debug!(
            "event=task_reorder module=task_store status=ok from_index={} to_index={}",
            from_index, to_index
        );
        true
    }

    fn modify_task<F>(&mut self, id: TaskId, event: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Task),
    {
        let Some(index) = self.tasks.get().iter().position(|task| task.id == id) else {
            debug!("event={event} module=task_store status=noop task_id={id}");
            return false;
        };

        let mut next = self.tasks.get().clone();
        apply(&mut next[index]);
        self.tasks.set(next);
        debug!("event={event} module=task_store status=ok task_id={id}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{group_by_category, TaskStore};
    use crate::model::task::{NewTask, Task};

    #[test]
    fn group_by_category_keeps_first_appearance_order() {
        let tasks = vec![
            Task::new("a", "work"),
            Task::new("b", "health"),
            Task::new("c", "work"),
        ];
        let groups = group_by_category(&tasks);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "work");
        assert_eq!(groups[0].tasks.len(), 2);
        assert_eq!(groups[0].tasks[1].title, "c");
        assert_eq!(groups[1].category, "health");
    }

    #[test]
    fn cascade_with_identical_names_is_a_noop() {
        let mut store = TaskStore::with_tasks(vec![Task::new("a", "work")]);
        let before = store.tasks();

        assert_eq!(store.cascade_rename_category("work", "work"), 0);
        assert!(std::sync::Arc::ptr_eq(&before, &store.tasks()));
    }

    #[test]
    fn add_task_stores_trimmed_title() {
        let mut store = TaskStore::new();
        let id = store
            .add_task(NewTask::new("  write report  "), Some("work"))
            .unwrap();
        assert_eq!(store.task(id).unwrap().title, "write report");
    }
}
