use std::cell::RefCell;
use std::rc::Rc;
use todo_core::{
    normalize_name, ActionOutcome, Category, CategoryPatch, CategoryStore, CategoryStoreError,
    NewCategory, NewTask, Task, TaskStore,
};

fn store_with(
    names: &[&str],
    tasks: Vec<Task>,
) -> (Rc<RefCell<TaskStore>>, CategoryStore<Rc<RefCell<TaskStore>>>) {
    let task_store = Rc::new(RefCell::new(TaskStore::with_tasks(tasks)));
    let categories = names
        .iter()
        .zip(0_u32..)
        .map(|(name, index)| Category::new(*name, "#FFFFFF", index))
        .collect();
    let store = CategoryStore::new(
        categories,
        names.first().map(|name| name.to_string()),
        Rc::clone(&task_store),
    )
    .unwrap();
    (task_store, store)
}

fn categories_of(tasks: &TaskStore) -> Vec<String> {
    tasks.tasks().iter().map(|task| task.category.clone()).collect()
}

#[test]
fn add_category_normalizes_and_appends() {
    let (_, mut store) = store_with(&["Work", "Health"], Vec::new());

    let id = store
        .add_category(NewCategory::new("  Garden Chores ", "#123456", 2))
        .unwrap();

    let categories = store.categories();
    assert_eq!(categories.len(), 3);
    let added = categories.last().unwrap();
    assert_eq!(added.id, id);
    assert_eq!(added.name, normalize_name("  Garden Chores "));
    assert_eq!(added.name, "garden chores");
    assert_eq!(added.color, "#123456");
}

#[test]
fn add_category_ids_are_unique() {
    let (_, mut store) = store_with(&["Work"], Vec::new());
    let first = store.add_category(NewCategory::new("a", "", 1)).unwrap();
    let second = store.add_category(NewCategory::new("b", "", 2)).unwrap();
    assert_ne!(first, second);
    assert!(store.categories().iter().filter(|c| c.id == first).count() == 1);
}

#[test]
fn add_duplicate_category_fails_and_leaves_collection_unchanged() {
    let (_, mut store) = store_with(&["Work", "Health"], Vec::new());
    let before = store.categories();

    for candidate in ["work", " WORK ", "Health"] {
        let err = store
            .add_category(NewCategory::new(candidate, "#000000", 9))
            .unwrap_err();
        assert!(matches!(err, CategoryStoreError::DuplicateName(_)));
    }

    assert_eq!(*store.categories(), *before);
    let outcome = ActionOutcome::from(store.add_category(NewCategory::new("work", "", 0)));
    assert_eq!(
        outcome,
        ActionOutcome::failure("This category already exists")
    );
}

#[test]
fn rename_to_other_category_name_fails() {
    let (_, mut store) = store_with(&["Work", "Health"], Vec::new());
    let work = store.find_by_name("Work").unwrap().id;

    let err = store
        .update_category(work, CategoryPatch::rename(" health"))
        .unwrap_err();

    assert_eq!(err, CategoryStoreError::DuplicateName("health".to_string()));
    assert_eq!(store.category(work).unwrap().name, "Work");
}

#[test]
fn rename_to_own_name_is_allowed() {
    let (tasks, mut store) = store_with(&["work", "health"], vec![Task::new("a", "work")]);
    let work = store.find_by_name("work").unwrap().id;

    store
        .update_category(work, CategoryPatch::rename(" Work "))
        .unwrap();

    assert_eq!(store.category(work).unwrap().name, "work");
    assert_eq!(categories_of(&tasks.borrow()), vec!["work"]);
}

#[test]
fn update_unknown_category_fails_with_not_found() {
    let (_, mut store) = store_with(&["Work"], Vec::new());
    let missing = uuid::Uuid::new_v4();
    let err = store
        .update_category(missing, CategoryPatch::rename("x"))
        .unwrap_err();
    assert_eq!(err, CategoryStoreError::NotFound(missing));
    assert_eq!(err.to_string(), "Category not found");
}

#[test]
fn rename_cascades_into_tasks_and_selection() {
    let (tasks, mut store) = store_with(
        &["Work", "Health"],
        vec![
            Task::new("report", "Work"),
            Task::new("run", "Health"),
            Task::new("email", "Work"),
        ],
    );
    let work = store.find_by_name("Work").unwrap().id;
    assert_eq!(store.selected(), Some("Work"));

    store
        .update_category(work, CategoryPatch::rename("Office"))
        .unwrap();

    assert_eq!(store.category(work).unwrap().name, "office");
    assert_eq!(store.selected(), Some("office"));
    let names = categories_of(&tasks.borrow());
    assert_eq!(names, vec!["office", "Health", "office"]);
    assert!(!names.iter().any(|name| name == "Work"));
}

#[test]
fn patch_without_name_updates_display_fields_only() {
    let (tasks, mut store) = store_with(&["Work"], vec![Task::new("a", "Work")]);
    let work = store.find_by_name("Work").unwrap().id;

    store
        .update_category(
            work,
            CategoryPatch {
                color: Some("#ABCDEF".to_string()),
                index: Some(7),
                ..CategoryPatch::default()
            },
        )
        .unwrap();

    let category = store.category(work).unwrap();
    assert_eq!(category.name, "Work");
    assert_eq!(category.color, "#ABCDEF");
    assert_eq!(category.index, 7);
    assert_eq!(categories_of(&tasks.borrow()), vec!["Work"]);
}

#[test]
fn delete_reassigns_tasks_to_first_remaining_category() {
    let (tasks, mut store) = store_with(
        &["Work", "Shopping", "Health"],
        vec![
            Task::new("milk", "Shopping"),
            Task::new("report", "Work"),
            Task::new("eggs", "Shopping"),
        ],
    );
    store.select_category("shopping").unwrap();
    let shopping = store.find_by_name("Shopping").unwrap().id;

    store.delete_category(shopping).unwrap();

    let names = store
        .categories()
        .iter()
        .map(|category| category.name.clone())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Work", "Health"]);
    assert_eq!(categories_of(&tasks.borrow()), vec!["Work", "Work", "Work"]);
    assert_eq!(store.selected(), Some("Work"));
}

#[test]
fn delete_first_category_falls_back_to_new_head() {
    let (tasks, mut store) = store_with(
        &["Work", "Health"],
        vec![Task::new("report", "Work")],
    );
    let work = store.find_by_name("Work").unwrap().id;

    store.delete_category(work).unwrap();

    assert_eq!(categories_of(&tasks.borrow()), vec!["Health"]);
    assert_eq!(store.selected(), Some("Health"));
}

#[test]
fn delete_keeps_unrelated_selection() {
    let (_, mut store) = store_with(&["Work", "Shopping", "Health"], Vec::new());
    store.select_category("Health").unwrap();
    let shopping = store.find_by_name("Shopping").unwrap().id;

    store.delete_category(shopping).unwrap();

    assert_eq!(store.selected(), Some("Health"));
}

#[test]
fn delete_last_category_is_rejected() {
    let (tasks, mut store) = store_with(&["Work"], vec![Task::new("report", "Work")]);
    let work = store.find_by_name("Work").unwrap().id;
    let before = store.categories();

    let err = store.delete_category(work).unwrap_err();

    assert_eq!(err, CategoryStoreError::LastCategory);
    assert_eq!(err.to_string(), "You must have at least one category");
    assert_eq!(*store.categories(), *before);
    assert_eq!(categories_of(&tasks.borrow()), vec!["Work"]);
}

#[test]
fn last_category_check_precedes_not_found() {
    let (_, mut store) = store_with(&["Work"], Vec::new());
    let err = store.delete_category(uuid::Uuid::new_v4()).unwrap_err();
    assert_eq!(err, CategoryStoreError::LastCategory);
}

#[test]
fn delete_unknown_category_fails_with_not_found() {
    let (_, mut store) = store_with(&["Work", "Health"], Vec::new());
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        store.delete_category(missing).unwrap_err(),
        CategoryStoreError::NotFound(missing)
    );
    assert_eq!(store.len(), 2);
}

#[test]
fn select_category_resolves_normalized_name() {
    let (_, mut store) = store_with(&["Work", "Health"], Vec::new());

    store.select_category("  HEALTH").unwrap();
    assert_eq!(store.selected(), Some("Health"));

    let err = store.select_category("Errands").unwrap_err();
    assert_eq!(
        err,
        CategoryStoreError::UnknownCategoryName("Errands".to_string())
    );
    assert_eq!(store.selected(), Some("Health"));

    store.clear_selection();
    assert_eq!(store.selected(), None);
}

#[test]
fn category_store_works_with_borrowed_task_store() {
    let mut tasks = TaskStore::new();
    tasks
        .add_task(NewTask::new("report"), Some("Work"))
        .unwrap();
    {
        let mut store = CategoryStore::new(
            vec![Category::new("Work", "", 0), Category::new("Home", "", 1)],
            None,
            &mut tasks,
        )
        .unwrap();
        let work = store.find_by_name("work").unwrap().id;
        store
            .update_category(work, CategoryPatch::rename("Desk"))
            .unwrap();
        assert_eq!(store.selected(), None);
    }
    assert_eq!(categories_of(&tasks), vec!["desk"]);
}
