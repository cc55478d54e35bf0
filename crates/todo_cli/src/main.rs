//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todo_core` linkage without any UI runtime.
//! - Run a fixed script against the default board and print the grouped
//!   view, so output stays deterministic apart from generated ids.

use std::process::ExitCode;
use todo_core::{ActionOutcome, Board, CategoryPatch, NewCategory, NewTask};

fn main() -> ExitCode {
    println!("todo_core version={}", todo_core::core_version());

    if let Some(log_dir) = std::env::args().nth(1) {
        if let Err(err) = todo_core::init_logging(todo_core::default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut board = match Board::with_defaults() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("failed to build board: {err}");
            return ExitCode::FAILURE;
        }
    };

    let script = [
        NewTask::new("Finish quarterly report"),
        NewTask::new("Buy groceries").in_category("Shopping"),
        NewTask::new("Morning run").in_category("Health"),
    ];
    for input in script {
        let title = input.title.clone();
        if let Err(err) = board.add_task(input) {
            eprintln!("add task failed: title={title} error={err}");
        }
    }

    let duplicate =
        ActionOutcome::from(board.add_category(NewCategory::new("work", "#000000", 4)));
    println!(
        "add duplicate category: success={} error={}",
        duplicate.success,
        duplicate.error.unwrap_or_default()
    );

    if let Some(work) = board.find_category("Work") {
        let renamed = ActionOutcome::from(
            board.update_category(work.id, CategoryPatch::rename("Office")),
        );
        println!("rename Work -> office: success={}", renamed.success);
    }
    if let Some(shopping) = board.find_category("Shopping") {
        let deleted = ActionOutcome::from(board.delete_category(shopping.id));
        println!("delete Shopping: success={}", deleted.success);
    }

    println!("selected={}", board.selected().unwrap_or_default());
    for group in board.tasks_by_category() {
        println!("[{}]", group.category);
        for task in group.tasks {
            let mark = if task.completed { "x" } else { " " };
            println!("  [{mark}] {}", task.title);
        }
    }

    ExitCode::SUCCESS
}
