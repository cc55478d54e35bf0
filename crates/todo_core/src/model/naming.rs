//! Shared identifier and validation helpers.
//!
//! # Responsibility
//! - Own the single name normalization used by every category path.
//! - Provide title trimming and wall-clock helpers for task creation.
//!
//! # Invariants
//! - Uniqueness checks for add/update/select/seed all go through
//!   `normalize_name`.

use std::time::{SystemTime, UNIX_EPOCH};

/// Normalizes a category name for storage and comparison (trim + lower-case).
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns whether two category names are equal under normalization.
pub fn names_match(left: &str, right: &str) -> bool {
    normalize_name(left) == normalize_name(right)
}

/// Trims a task title, returning `None` when nothing is left.
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock reads before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{names_match, normalize_name, normalize_title, now_epoch_ms};

    #[test]
    fn normalize_name_trims_and_lowercases() {
        assert_eq!(normalize_name("  Work "), "work");
        assert_eq!(normalize_name("HEALTH"), "health");
    }

    #[test]
    fn names_match_ignores_case_and_padding() {
        assert!(names_match("Shopping", " shopping  "));
        assert!(!names_match("Shopping", "Shop"));
    }

    #[test]
    fn normalize_title_rejects_blank_input() {
        assert_eq!(normalize_title("   \t\n"), None);
        assert_eq!(normalize_title(" buy milk ").as_deref(), Some("buy milk"));
    }

    #[test]
    fn now_epoch_ms_is_after_2020() {
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }
}
