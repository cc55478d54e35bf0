//! UI-facing `{success, error}` envelope.
//!
//! Store operations return typed `Result`s; callers that only need a flag
//! and a human-readable message convert them here.

use serde::Serialize;
use std::fmt::Display;

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable failure message; `None` on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for ActionOutcome {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
