//! Core use-case services.
//!
//! # Responsibility
//! - Compose the stores into entry points for UI callers.
//! - Keep callers decoupled from how the stores are shared.

pub mod board;
