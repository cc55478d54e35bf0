//! Domain model for tasks and categories.
//!
//! # Responsibility
//! - Define canonical records held by the stores.
//! - Centralize name/title normalization shared by both stores.
//!
//! # Invariants
//! - Tasks reference categories by name; the stores keep that reference
//!   resolvable.

pub mod category;
pub mod naming;
pub mod task;
