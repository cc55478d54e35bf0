//! In-memory observable stores.
//!
//! # Responsibility
//! - Hold authoritative task and category state for the process.
//! - Publish immutable snapshots to subscribers after each change.
//!
//! # Invariants
//! - Mutation flows one way: category store -> task store, never back.
//! - A cascade is fully applied before the triggering operation returns.

pub mod category_store;
pub mod observable;
pub mod task_store;
