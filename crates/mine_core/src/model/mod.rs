//! Domain model for tracked items.
//!
//! # Responsibility
//! - Define the record shape persisted by the data store.
//! - Keep identity rules next to the type they protect.
//!
//! # Invariants
//! - Every item carries a stable string identifier.
//! - Deletion removes the row; there are no tombstones.

pub mod item;
