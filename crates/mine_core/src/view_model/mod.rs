//! View models binding item pages to the data store.
//!
//! # Responsibility
//! - Keep UI-observable state mirrored from the store.
//! - Turn page events into store calls and reconcile in-memory state.
//!
//! # See also
//! - `crate::events` for the page-facing event contract.

pub mod collection;
pub mod item_index;
