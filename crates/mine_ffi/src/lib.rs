//! Flutter bridge surface for the Mine item core.

pub mod api;
