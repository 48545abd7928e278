//! Core item-tracking logic for Mine.
//! This crate owns the item store and the view model pages bind to.

pub mod config;
pub mod db;
pub mod events;
pub mod logging;
pub mod model;
pub mod store;
pub mod view_model;

pub use config::{default_log_level, ConfigError, CoreConfig, DatabaseConfig, LoggingConfig};
pub use db::{DbError, DbHandle};
pub use events::{ItemEvent, ItemEventBus};
pub use logging::{init_logging, init_logging_with, logging_status};
pub use model::item::{Item, ItemId, ItemValidationError};
pub use store::item_store::SqliteItemStore;
pub use store::{DataStore, StoreError, StoreResult};
pub use view_model::collection::ObservableCollection;
pub use view_model::item_index::{ItemIndexViewModel, LoadOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
