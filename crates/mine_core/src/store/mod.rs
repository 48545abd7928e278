//! Data store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the async CRUD contract the view model depends on.
//! - Isolate SQLite query details from view-model orchestration.
//!
//! # Invariants
//! - Validation and not-found outcomes are values (`false` / `None`), never
//!   errors.
//! - `Err` is reserved for unexpected storage failures.

use crate::db::DbError;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod item_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Unexpected failure while talking to the backing database.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Generic async CRUD contract over one entity type.
#[async_trait]
pub trait DataStore<T>: Send + Sync {
    /// Persists a new entity. `Ok(true)` only if exactly one row was written.
    async fn create(&self, item: &T) -> StoreResult<bool>;

    /// Finds the entity with `id`, or `None` when absent or `id` is blank.
    async fn read(&self, id: &str) -> StoreResult<Option<T>>;

    /// Rewrites an existing entity. `Ok(true)` only if exactly one row changed.
    async fn update(&self, item: &T) -> StoreResult<bool>;

    /// Removes the entity with `id`. `Ok(false)` when it does not exist.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Returns every stored entity in unspecified order.
    ///
    /// `force_refresh` is accepted for callers that ask for fresh data; no
    /// implementation caches, so it has no effect.
    async fn list(&self, force_refresh: bool) -> StoreResult<Vec<T>>;
}
