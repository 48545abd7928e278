//! Shared connection handle with lazy one-time schema setup.
//!
//! # Responsibility
//! - Own the single SQLite connection used by every store instance.
//! - Run schema migrations on first use, exactly once per handle.
//!
//! # Invariants
//! - Clones share one connection and one schema-ready flag.
//! - The schema flag is only set after migrations succeeded; a failed
//!   attempt is retried by the next caller.
//! - Callers are serialized by the connection mutex.

use super::migrations::apply_migrations;
use super::open::{open_db_with_config, open_raw};
use super::DbResult;
use crate::config::DatabaseConfig;
use log::debug;
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Cloneable handle to the item database.
#[derive(Clone)]
pub struct DbHandle {
    inner: Arc<DbInner>,
}

struct DbInner {
    conn: Mutex<Connection>,
    schema_ready: OnceCell<()>,
}

impl DbHandle {
    /// Opens the configured database file. Schema setup is deferred to the
    /// first [`DbHandle::connection`] call.
    pub fn open(config: &DatabaseConfig) -> DbResult<Self> {
        Ok(Self::from_connection(open_db_with_config(config)?))
    }

    /// Opens a private in-memory database, mainly for tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_raw(
            "memory",
            Connection::open_in_memory,
        )?))
    }

    /// Wraps an already opened connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            inner: Arc::new(DbInner {
                conn: Mutex::new(conn),
                schema_ready: OnceCell::new(),
            }),
        }
    }

    /// Locks the connection, applying pending migrations on first use.
    pub async fn connection(&self) -> DbResult<MutexGuard<'_, Connection>> {
        let mut conn = self.inner.conn.lock().await;
        self.inner.schema_ready.get_or_try_init(|| {
            debug!("event=schema_init module=db status=start");
            apply_migrations(&mut conn)
        })?;
        Ok(conn)
    }

    /// Returns whether schema setup already ran on this handle.
    pub fn is_schema_ready(&self) -> bool {
        self.inner.schema_ready.get().is_some()
    }
}
