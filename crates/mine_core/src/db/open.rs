//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections with configured flags.
//! - Configure connection pragmas required by the item store.
//!
//! # Invariants
//! - Returned connections have a busy timeout set.
//! - Schema migrations are NOT applied here; `DbHandle` applies them lazily,
//!   and the eager helpers below call `apply_migrations` explicitly.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::DatabaseConfig;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let mut conn = open_db_with_config(&DatabaseConfig::new(path.as_ref()))?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let mut conn = open_raw("memory", Connection::open_in_memory)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

/// Opens the configured database file without touching its schema.
///
/// # Side effects
/// - Creates the file when `config.flags` contain `SQLITE_OPEN_CREATE`.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_with_config(config: &DatabaseConfig) -> DbResult<Connection> {
    open_raw("file", || {
        Connection::open_with_flags(&config.path, config.flags)
    })
}

pub(super) fn open_raw(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = open()
        .and_then(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(conn)
        })
        .map_err(|err| {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;

    info!(
        "event=db_open module=db status=ok mode={} duration_ms={}",
        mode,
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}
