//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and lock wait timeout.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Lock waits are bounded by the configured busy timeout.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::{DatabaseLocation, StoreConfig, DEFAULT_BUSY_TIMEOUT_MS};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with(
        "file",
        || Connection::open(path),
        Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
    )
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(
        "memory",
        Connection::open_in_memory,
        Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
    )
}

/// Opens the database described by `config`.
pub fn open_from_config(config: &StoreConfig) -> DbResult<Connection> {
    let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
    match &config.database {
        DatabaseLocation::File { path } => {
            open_with("file", || Connection::open(path), busy_timeout)
        }
        DatabaseLocation::Memory => open_with("memory", Connection::open_in_memory, busy_timeout),
    }
}

fn open_with<F>(mode: &str, opener: F, busy_timeout: Duration) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match opener() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, busy_timeout) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.busy_timeout(busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}
