//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the issue store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No issue data is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_from_config};

pub type DbResult<T> = Result<T, DbError>;

/// Engine-level failure underneath a store operation.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection schema is older than this binary expects.
    UninitializedSchema {
        expected_version: u32,
        actual_version: u32,
    },
    /// A previous holder of the session lock panicked mid-operation.
    SessionPoisoned,
    /// A persisted row does not decode into a valid record.
    InvalidData(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedSchema {
                expected_version,
                actual_version,
            } => write!(
                f,
                "database schema version {actual_version} is not migrated; expected {expected_version}"
            ),
            Self::SessionPoisoned => write!(f, "database session lock poisoned"),
            Self::InvalidData(message) => write!(f, "invalid persisted issue data: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::UninitializedSchema { .. }
            | Self::SessionPoisoned
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
