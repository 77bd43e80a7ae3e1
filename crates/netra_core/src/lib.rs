//! Persistence and search core for issue records.
//! Adapters depend on [`IssueStore`]; engine sessions stay inside store modules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use config::{ConfigError, DatabaseLocation, LoggingConfig, NetraConfig, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::FilterSpec;
pub use model::issue::{IssueId, IssueRecord, IssueValidationError, NewIssue};
pub use query::predicate::{Condition, Predicate, SqlFilter};
pub use service::issue_service::IssueService;
pub use store::memory::MemoryIssueStore;
pub use store::sqlite::SqliteIssueStore;
pub use store::{IssueStore, StoreError, StoreErrorKind, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
