//! Issue store contract and its implementations.
//!
//! # Responsibility
//! - Define the narrow `IssueStore` capability set used by adapters.
//! - Translate engine failures into the store error taxonomy.
//!
//! # Invariants
//! - Callers depend on `IssueStore`, never on the engine session type.
//! - Every engine failure keeps its original cause reachable via `source()`.
//! - No operation retries internally.

pub mod memory;
pub mod sqlite;

use crate::db::DbError;
use crate::model::filter::FilterSpec;
use crate::model::issue::{IssueId, IssueRecord, IssueValidationError, NewIssue};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse error class, for adapters mapping failures to transport statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Validation,
    NotFound,
    Persistence,
}

/// Store operation failure.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected before any engine call.
    Validation(IssueValidationError),
    /// No record with this id exists (includes empty ids).
    NotFound(IssueId),
    /// The engine failed to complete the operation.
    Persistence {
        context: &'static str,
        cause: DbError,
    },
}

impl StoreError {
    pub(crate) fn persistence(context: &'static str, cause: impl Into<DbError>) -> Self {
        Self::Persistence {
            context,
            cause: cause.into(),
        }
    }

    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Validation(_) => StoreErrorKind::Validation,
            Self::NotFound(_) => StoreErrorKind::NotFound,
            Self::Persistence { .. } => StoreErrorKind::Persistence,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "issue not found: `{id}`"),
            Self::Persistence { context, cause } => write!(f, "{context}: {cause}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence { cause, .. } => Some(cause),
        }
    }
}

impl From<IssueValidationError> for StoreError {
    fn from(value: IssueValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Durable create/read/delete/search over issue records.
pub trait IssueStore: Send + Sync {
    /// Validates and inserts `issue`, returning the store-assigned id.
    fn create(&self, issue: &NewIssue) -> StoreResult<IssueId>;
    /// Looks up one record; empty or unknown ids yield `NotFound`.
    fn get_by_id(&self, id: &str) -> StoreResult<IssueRecord>;
    /// Deletes the record with `issue.id`; an absent record yields `NotFound`.
    fn delete(&self, issue: &IssueRecord) -> StoreResult<()>;
    /// Returns every record in stable engine order.
    fn get_all(&self) -> StoreResult<Vec<IssueRecord>>;
    /// Returns records matching the conjunction of present criteria.
    fn search(&self, spec: &FilterSpec) -> StoreResult<Vec<IssueRecord>>;
}

impl<S: IssueStore + ?Sized> IssueStore for Arc<S> {
    fn create(&self, issue: &NewIssue) -> StoreResult<IssueId> {
        (**self).create(issue)
    }

    fn get_by_id(&self, id: &str) -> StoreResult<IssueRecord> {
        (**self).get_by_id(id)
    }

    fn delete(&self, issue: &IssueRecord) -> StoreResult<()> {
        (**self).delete(issue)
    }

    fn get_all(&self) -> StoreResult<Vec<IssueRecord>> {
        (**self).get_all()
    }

    fn search(&self, spec: &FilterSpec) -> StoreResult<Vec<IssueRecord>> {
        (**self).search(spec)
    }
}

pub(crate) fn is_blank_id(id: &str) -> bool {
    id.trim().is_empty()
}
