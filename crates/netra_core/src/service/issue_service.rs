//! Issue use-case service.
//!
//! # Responsibility
//! - Provide adapter-facing entry points over any `IssueStore`.
//! - Emit one metadata-only log event per operation.
//!
//! # Invariants
//! - Store errors are returned unchanged in kind.
//! - Titles and descriptions are never written to logs.

use crate::model::filter::FilterSpec;
use crate::model::issue::{IssueId, IssueRecord, NewIssue};
use crate::store::{IssueStore, StoreError, StoreResult};
use log::{info, warn};
use std::time::Instant;

/// Use-case wrapper for issue operations.
pub struct IssueService<S: IssueStore> {
    store: S,
}

impl<S: IssueStore> IssueService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(&self, issue: &NewIssue) -> StoreResult<IssueId> {
        let started_at = Instant::now();
        let result = self.store.create(issue);
        match &result {
            Ok(id) => info!(
                "event=issue_create module=service status=ok duration_ms={} id={id}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("issue_create", started_at, err),
        }
        result
    }

    pub fn get(&self, id: &str) -> StoreResult<IssueRecord> {
        let started_at = Instant::now();
        let result = self.store.get_by_id(id);
        match &result {
            Ok(_) => info!(
                "event=issue_get module=service status=ok duration_ms={} id={id}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("issue_get", started_at, err),
        }
        result
    }

    /// Deletes an already looked-up record.
    pub fn delete(&self, issue: &IssueRecord) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.store.delete(issue);
        match &result {
            Ok(()) => info!(
                "event=issue_delete module=service status=ok duration_ms={} id={}",
                started_at.elapsed().as_millis(),
                issue.id
            ),
            Err(err) => log_failure("issue_delete", started_at, err),
        }
        result
    }

    /// Looks the record up, then deletes it. Returns the deleted record.
    ///
    /// An unknown id fails at the lookup with `NotFound`.
    pub fn delete_by_id(&self, id: &str) -> StoreResult<IssueRecord> {
        let issue = self.get(id)?;
        self.delete(&issue)?;
        Ok(issue)
    }

    pub fn list(&self) -> StoreResult<Vec<IssueRecord>> {
        let started_at = Instant::now();
        let result = self.store.get_all();
        match &result {
            Ok(issues) => info!(
                "event=issue_list module=service status=ok duration_ms={} count={}",
                started_at.elapsed().as_millis(),
                issues.len()
            ),
            Err(err) => log_failure("issue_list", started_at, err),
        }
        result
    }

    pub fn search(&self, spec: &FilterSpec) -> StoreResult<Vec<IssueRecord>> {
        let started_at = Instant::now();
        let result = self.store.search(spec);
        match &result {
            Ok(issues) => info!(
                "event=issue_search module=service status=ok duration_ms={} criteria={} count={}",
                started_at.elapsed().as_millis(),
                criteria_count(spec),
                issues.len()
            ),
            Err(err) => log_failure("issue_search", started_at, err),
        }
        result
    }
}

fn criteria_count(spec: &FilterSpec) -> usize {
    [
        spec.title_needle().is_some(),
        spec.description_needle().is_some(),
        spec.priority_min.is_some(),
        spec.priority_max.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count()
}

fn log_failure(event: &str, started_at: Instant, err: &StoreError) {
    // Error text may echo ids but never record content.
    warn!(
        "event={event} module=service status=error duration_ms={} error_kind={:?} error={}",
        started_at.elapsed().as_millis(),
        err.kind(),
        err
    );
}
