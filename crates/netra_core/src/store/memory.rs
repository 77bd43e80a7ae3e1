//! In-process issue store.
//!
//! Evaluates the same composed `Predicate` as the SQLite adapter against a
//! vector kept in insertion order. Used for engine-free callers and tests.

use crate::db::DbError;
use crate::model::filter::FilterSpec;
use crate::model::issue::{IssueId, IssueRecord, NewIssue};
use crate::query::predicate::Predicate;
use crate::store::{is_blank_id, IssueStore, StoreError, StoreResult};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    issues: RwLock<Vec<IssueRecord>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read("counting issues failed")?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self, context: &'static str) -> StoreResult<RwLockReadGuard<'_, Vec<IssueRecord>>> {
        self.issues
            .read()
            .map_err(|_| StoreError::persistence(context, DbError::SessionPoisoned))
    }

    fn write(&self, context: &'static str) -> StoreResult<RwLockWriteGuard<'_, Vec<IssueRecord>>> {
        self.issues
            .write()
            .map_err(|_| StoreError::persistence(context, DbError::SessionPoisoned))
    }
}

impl IssueStore for MemoryIssueStore {
    fn create(&self, issue: &NewIssue) -> StoreResult<IssueId> {
        issue.validate()?;

        let id = Uuid::new_v4().to_string();
        let mut issues = self.write("insertion of issue failed")?;
        issues.push(issue.clone().into_record(id.clone()));
        Ok(id)
    }

    fn get_by_id(&self, id: &str) -> StoreResult<IssueRecord> {
        if is_blank_id(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.read("get issue by id failed")?
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn delete(&self, issue: &IssueRecord) -> StoreResult<()> {
        let mut issues = self.write("deletion of issue by id failed")?;
        let Some(position) = issues.iter().position(|stored| stored.id == issue.id) else {
            return Err(StoreError::NotFound(issue.id.clone()));
        };
        issues.remove(position);
        Ok(())
    }

    fn get_all(&self) -> StoreResult<Vec<IssueRecord>> {
        Ok(self.read("retrieval of issues failed")?.clone())
    }

    fn search(&self, spec: &FilterSpec) -> StoreResult<Vec<IssueRecord>> {
        let predicate = Predicate::compose(spec);
        Ok(self
            .read("search failed")?
            .iter()
            .filter(|issue| predicate.matches(issue))
            .cloned()
            .collect())
    }
}
