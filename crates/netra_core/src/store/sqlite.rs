//! SQLite-backed issue store.
//!
//! # Responsibility
//! - Implement `IssueStore` over the `issues` table.
//! - Run every search as one composed statement so the engine can plan it.
//!
//! # Invariants
//! - The connection is only reachable through this adapter.
//! - Identifiers are generated here, never accepted from callers.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::config::StoreConfig;
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_from_config, DbError, DbResult};
use crate::model::filter::FilterSpec;
use crate::model::issue::{IssueId, IssueRecord, NewIssue};
use crate::query::predicate::Predicate;
use crate::store::{is_blank_id, IssueStore, StoreError, StoreResult};
use rusqlite::{params, params_from_iter, Connection, InterruptHandle, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

const ISSUE_SELECT_SQL: &str = "SELECT id, title, description, priority FROM issues";

/// Issue store holding one long-lived SQLite session.
///
/// All operations share the session through a mutex, so a long statement
/// makes concurrent callers wait for the lock. `interrupt_handle` aborts only
/// the running statement; a caller still waiting on the lock cannot time out.
/// Use one store per connection when callers need independent progress.
pub struct SqliteIssueStore {
    conn: Mutex<Connection>,
    interrupt: Arc<InterruptHandle>,
}

impl SqliteIssueStore {
    /// Wraps a connection that already has the latest schema applied.
    ///
    /// # Errors
    /// - `Persistence` when the schema version differs from this binary's
    ///   latest migration or the `issues` table is missing.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_schema_ready(&conn)
            .map_err(|cause| StoreError::persistence("issue store is not ready", cause))?;
        let interrupt = Arc::new(conn.get_interrupt_handle());
        Ok(Self {
            conn: Mutex::new(conn),
            interrupt,
        })
    }

    /// Opens, migrates and wraps the database described by `config`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let conn = open_from_config(config)
            .map_err(|cause| StoreError::persistence("opening issue database failed", cause))?;
        Self::try_new(conn)
    }

    /// Handle that aborts the statement currently running on this store.
    ///
    /// An aborted operation fails with `StoreError::Persistence`.
    pub fn interrupt_handle(&self) -> Arc<InterruptHandle> {
        Arc::clone(&self.interrupt)
    }

    fn with_session<T>(
        &self,
        context: &'static str,
        op: impl FnOnce(&Connection) -> DbResult<T>,
    ) -> StoreResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::persistence(context, DbError::SessionPoisoned))?;
        op(&*conn).map_err(|cause| StoreError::persistence(context, cause))
    }

    fn select(&self, predicate: &Predicate, context: &'static str) -> StoreResult<Vec<IssueRecord>> {
        let filter = predicate.to_sql();
        let sql = format!("{ISSUE_SELECT_SQL}{} ORDER BY rowid ASC;", filter.clause);

        self.with_session(context, |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(filter.params))?;
            let mut issues = Vec::new();
            while let Some(row) = rows.next()? {
                issues.push(parse_issue_row(row)?);
            }
            Ok(issues)
        })
    }
}

impl IssueStore for SqliteIssueStore {
    fn create(&self, issue: &NewIssue) -> StoreResult<IssueId> {
        issue.validate()?;

        let id = Uuid::new_v4().to_string();
        self.with_session("insertion of issue failed", |conn| {
            conn.execute(
                "INSERT INTO issues (id, title, description, priority)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    id.as_str(),
                    issue.title.as_str(),
                    issue.description.as_str(),
                    i64::from(issue.priority),
                ],
            )?;
            Ok(())
        })?;

        Ok(id)
    }

    fn get_by_id(&self, id: &str) -> StoreResult<IssueRecord> {
        if is_blank_id(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let found = self.with_session("get issue by id failed", |conn| {
            let mut stmt = conn.prepare(&format!("{ISSUE_SELECT_SQL} WHERE id = ?1;"))?;
            let row = stmt
                .query_row([id], |row| Ok(parse_issue_row(row)))
                .optional()?;
            row.transpose()
        })?;

        found.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn delete(&self, issue: &IssueRecord) -> StoreResult<()> {
        if is_blank_id(&issue.id) {
            return Err(StoreError::NotFound(issue.id.clone()));
        }

        let changed = self.with_session("deletion of issue by id failed", |conn| {
            Ok(conn.execute("DELETE FROM issues WHERE id = ?1;", [issue.id.as_str()])?)
        })?;

        if changed == 0 {
            return Err(StoreError::NotFound(issue.id.clone()));
        }
        Ok(())
    }

    fn get_all(&self) -> StoreResult<Vec<IssueRecord>> {
        self.select(&Predicate::unconstrained(), "retrieval of issues failed")
    }

    fn search(&self, spec: &FilterSpec) -> StoreResult<Vec<IssueRecord>> {
        self.select(&Predicate::compose(spec), "search failed")
    }
}

fn ensure_schema_ready(conn: &Connection) -> DbResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version > expected_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: actual_version,
            latest_supported: expected_version,
        });
    }
    if actual_version < expected_version {
        return Err(DbError::UninitializedSchema {
            expected_version,
            actual_version,
        });
    }

    let has_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'issues');",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Err(DbError::InvalidData(
            "missing required table `issues`".to_string(),
        ));
    }
    Ok(())
}

fn parse_issue_row(row: &Row<'_>) -> DbResult<IssueRecord> {
    let id: String = row.get("id")?;
    if is_blank_id(&id) {
        return Err(DbError::InvalidData("empty id in issues.id".to_string()));
    }

    let raw_priority: i64 = row.get("priority")?;
    let priority = u32::try_from(raw_priority).map_err(|_| {
        DbError::InvalidData(format!(
            "invalid priority `{raw_priority}` in issues.priority for `{id}`"
        ))
    })?;

    Ok(IssueRecord {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        priority,
    })
}
