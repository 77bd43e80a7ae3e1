//! Issue domain model.
//!
//! # Responsibility
//! - Define the canonical issue record returned by stores.
//! - Define the creation input and its validation rules.
//!
//! # Invariants
//! - A persisted `IssueRecord` always carries a non-empty `id`.
//! - `NewIssue` has no identifier; the store is the single id authority.
//! - `title` must contain at least one non-whitespace character.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque identifier assigned by a store on creation.
///
/// Treated as a string-comparable token; callers must not parse it.
pub type IssueId = String;

/// Validation errors for issue creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueValidationError {
    /// Title is empty or whitespace only.
    EmptyTitle,
}

impl Display for IssueValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "issue title must not be empty"),
        }
    }
}

impl Error for IssueValidationError {}

/// Creation input for a new issue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: u32,
}

impl NewIssue {
    /// Creates input with empty description and priority 0.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Validates creation input.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank.
    pub fn validate(&self) -> Result<(), IssueValidationError> {
        if self.title.trim().is_empty() {
            return Err(IssueValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Binds this input to a store-assigned identifier.
    pub(crate) fn into_record(self, id: IssueId) -> IssueRecord {
        IssueRecord {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
        }
    }
}

/// A persisted issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Store-assigned identifier, immutable once persisted.
    pub id: IssueId,
    pub title: String,
    pub description: String,
    pub priority: u32,
}

#[cfg(test)]
mod tests {
    use super::{IssueValidationError, NewIssue};

    #[test]
    fn new_issue_defaults_description_and_priority() {
        let issue = NewIssue::new("Crash on save");
        assert_eq!(issue.description, "");
        assert_eq!(issue.priority, 0);
        assert!(issue.validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(
            NewIssue::new("").validate(),
            Err(IssueValidationError::EmptyTitle)
        );
        assert_eq!(
            NewIssue::new("  \t").validate(),
            Err(IssueValidationError::EmptyTitle)
        );
    }

    #[test]
    fn into_record_keeps_fields() {
        let record = NewIssue::new("UI glitch")
            .with_description("button overlaps")
            .with_priority(3)
            .into_record("abc".to_string());
        assert_eq!(record.id, "abc");
        assert_eq!(record.title, "UI glitch");
        assert_eq!(record.description, "button overlaps");
        assert_eq!(record.priority, 3);
    }
}
