//! Issue domain model and search criteria.
//!
//! # Responsibility
//! - Define the persisted issue shape and the creation input shape.
//! - Define optional search criteria consumed by the query layer.
//!
//! # Invariants
//! - Only the store assigns `IssueId` values; creation input has no id field.
//! - An absent search criterion never turns into a predicate.

pub mod filter;
pub mod issue;
