//! Search predicate composition.
//!
//! # Responsibility
//! - Turn `FilterSpec` criteria into one conjunctive `Predicate`.
//! - Render predicates as a single parameterised SQL clause.
//! - Evaluate predicates in memory for engine-free stores and tests.
//!
//! # Invariants
//! - Composition is pure and deterministic.
//! - Absent criteria produce no condition at all.
//! - Conditions are only ever joined with `AND`.

pub mod predicate;
