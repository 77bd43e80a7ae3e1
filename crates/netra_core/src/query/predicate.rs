//! Conjunctive predicates over issue records.
//!
//! # Responsibility
//! - Fold present search criteria, in a fixed order, into a `Predicate`.
//! - Provide SQL rendering and in-memory evaluation with equal semantics.
//!
//! # Invariants
//! - Condition order is title, description, priority min, priority max.
//! - An unconstrained predicate renders no `WHERE` clause.
//! - Substring checks are case-sensitive in both renderings.

use crate::model::filter::FilterSpec;
use crate::model::issue::IssueRecord;
use rusqlite::types::Value;

/// A single filter condition evaluable by a backing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `title` contains the given non-empty substring.
    TitleContains(String),
    /// `description` contains the given non-empty substring.
    DescriptionContains(String),
    /// `priority >= bound`.
    PriorityAtLeast(u32),
    /// `priority <= bound`.
    PriorityAtMost(u32),
}

impl Condition {
    /// Evaluates this condition against one record.
    pub fn matches(&self, issue: &IssueRecord) -> bool {
        match self {
            Self::TitleContains(needle) => issue.title.contains(needle.as_str()),
            Self::DescriptionContains(needle) => issue.description.contains(needle.as_str()),
            Self::PriorityAtLeast(bound) => issue.priority >= *bound,
            Self::PriorityAtMost(bound) => issue.priority <= *bound,
        }
    }

    fn sql_fragment(&self) -> (&'static str, Value) {
        match self {
            Self::TitleContains(needle) => ("instr(title, ?) > 0", Value::Text(needle.clone())),
            Self::DescriptionContains(needle) => (
                "instr(description, ?) > 0",
                Value::Text(needle.clone()),
            ),
            Self::PriorityAtLeast(bound) => ("priority >= ?", Value::Integer(i64::from(*bound))),
            Self::PriorityAtMost(bound) => ("priority <= ?", Value::Integer(i64::from(*bound))),
        }
    }
}

/// Rendered SQL filter: a `WHERE` clause (possibly empty) plus bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    pub clause: String,
    pub params: Vec<Value>,
}

/// Conjunction of zero or more conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// Predicate with no conditions; matches every record.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Composes the conjunction of all present criteria in `spec`.
    pub fn compose(spec: &FilterSpec) -> Self {
        let candidates = [
            spec.title_needle()
                .map(|needle| Condition::TitleContains(needle.to_string())),
            spec.description_needle()
                .map(|needle| Condition::DescriptionContains(needle.to_string())),
            spec.priority_min.map(Condition::PriorityAtLeast),
            spec.priority_max.map(Condition::PriorityAtMost),
        ];

        candidates
            .into_iter()
            .flatten()
            .fold(Self::unconstrained(), Self::and)
    }

    /// Appends one condition to the conjunction.
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_unconstrained(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns whether every condition holds for `issue`.
    pub fn matches(&self, issue: &IssueRecord) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(issue))
    }

    /// Renders this predicate as ` WHERE a AND b ...` with positional binds.
    pub fn to_sql(&self) -> SqlFilter {
        if self.conditions.is_empty() {
            return SqlFilter {
                clause: String::new(),
                params: Vec::new(),
            };
        }

        let (fragments, params): (Vec<&'static str>, Vec<Value>) = self
            .conditions
            .iter()
            .map(Condition::sql_fragment)
            .unzip();

        SqlFilter {
            clause: format!(" WHERE {}", fragments.join(" AND ")),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Condition, Predicate};
    use crate::model::filter::FilterSpec;
    use crate::model::issue::IssueRecord;
    use rusqlite::types::Value;

    fn record(title: &str, description: &str, priority: u32) -> IssueRecord {
        IssueRecord {
            id: format!("id-{title}"),
            title: title.to_string(),
            description: description.to_string(),
            priority,
        }
    }

    #[test]
    fn empty_spec_composes_to_unconstrained_predicate() {
        let predicate = Predicate::compose(&FilterSpec::default());
        assert!(predicate.is_unconstrained());

        let sql = predicate.to_sql();
        assert!(sql.clause.is_empty());
        assert!(sql.params.is_empty());
    }

    #[test]
    fn conditions_follow_fixed_order() {
        let spec = FilterSpec::new()
            .priority_max(9)
            .priority_min(2)
            .description_contains("disk")
            .title_contains("Crash");

        assert_eq!(
            Predicate::compose(&spec).conditions(),
            &[
                Condition::TitleContains("Crash".to_string()),
                Condition::DescriptionContains("disk".to_string()),
                Condition::PriorityAtLeast(2),
                Condition::PriorityAtMost(9),
            ]
        );
    }

    #[test]
    fn absent_criteria_add_no_condition() {
        let spec = FilterSpec::from_raw("", "", 3, -1);
        assert_eq!(
            Predicate::compose(&spec).conditions(),
            &[Condition::PriorityAtLeast(3)]
        );
    }

    #[test]
    fn sql_rendering_is_a_single_conjunction() {
        let spec = FilterSpec::new().title_contains("Crash").priority_min(3);
        let sql = Predicate::compose(&spec).to_sql();

        assert_eq!(sql.clause, " WHERE instr(title, ?) > 0 AND priority >= ?");
        assert!(!sql.clause.contains(" OR "));
        assert_eq!(
            sql.params,
            vec![Value::Text("Crash".to_string()), Value::Integer(3)]
        );
    }

    #[test]
    fn in_memory_evaluation_is_a_conjunction() {
        let spec = FilterSpec::new().title_contains("Crash").priority_min(3);
        let predicate = Predicate::compose(&spec);

        assert!(predicate.matches(&record("Crash on load", "", 5)));
        assert!(!predicate.matches(&record("Crash on save", "", 1)));
        assert!(!predicate.matches(&record("UI glitch", "", 3)));
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let predicate = Predicate::compose(&FilterSpec::new().title_contains("crash"));
        assert!(!predicate.matches(&record("Crash on save", "", 1)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let predicate = Predicate::compose(&FilterSpec::new().priority_min(3).priority_max(3));
        assert!(predicate.matches(&record("a", "", 3)));
        assert!(!predicate.matches(&record("b", "", 2)));
        assert!(!predicate.matches(&record("c", "", 4)));
    }
}
