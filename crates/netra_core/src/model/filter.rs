//! Search criteria for issue lookup.
//!
//! # Responsibility
//! - Carry the four optional search criteria from an adapter to a store.
//! - Normalize "not supplied" inputs to a single absent representation.
//!
//! # Invariants
//! - `None` is the only unbounded sentinel for priority bounds.
//! - An empty substring is equivalent to an absent one.

use serde::{Deserialize, Serialize};

/// Optional search criteria. Every field is absent by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Substring that must appear in `title`.
    pub title_contains: Option<String>,
    /// Substring that must appear in `description`.
    pub description_contains: Option<String>,
    /// Inclusive lower bound on `priority`.
    pub priority_min: Option<u32>,
    /// Inclusive upper bound on `priority`.
    pub priority_max: Option<u32>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds criteria from the legacy query-string convention.
    ///
    /// Empty text means "no substring filter" and any negative bound means
    /// "unbounded on this side".
    pub fn from_raw(title: &str, description: &str, priority_low: i64, priority_high: i64) -> Self {
        Self {
            title_contains: non_empty(title),
            description_contains: non_empty(description),
            priority_min: raw_bound(priority_low),
            priority_max: raw_bound(priority_high),
        }
    }

    pub fn title_contains(mut self, needle: impl Into<String>) -> Self {
        self.title_contains = non_empty(&needle.into());
        self
    }

    pub fn description_contains(mut self, needle: impl Into<String>) -> Self {
        self.description_contains = non_empty(&needle.into());
        self
    }

    pub fn priority_min(mut self, bound: u32) -> Self {
        self.priority_min = Some(bound);
        self
    }

    pub fn priority_max(mut self, bound: u32) -> Self {
        self.priority_max = Some(bound);
        self
    }

    /// Title needle, treating `Some("")` as absent.
    pub fn title_needle(&self) -> Option<&str> {
        self.title_contains.as_deref().filter(|needle| !needle.is_empty())
    }

    /// Description needle, treating `Some("")` as absent.
    pub fn description_needle(&self) -> Option<&str> {
        self.description_contains
            .as_deref()
            .filter(|needle| !needle.is_empty())
    }

    /// Returns whether no criterion is present.
    pub fn is_empty(&self) -> bool {
        self.title_needle().is_none()
            && self.description_needle().is_none()
            && self.priority_min.is_none()
            && self.priority_max.is_none()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn raw_bound(value: i64) -> Option<u32> {
    if value < 0 {
        return None;
    }
    // Bounds above u32::MAX cannot exclude anything on the upper side and
    // exclude everything on the lower side; saturating keeps both true.
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::FilterSpec;

    #[test]
    fn default_has_no_criteria() {
        assert!(FilterSpec::default().is_empty());
    }

    #[test]
    fn negative_raw_bounds_are_unbounded() {
        let spec = FilterSpec::from_raw("", "", -1, -1);
        assert_eq!(spec, FilterSpec::default());

        let spec = FilterSpec::from_raw("Crash", "", 2, -7);
        assert_eq!(spec.title_needle(), Some("Crash"));
        assert_eq!(spec.priority_min, Some(2));
        assert_eq!(spec.priority_max, None);
    }

    #[test]
    fn zero_is_a_real_bound() {
        let spec = FilterSpec::from_raw("", "", 0, 0);
        assert_eq!(spec.priority_min, Some(0));
        assert_eq!(spec.priority_max, Some(0));
        assert!(!spec.is_empty());
    }

    #[test]
    fn empty_needles_are_treated_as_absent() {
        let spec = FilterSpec {
            title_contains: Some(String::new()),
            description_contains: Some(String::new()),
            ..FilterSpec::default()
        };
        assert!(spec.is_empty());
        assert!(FilterSpec::new().title_contains("").is_empty());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let spec: FilterSpec = serde_json::from_str(r#"{"priority_max": 4}"#).unwrap();
        assert_eq!(spec, FilterSpec::new().priority_max(4));
    }
}
