#![allow(dead_code)]

use netra_core::db::open_db_in_memory;
use netra_core::{IssueRecord, IssueStore, MemoryIssueStore, NewIssue, SqliteIssueStore};

/// One instance of every store implementation, labelled for assertion messages.
pub fn all_stores() -> Vec<(&'static str, Box<dyn IssueStore>)> {
    let sqlite = SqliteIssueStore::try_new(open_db_in_memory().unwrap()).unwrap();
    vec![
        ("sqlite", Box::new(sqlite)),
        ("memory", Box::new(MemoryIssueStore::new())),
    ]
}

/// Seeds the three-record scenario used across search tests.
pub fn seed_scenario(store: &dyn IssueStore) {
    for (title, priority) in [("Crash on save", 1), ("UI glitch", 3), ("Crash on load", 5)] {
        store
            .create(&NewIssue::new(title).with_priority(priority))
            .unwrap();
    }
}

/// Sorted titles, for order-insensitive comparisons.
pub fn titles(issues: &[IssueRecord]) -> Vec<String> {
    let mut titles: Vec<String> = issues.iter().map(|issue| issue.title.clone()).collect();
    titles.sort();
    titles
}
