mod common;

use common::all_stores;
use netra_core::{NewIssue, StoreError, StoreErrorKind};

#[test]
fn create_then_get_roundtrips_fields() {
    for (name, store) in all_stores() {
        let input = NewIssue::new("Crash on save")
            .with_description("stack trace attached")
            .with_priority(4);
        let id = store.create(&input).unwrap();
        assert!(!id.is_empty(), "{name}: id must be assigned");

        let loaded = store.get_by_id(&id).unwrap();
        assert_eq!(loaded.id, id, "{name}");
        assert_eq!(loaded.title, input.title, "{name}");
        assert_eq!(loaded.description, input.description, "{name}");
        assert_eq!(loaded.priority, input.priority, "{name}");
    }
}

#[test]
fn priority_defaults_to_zero() {
    for (name, store) in all_stores() {
        let id = store.create(&NewIssue::new("no priority given")).unwrap();
        assert_eq!(store.get_by_id(&id).unwrap().priority, 0, "{name}");
    }
}

#[test]
fn identifiers_are_unique() {
    for (name, store) in all_stores() {
        let first = store.create(&NewIssue::new("same title")).unwrap();
        let second = store.create(&NewIssue::new("same title")).unwrap();
        assert_ne!(first, second, "{name}");
        assert_eq!(store.get_all().unwrap().len(), 2, "{name}");
    }
}

#[test]
fn empty_title_is_a_validation_error_without_write() {
    for (name, store) in all_stores() {
        store.create(&NewIssue::new("existing")).unwrap();

        for title in ["", "   "] {
            let err = store.create(&NewIssue::new(title)).unwrap_err();
            assert_eq!(err.kind(), StoreErrorKind::Validation, "{name}");
        }
        assert_eq!(store.get_all().unwrap().len(), 1, "{name}: no write expected");
    }
}

#[test]
fn empty_and_unknown_ids_are_not_found() {
    for (name, store) in all_stores() {
        for id in ["", "does-not-exist"] {
            let err = store.get_by_id(id).unwrap_err();
            assert!(
                matches!(&err, StoreError::NotFound(missing) if missing == id),
                "{name}: unexpected error {err}"
            );
        }
    }
}

#[test]
fn delete_then_get_is_not_found() {
    for (name, store) in all_stores() {
        let id = store.create(&NewIssue::new("to delete")).unwrap();
        let keep = store.create(&NewIssue::new("to keep")).unwrap();

        let record = store.get_by_id(&id).unwrap();
        store.delete(&record).unwrap();

        assert_eq!(
            store.get_by_id(&id).unwrap_err().kind(),
            StoreErrorKind::NotFound,
            "{name}"
        );
        assert_eq!(store.get_by_id(&keep).unwrap().title, "to keep", "{name}");
    }
}

#[test]
fn deleting_an_absent_record_fails() {
    for (name, store) in all_stores() {
        let id = store.create(&NewIssue::new("once")).unwrap();
        let record = store.get_by_id(&id).unwrap();
        store.delete(&record).unwrap();

        let err = store.delete(&record).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound, "{name}");
    }
}

#[test]
fn get_all_keeps_insertion_order() {
    for (name, store) in all_stores() {
        let ids: Vec<_> = ["first", "second", "third"]
            .into_iter()
            .map(|title| store.create(&NewIssue::new(title)).unwrap())
            .collect();

        let listed: Vec<_> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|issue| issue.id)
            .collect();
        assert_eq!(listed, ids, "{name}");
        assert_eq!(store.get_all().unwrap(), store.get_all().unwrap(), "{name}");
    }
}

#[test]
fn store_error_display_names_missing_id() {
    let (_, store) = all_stores().remove(0);
    let err = store.get_by_id("abc").unwrap_err();
    assert_eq!(err.to_string(), "issue not found: `abc`");
}
