use addressbook_core::db::open_db_in_memory;
use addressbook_core::storage::StorageError;
use addressbook_core::{SqliteBackend, StorageAdapter};
use rusqlite::Connection;
use std::collections::BTreeMap;

#[test]
fn get_returns_default_for_missing_key() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteBackend::try_new(&conn).unwrap());

    let value: Vec<String> = storage.get("missing", vec!["fallback".to_string()]);
    assert_eq!(value, vec!["fallback".to_string()]);
}

#[test]
fn set_then_get_returns_stored_value() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteBackend::try_new(&conn).unwrap());

    let value = BTreeMap::from([("a".to_string(), 1_u32), ("b".to_string(), 2)]);
    assert!(storage.set("numbers", &value));
    assert!(storage.set("numbers", &value));

    let loaded: BTreeMap<String, u32> = storage.get("numbers", BTreeMap::new());
    assert_eq!(loaded, value);
}

#[test]
fn get_returns_default_for_corrupt_json() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('contacts', '{not json');",
        [],
    )
    .unwrap();
    let storage = StorageAdapter::new(SqliteBackend::try_new(&conn).unwrap());

    let value: Vec<u32> = storage.get("contacts", vec![7]);
    assert_eq!(value, vec![7]);
}

#[test]
fn get_returns_default_for_empty_text() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('contacts', '');",
        [],
    )
    .unwrap();
    let storage = StorageAdapter::new(SqliteBackend::try_new(&conn).unwrap());

    let value: Vec<u32> = storage.get("contacts", Vec::new());
    assert!(value.is_empty());
}

#[test]
fn remove_and_clear_delete_values() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteBackend::try_new(&conn).unwrap());

    assert!(storage.set("a", &1));
    assert!(storage.set("b", &2));
    assert!(storage.remove("a"));
    assert!(storage.remove("never-set"));
    assert_eq!(storage.get("a", 0), 0);
    assert_eq!(storage.get("b", 0), 2);

    assert!(storage.clear());
    assert_eq!(storage.get("b", 0), 0);
}

#[test]
fn medium_failures_become_false_or_default() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteBackend::try_new(&conn).unwrap());
    assert!(storage.set("a", &1));

    conn.execute_batch("DROP TABLE kv_entries;").unwrap();

    assert_eq!(storage.get("a", 42), 42);
    assert!(!storage.set("a", &2));
    assert!(!storage.remove("a"));
    assert!(!storage.clear());
}

#[test]
fn set_reports_serialization_failure() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteBackend::try_new(&conn).unwrap());

    // JSON object keys must be strings.
    let value = BTreeMap::from([((1_u8, 2_u8), "pair")]);
    assert!(!storage.set("pairs", &value));
}

#[test]
fn backend_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteBackend::try_new(&conn) {
        Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("uninitialized connection must be rejected"),
    }
}
