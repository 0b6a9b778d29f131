use addressbook_core::db::open_db_in_memory;
use addressbook_core::{
    Contact, ContactId, ContactMethod, ContactRepository, ContactValidationError, MethodType,
    RepoError, SqliteBackend, StoredContactRepository,
};
use rusqlite::Connection;

fn phone_contact(name: &str, phone: &str) -> Contact {
    Contact::new(name, vec![ContactMethod::new(MethodType::Phone, phone)])
}

fn repo(conn: &Connection) -> StoredContactRepository<SqliteBackend<'_>> {
    StoredContactRepository::new(SqliteBackend::try_new(conn).unwrap())
}

#[test]
fn get_all_is_empty_when_nothing_is_stored() {
    let conn = open_db_in_memory().unwrap();
    assert!(repo(&conn).get_all().is_empty());
}

#[test]
fn add_then_find_returns_equal_contact() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);

    let mut alice = phone_contact("Alice", "123");
    alice.note = "neighbour".to_string();
    alice.methods.push(ContactMethod::new(MethodType::Email, "alice@example.com"));
    let bob = phone_contact("Bob", "456");

    repo.add(alice.clone()).unwrap();
    let contacts = repo.add(bob.clone()).unwrap();

    assert_eq!(contacts, vec![alice.clone(), bob.clone()]);
    assert_eq!(repo.find_by_id(&alice.id), Some(alice));
    assert_eq!(repo.find_by_id(&bob.id), Some(bob));
}

#[test]
fn save_of_get_all_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    repo.add(phone_contact("Alice", "123")).unwrap();
    repo.add(phone_contact("Bob", "456")).unwrap();

    let before = repo.get_all();
    repo.save(&before).unwrap();
    assert_eq!(repo.get_all(), before);
}

#[test]
fn add_rejects_invalid_contact_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);

    let err = repo.add(Contact::new("Nobody", Vec::new())).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::NoMethods)
    ));
    assert!(repo.get_all().is_empty());
}

#[test]
fn update_replaces_matching_contact_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    let alice = phone_contact("Alice", "123");
    let bob = phone_contact("Bob", "456");
    repo.add(alice.clone()).unwrap();
    repo.add(bob.clone()).unwrap();

    let mut edited = alice.clone();
    edited.name = "Alice Smith".to_string();
    edited.methods = vec![ContactMethod::new(MethodType::Wechat, "alice_wx")];
    let contacts = repo.update(edited.clone()).unwrap();

    assert_eq!(contacts, vec![edited.clone(), bob]);
    assert_eq!(repo.find_by_id(&alice.id), Some(edited));
}

#[test]
fn update_unknown_id_returns_not_found_and_keeps_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    repo.add(phone_contact("Alice", "123")).unwrap();
    let before = repo.get_all();

    let stranger = phone_contact("Stranger", "000");
    let err = repo.update(stranger.clone()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == stranger.id));
    assert_eq!(repo.get_all(), before);
}

#[test]
fn delete_removes_contact_and_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    let alice = phone_contact("Alice", "123");
    let bob = phone_contact("Bob", "456");
    repo.add(alice.clone()).unwrap();
    repo.add(bob.clone()).unwrap();

    let contacts = repo.delete(&alice.id).unwrap();
    assert_eq!(contacts, vec![bob]);
    assert!(repo.find_by_id(&alice.id).is_none());

    let err = repo.delete(&alice.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn delete_removes_every_record_sharing_the_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    let shared = ContactId::from("1700000000000");
    let first = Contact::with_id(
        shared.clone(),
        "First",
        vec![ContactMethod::new(MethodType::Phone, "1")],
    );
    let second = Contact::with_id(
        shared.clone(),
        "Second",
        vec![ContactMethod::new(MethodType::Phone, "2")],
    );
    repo.save(&[first, second]).unwrap();

    assert!(repo.delete(&shared).unwrap().is_empty());
}

#[test]
fn toggle_favorite_twice_restores_original_state() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    let alice = phone_contact("Alice", "123");
    repo.add(alice.clone()).unwrap();

    let toggled = repo.toggle_favorite(&alice.id).unwrap().unwrap();
    assert!(toggled.is_favorite);
    assert!(repo.find_by_id(&alice.id).unwrap().is_favorite);

    let restored = repo.toggle_favorite(&alice.id).unwrap().unwrap();
    assert!(!restored.is_favorite);
    assert_eq!(repo.find_by_id(&alice.id), Some(alice));
}

#[test]
fn toggle_favorite_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    assert!(repo
        .toggle_favorite(&ContactId::from("missing"))
        .unwrap()
        .is_none());
}

#[test]
fn get_all_reads_legacy_records_and_skips_undecodable_ones() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('contacts', ?1);",
        [r#"[
            {"id": "1700000000000", "name": "Legacy", "methods": [{"type": "phone", "value": "1"}]},
            {"name": "No id"},
            {"id": "1700000000001", "name": "Fax", "methods": [{"type": "fax", "value": "2"}], "isFavorite": true}
        ]"#],
    )
    .unwrap();
    let repo = repo(&conn);

    let contacts = repo.get_all();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].name, "Legacy");
    assert_eq!(contacts[0].note, "");
    assert_eq!(
        contacts[1].methods[0].kind,
        MethodType::Other("fax".to_string())
    );
    assert!(contacts[1].is_favorite);
}

#[test]
fn write_failure_surfaces_as_persist_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);
    conn.execute_batch("DROP TABLE kv_entries;").unwrap();

    let err = repo.add(phone_contact("Alice", "123")).unwrap_err();
    assert!(matches!(err, RepoError::Persist { key: "contacts" }));
    assert!(repo.get_all().is_empty());
}

#[test]
fn add_and_update_reject_blank_method_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = repo(&conn);

    let blank_only = phone_contact("Alice", "   ");
    let err = repo.add(blank_only).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::BlankMethodValue(0))
    ));
    assert!(repo.get_all().is_empty());

    let alice = phone_contact("Alice", "123");
    repo.add(alice.clone()).unwrap();
    let mut edited = alice.clone();
    edited
        .methods
        .push(ContactMethod::new(MethodType::Email, ""));
    let err = repo.update(edited).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ContactValidationError::BlankMethodValue(1))
    ));
    assert_eq!(repo.find_by_id(&alice.id), Some(alice));
}
