use addressbook_core::db::open_db_in_memory;
use addressbook_core::{
    filter_contacts, Contact, ContactMethod, ContactQuery, ContactService, FilterMode, MethodType,
    SqliteBackend, StoredContactRepository,
};

fn sample() -> Vec<Contact> {
    let mut john = Contact::new(
        "John Doe",
        vec![ContactMethod::new(MethodType::Email, "jd@Example.com")],
    );
    john.is_favorite = true;
    let mut jane = Contact::new(
        "Jane Roe",
        vec![
            ContactMethod::new(MethodType::Phone, "555-0100"),
            ContactMethod::new(MethodType::Address, "Johnson Street 5"),
        ],
    );
    jane.note = "john's sister".to_string();
    let mut wang = Contact::new(
        "王小明",
        vec![ContactMethod::new(MethodType::Wechat, "xiaoming")],
    );
    wang.is_favorite = true;
    vec![john, jane, wang]
}

fn names(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|contact| contact.name.as_str()).collect()
}

#[test]
fn all_with_empty_term_returns_everything_in_order() {
    let contacts = sample();
    let result = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, ""));
    assert_eq!(result, contacts);
}

#[test]
fn favorites_with_empty_term_returns_favorite_subset_in_order() {
    let contacts = sample();
    let result = filter_contacts(&contacts, &ContactQuery::new(FilterMode::Favorites, ""));
    assert_eq!(names(&result), vec!["John Doe", "王小明"]);
}

#[test]
fn search_is_case_insensitive() {
    let contacts = sample();
    let upper = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, "JOHN"));
    let lower = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, "john"));
    assert_eq!(upper, lower);
    assert_eq!(names(&upper), vec!["John Doe", "Jane Roe"]);
}

#[test]
fn search_matches_method_values_but_not_types_or_notes() {
    let contacts = sample();
    let by_value = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, "example.COM"));
    assert_eq!(names(&by_value), vec!["John Doe"]);

    let by_type = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, "wechat"));
    assert!(by_type.is_empty());

    let by_note = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, "sister"));
    assert!(by_note.is_empty());
}

#[test]
fn mode_and_term_are_combined() {
    let contacts = sample();
    let result = filter_contacts(&contacts, &ContactQuery::new(FilterMode::Favorites, "john"));
    assert_eq!(names(&result), vec!["John Doe"]);

    let none = filter_contacts(&contacts, &ContactQuery::new(FilterMode::Favorites, "555"));
    assert!(none.is_empty());
}

#[test]
fn whitespace_in_term_is_significant_and_non_ascii_terms_match() {
    let contacts = sample();
    let space = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, " "));
    assert_eq!(names(&space), vec!["John Doe", "Jane Roe"]);

    let padded = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, " doe"));
    assert_eq!(names(&padded), vec!["John Doe"]);

    let trailing = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, "doe "));
    assert!(trailing.is_empty());

    let chinese = filter_contacts(&contacts, &ContactQuery::new(FilterMode::All, "小明"));
    assert_eq!(names(&chinese), vec!["王小明"]);
}

#[test]
fn service_filter_reads_stored_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = StoredContactRepository::new(SqliteBackend::try_new(&conn).unwrap());
    let service = ContactService::new(repo);
    for contact in sample() {
        service
            .merge_imported(vec![contact])
            .expect("merge should persist");
    }

    let result = service.filter(FilterMode::Favorites, "");
    assert_eq!(names(&result), vec!["John Doe", "王小明"]);
}
