use classmate_core::{sample_book, BookError, JsonStore, StorageError};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonStore {
    JsonStore::new(dir.path().join("classmate.json"))
}

fn write_data(store: &JsonStore, raw: &str) {
    std::fs::write(store.path(), raw).unwrap();
}

#[test]
fn load_of_absent_file_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_then_load_preserves_the_book() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let book = sample_book();

    store.save(&book).unwrap();
    let mut loaded = store.load().unwrap().expect("file exists after save");

    assert_eq!(loaded.persons(), book.persons());
    assert_eq!(loaded.classes(), book.classes());
    assert!(!loaded.take_dirty(), "a loaded book starts clean");
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path().join("nested/data/classmate.json"));
    store.save(&sample_book()).unwrap();
    assert!(store.path().exists());
}

#[test]
fn saved_file_is_readable_json() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&sample_book()).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"persons\""));
    assert!(raw.contains("\"classes\""));
    assert!(raw.contains("\"tele_handle\""));
}

#[test]
fn class_missing_day_fails_naming_the_field() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    write_data(
        &store,
        r#"{ "persons": [],
             "classes": [ { "module_codes": [ { "code": "CS2040", "tags": ["T05"] } ],
                            "time": "10:00", "remark": "COM1-113" } ] }"#,
    );

    let err = store.load().unwrap_err();
    match err {
        StorageError::MissingField { entity, field } => {
            assert_eq!(entity, "ModuleClass");
            assert_eq!(field, "Day");
        }
        other => panic!("expected missing field, got {other}"),
    }
}

#[test]
fn missing_field_message_names_the_field() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    write_data(
        &store,
        r#"{ "classes": [ { "day": "2", "time": "10:00" } ] }"#,
    );

    let err = store.load().unwrap_err();
    assert!(err.to_string().contains("Remark field is missing"));
}

#[test]
fn invalid_persisted_time_delegates_to_field_validation() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    write_data(
        &store,
        r#"{ "classes": [ { "module_codes": [],
                            "day": "2", "time": "25:00", "remark": "" } ] }"#,
    );

    let err = store.load().unwrap_err();
    match err {
        StorageError::Field(field_err) => {
            assert_eq!(field_err.field, "Time");
            assert_eq!(field_err.value, "25:00");
        }
        other => panic!("expected field error, got {other}"),
    }
}

#[test]
fn duplicate_persisted_contacts_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let record = r#"{ "name": "Alice Tan", "email": "alice@example.com",
                      "module_codes": [], "phone": "91234567",
                      "tele_handle": "@alicetan", "remark": "" }"#;
    write_data(&store, &format!(r#"{{ "persons": [{record}, {record}] }}"#));

    let err = store.load().unwrap_err();
    match err {
        StorageError::Book(book_err) => assert_eq!(book_err, BookError::DuplicatePerson),
        other => panic!("expected duplicate error, got {other}"),
    }
}

#[test]
fn malformed_json_is_a_syntax_error_not_a_panic() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    write_data(&store, "{ this is not json");

    let err = store.load().unwrap_err();
    assert!(matches!(err, StorageError::Json(_)));
}
