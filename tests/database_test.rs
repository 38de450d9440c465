//! Tests for applying the rendered schema to SQLite

use std::fs;

use schemagen::config::DatabaseConfig;
use schemagen::records::{sample_records, Message, Record, RecordCodecs, Thread, User};
use schemagen::service::SchemaService;
use schemagen::{app_schema, Database, Language, SchemaError, TableId};
use tempfile::tempdir;

#[test]
fn test_apply_schema_creates_every_table() {
    let schema = app_schema().expect("schema");
    let db = Database::open_in_memory().expect("Failed to open database");

    assert_eq!(db.apply_schema(&schema).expect("Failed to apply schema"), 3);
    assert_eq!(
        db.table_names().expect("names"),
        vec!["Thread".to_string(), "ThreadMessage".to_string(), "User".to_string()]
    );
}

#[test]
fn test_apply_schema_twice_is_harmless() {
    let schema = app_schema().expect("schema");
    let db = Database::open_in_memory().expect("Failed to open database");

    db.apply_schema(&schema).expect("first apply");
    db.apply_schema(&schema).expect("second apply");
}

#[test]
fn test_seed_and_select_round_trip() {
    let schema = app_schema().expect("schema");
    let codecs = RecordCodecs::new();
    let db = Database::open_in_memory().expect("Failed to open database");
    db.apply_schema(&schema).expect("apply");

    assert_eq!(db.seed(&schema, &sample_records()).expect("seed"), 4);

    let users = db.select_all(&schema, &codecs, TableId::User).expect("users");
    assert_eq!(
        users,
        vec![Record::User(User {
            id: 1,
            name: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin".to_string(),
        })]
    );

    let threads = db.select_all(&schema, &codecs, TableId::Thread).expect("threads");
    assert_eq!(threads, vec![Record::Thread(Thread { id: 1, name: "test".to_string(), creator_id: 1 })]);

    let messages = db.select_all(&schema, &codecs, TableId::ThreadMessage).expect("messages");
    let contents: Vec<_> = messages
        .iter()
        .map(|m| match m {
            Record::Message(Message { content, .. }) => content.as_str(),
            other => panic!("unexpected record: {other:?}"),
        })
        .collect();
    assert_eq!(contents, vec!["first message", "second message"]);
}

#[test]
fn test_unique_constraint_is_enforced() {
    let schema = app_schema().expect("schema");
    let db = Database::open_in_memory().expect("Failed to open database");
    db.apply_schema(&schema).expect("apply");

    let admin = sample_records().remove(0);
    db.insert(&schema, &admin).expect("first insert");

    let duplicate_name = Record::User(User {
        id: 2,
        name: "admin".to_string(),
        email: "other@example.com".to_string(),
        password: "x".to_string(),
    });
    assert!(matches!(db.insert(&schema, &duplicate_name), Err(SchemaError::Database(_))));
}

#[test]
fn test_foreign_key_is_enforced() {
    let schema = app_schema().expect("schema");
    let db = Database::open_in_memory().expect("Failed to open database");
    db.apply_schema(&schema).expect("apply");

    let orphan = Record::Thread(Thread { id: 1, name: "orphan".to_string(), creator_id: 42 });
    assert!(db.insert(&schema, &orphan).is_err());
}

#[test]
fn test_failed_seed_rolls_back() {
    let schema = app_schema().expect("schema");
    let codecs = RecordCodecs::new();
    let db = Database::open_in_memory().expect("Failed to open database");
    db.apply_schema(&schema).expect("apply");

    let mut records = sample_records();
    records.push(Record::Message(Message { id: 3, thread_id: 99, user_id: 1, content: "lost".to_string() }));

    assert!(db.seed(&schema, &records).is_err());
    assert!(db.select_all(&schema, &codecs, TableId::User).expect("users").is_empty());
}

#[test]
fn test_recreate_removes_existing_file() {
    let schema = app_schema().expect("schema");
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("db.db");

    {
        let db = Database::open(&path).expect("open");
        db.apply_schema(&schema).expect("apply");
        db.seed(&schema, &sample_records()).expect("seed");
    }

    let db = Database::recreate(&path).expect("recreate");
    assert!(db.table_names().expect("names").is_empty());
}

#[test]
fn test_open_creates_parent_directories() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("backend").join("db.db");

    Database::open(&path).expect("open");
    assert!(path.exists());
}

#[test]
fn test_service_initializes_configured_database() {
    let schema = app_schema().expect("schema");
    let dir = tempdir().expect("Failed to create temp directory");
    let config = DatabaseConfig {
        path: dir.path().join("app.db").display().to_string(),
        recreate: true,
        seed_sample_data: true,
    };

    let service = SchemaService::new(&schema);
    let report = service.initialize_database(&config).expect("init");
    assert_eq!(report.scripts_applied, 3);
    assert_eq!(report.records_seeded, 4);

    // Recreating starts from an empty file, so seeding again succeeds.
    let report = service.initialize_database(&config).expect("reinit");
    assert_eq!(report.records_seeded, 4);
}

#[test]
fn test_service_writes_declarations() {
    let schema = app_schema().expect("schema");
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("DataDefs.hs");

    let written = SchemaService::new(&schema)
        .write_declarations(Language::Haskell, &path, "DataDef")
        .expect("write");

    let contents = fs::read_to_string(&written.path).expect("read");
    assert_eq!(written.bytes, contents.len());
    assert!(contents.contains("data ThreadMessage = ThreadMessage"));
}
