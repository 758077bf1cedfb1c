use lexiload_core::db::migrations::{latest_version, schema_version};
use lexiload_core::db::{create_indexes, open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_dictionary_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    for table in ["lexicon", "entries", "variants", "senses"] {
        assert_object_exists(&conn, "table", table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first).unwrap(), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    assert_object_exists(&conn_second, "table", "senses");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::NewerSchema { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute(
            "INSERT INTO variants (id, entry_id, idx) VALUES (1, 42, 0);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn create_indexes_is_repeatable() {
    let conn = open_db_in_memory().unwrap();
    create_indexes(&conn).unwrap();
    create_indexes(&conn).unwrap();

    for index in [
        "lexicon_traditional_index",
        "lexicon_simplified_index",
        "entries_title_index",
        "entries_id_index",
        "variants_id_index",
        "senses_id_index",
    ] {
        assert_object_exists(&conn, "index", index);
    }
}

#[test]
fn unopenable_path_reports_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("dictionary.sqlite3");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Open { mode: "file", .. }));
}

#[test]
fn index_creation_without_tables_reports_index_failure() {
    let conn = Connection::open_in_memory().unwrap();

    let err = create_indexes(&conn).unwrap_err();
    assert!(matches!(err, DbError::Index(_)));
    assert!(err.to_string().contains("lookup index creation failed"));
}

#[test]
fn conflicting_table_reports_failed_schema_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conflict.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE senses (id INTEGER PRIMARY KEY);")
        .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::Schema { version, name, .. } => {
            assert_eq!(version, 1);
            assert_eq!(name, "dictionary");
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 0);
}

fn assert_object_exists(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
