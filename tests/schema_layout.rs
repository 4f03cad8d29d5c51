//! Schema Layout Tests
//!
//! Verifies that the schema created by `BookDbContext::init_schema` has the
//! columns the Diesel table definition expects.

use std::collections::BTreeMap;

use rusqlite::{Connection, Result as SqliteResult};

use booklens::repository::BookDbContext;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnInfo {
    col_type: String,
    not_null: bool,
    primary_key: bool,
}

/// Extract column info for a table via PRAGMA table_info
fn extract_columns(conn: &Connection, table: &str) -> SqliteResult<BTreeMap<String, ColumnInfo>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let rows = stmt.query_map([], |row| {
        let name: String = row.get(1)?;
        Ok((
            name,
            ColumnInfo {
                col_type: row.get::<_, String>(2)?.to_uppercase(),
                not_null: row.get::<_, i32>(3)? != 0,
                primary_key: row.get::<_, i32>(5)? != 0,
            },
        ))
    })?;
    rows.collect()
}

fn table_names(conn: &Connection) -> SqliteResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect()
}

async fn create_schema(path: &std::path::Path) {
    let ctx = BookDbContext::from_sqlite_path(path);
    ctx.init_schema().await.expect("schema creation failed");
}

#[tokio::test]
async fn books_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("layout.db");
    create_schema(&db_path).await;

    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(table_names(&conn).unwrap(), vec!["books".to_string()]);

    let columns = extract_columns(&conn, "books").unwrap();
    let names: Vec<&str> = columns.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["analysis", "authors", "id", "languages", "text", "title"]
    );

    let id = &columns["id"];
    assert!(id.primary_key);
    assert_eq!(id.col_type, "INTEGER");

    for required in ["title", "authors", "languages"] {
        let col = &columns[required];
        assert!(col.not_null, "{} should be NOT NULL", required);
        assert_eq!(col.col_type, "TEXT");
    }

    for optional in ["text", "analysis"] {
        let col = &columns[optional];
        assert!(!col.not_null, "{} should be nullable", optional);
        assert_eq!(col.col_type, "TEXT");
    }
}

#[tokio::test]
async fn init_schema_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("again.db");
    create_schema(&db_path).await;

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "INSERT INTO books (id, title, authors, languages) VALUES (84, 'Frankenstein', 'Shelley, Mary', 'en')",
            [],
        )
        .unwrap();
    }

    create_schema(&db_path).await;

    let conn = Connection::open(&db_path).unwrap();
    let title: String = conn
        .query_row("SELECT title FROM books WHERE id = 84", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "Frankenstein");
}

#[tokio::test]
async fn database_uses_write_ahead_log() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("wal.db");
    create_schema(&db_path).await;

    // journal_mode is persistent, so a fresh connection sees it
    let conn = Connection::open(&db_path).unwrap();
    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}
