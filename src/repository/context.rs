//! Database context for managing the connection factory and repository access.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::books::DieselBookRepository;
use super::pool::{DbError, SqlitePool};

/// Database context that owns the connection factory and hands out repositories.
///
/// Create one context per command or service, then use it to access the
/// book repository.
///
/// # Example
/// ```ignore
/// let ctx = BookDbContext::from_url("sqlite:books.db");
/// ctx.init_schema().await?;
/// let books = ctx.books().list_all().await?;
/// ```
#[derive(Clone)]
pub struct BookDbContext {
    pool: SqlitePool,
}

impl BookDbContext {
    /// Create a context from a database URL (`sqlite:path` or a plain path).
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: SqlitePool::new(database_url),
        }
    }

    /// Create a context from a SQLite file path.
    pub fn from_sqlite_path(db_path: &Path) -> Self {
        Self {
            pool: SqlitePool::from_path(db_path),
        }
    }

    /// Get a book repository.
    pub fn books(&self) -> DieselBookRepository {
        DieselBookRepository::new(self.pool.clone())
    }

    /// Initialize the database schema.
    ///
    /// This creates the necessary tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute(
            r#"
            -- Readers and the single writer proceed concurrently
            PRAGMA journal_mode = WAL;

            -- Books table: one row per catalog id
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                authors TEXT NOT NULL,
                languages TEXT NOT NULL,
                text TEXT,
                analysis TEXT
            );
            "#,
        )
        .await
    }
}
