//! Repository layer for book persistence.
//!
//! The [`BookStore`] trait is the storage capability the book service is built
//! on. [`DieselBookRepository`] persists to SQLite through Diesel;
//! [`MemoryBookStore`] keeps records in process memory.

pub mod books;
pub mod context;
pub mod memory;
pub mod models;
pub mod pool;
pub mod util;

pub use books::DieselBookRepository;
pub use context::BookDbContext;
pub use memory::MemoryBookStore;
pub use pool::{DbError, SqlitePool};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::BookRecord;

/// Errors returned by book stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Book {0} not found")]
    NotFound(i64),
    #[error("Book {0} already exists")]
    Conflict(i64),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Stored analysis is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable keyed storage for book records.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Whether a record exists for `id`.
    async fn exists(&self, id: i64) -> Result<bool, StoreError>;

    /// Load a record, `None` if absent.
    async fn get(&self, id: i64) -> Result<Option<BookRecord>, StoreError>;

    /// Insert a new record.
    ///
    /// Fails with [`StoreError::Conflict`] when a record with the same id
    /// already exists. Never overwrites.
    async fn put(&self, record: &BookRecord) -> Result<(), StoreError>;

    /// All records ordered by id.
    async fn list_all(&self) -> Result<Vec<BookRecord>, StoreError>;

    /// Attach an analysis to an existing record.
    ///
    /// Fails with [`StoreError::NotFound`] when there is no record. A record
    /// that already has an analysis is left untouched.
    async fn update_analysis(
        &self,
        id: i64,
        analysis: &serde_json::Value,
    ) -> Result<(), StoreError>;
}
