//! Diesel-based book repository for SQLite.
//!
//! Uses diesel-async's SyncConnectionWrapper to provide an async interface
//! while maintaining Diesel's compile-time query checking.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::models::{BookRow, NewBook};
use super::pool::SqlitePool;
use super::util::is_unique_violation;
use super::{BookStore, StoreError};
use crate::models::BookRecord;
use crate::schema::books;

/// Diesel-based book repository with compile-time query checking.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: SqlitePool,
}

impl DieselBookRepository {
    /// Create a new repository with an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for DieselBookRepository {
    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = books::table
            .filter(books::id.eq(id))
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count > 0)
    }

    async fn get(&self, id: i64) -> Result<Option<BookRecord>, StoreError> {
        let mut conn = self.pool.get().await?;

        let row = books::table
            .find(id)
            .first::<BookRow>(&mut conn)
            .await
            .optional()?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn put(&self, record: &BookRecord) -> Result<(), StoreError> {
        let new_book = NewBook::from_record(record)?;
        let mut conn = self.pool.get().await?;

        match diesel::insert_into(books::table)
            .values(&new_book)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(record.id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<BookRecord>, StoreError> {
        let mut conn = self.pool.get().await?;

        books::table
            .order(books::id.asc())
            .load::<BookRow>(&mut conn)
            .await?
            .into_iter()
            .map(BookRecord::try_from)
            .collect()
    }

    async fn update_analysis(
        &self,
        id: i64,
        analysis: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(analysis)?;
        let mut conn = self.pool.get().await?;

        // Only fill an empty slot so a stored analysis is never replaced.
        let rows = diesel::update(
            books::table
                .filter(books::id.eq(id))
                .filter(books::analysis.is_null()),
        )
        .set(books::analysis.eq(Some(json)))
        .execute(&mut conn)
        .await?;

        if rows == 0 {
            if !self.exists(id).await? {
                return Err(StoreError::NotFound(id));
            }
            debug!("Book {} already has an analysis, keeping it", id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::BookDbContext;
    use tempfile::tempdir;

    async fn setup_test_db() -> (DieselBookRepository, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let ctx = BookDbContext::from_sqlite_path(&db_path);
        ctx.init_schema().await.unwrap();

        (ctx.books(), dir)
    }

    fn sample_book(id: i64) -> BookRecord {
        BookRecord::new(
            id,
            "Pride and Prejudice".to_string(),
            "Austen, Jane".to_string(),
            "en".to_string(),
            Some("It is a truth universally acknowledged...".to_string()),
        )
    }

    #[tokio::test]
    async fn test_book_crud() {
        let (repo, _dir) = setup_test_db().await;

        assert!(!repo.exists(1342).await.unwrap());
        assert!(repo.get(1342).await.unwrap().is_none());

        let book = sample_book(1342);
        repo.put(&book).await.unwrap();

        assert!(repo.exists(1342).await.unwrap());
        let fetched = repo.get(1342).await.unwrap().unwrap();
        assert_eq!(fetched, book);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_put_conflicts() {
        let (repo, _dir) = setup_test_db().await;

        repo.put(&sample_book(42)).await.unwrap();

        let mut other = sample_book(42);
        other.title = "Something else".to_string();
        let err = repo.put(&other).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(42)));

        // The original row is untouched.
        let stored = repo.get(42).await.unwrap().unwrap();
        assert_eq!(stored.title, "Pride and Prejudice");
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_text_absent_round_trip() {
        let (repo, _dir) = setup_test_db().await;

        let mut book = sample_book(7);
        book.text = None;
        repo.put(&book).await.unwrap();

        let stored = repo.get(7).await.unwrap().unwrap();
        assert!(stored.text.is_none());
        assert!(stored.analysis.is_none());
    }

    #[tokio::test]
    async fn test_update_analysis_is_write_once() {
        let (repo, _dir) = setup_test_db().await;
        repo.put(&sample_book(1)).await.unwrap();

        let first = serde_json::json!({ "summary": "first" });
        let second = serde_json::json!({ "summary": "second" });

        repo.update_analysis(1, &first).await.unwrap();
        repo.update_analysis(1, &second).await.unwrap();

        let stored = repo.get(1).await.unwrap().unwrap();
        assert_eq!(stored.analysis, Some(first));
    }

    #[tokio::test]
    async fn test_update_analysis_missing_book() {
        let (repo, _dir) = setup_test_db().await;

        let err = repo
            .update_analysis(99, &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let (repo, _dir) = setup_test_db().await;

        for id in [30, 10, 20] {
            repo.put(&sample_book(id)).await.unwrap();
        }

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
