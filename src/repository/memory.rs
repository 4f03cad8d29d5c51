//! In-memory book store for single-process operation.
//!
//! State is not persisted across restarts.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError};
use crate::models::BookRecord;

/// Lock-based book store keyed by id.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<i64, BookRecord>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.books.read().await.contains_key(&id))
    }

    async fn get(&self, id: i64) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn put(&self, record: &BookRecord) -> Result<(), StoreError> {
        let mut books = self.books.write().await;
        if books.contains_key(&record.id) {
            return Err(StoreError::Conflict(record.id));
        }
        books.insert(record.id, record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn update_analysis(
        &self,
        id: i64,
        analysis: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut books = self.books.write().await;
        let book = books.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if book.analysis.is_none() {
            book.analysis = Some(analysis.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64) -> BookRecord {
        BookRecord::new(id, format!("Book {}", id), String::new(), "en".into(), None)
    }

    #[tokio::test]
    async fn test_memory_store_semantics() {
        let store = MemoryBookStore::new();

        store.put(&book(2)).await.unwrap();
        store.put(&book(1)).await.unwrap();
        assert!(matches!(
            store.put(&book(1)).await,
            Err(StoreError::Conflict(1))
        ));

        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert!(matches!(
            store.update_analysis(5, &serde_json::json!({})).await,
            Err(StoreError::NotFound(5))
        ));

        store
            .update_analysis(1, &serde_json::json!({ "summary": "a" }))
            .await
            .unwrap();
        store
            .update_analysis(1, &serde_json::json!({ "summary": "b" }))
            .await
            .unwrap();
        let stored = store.get(1).await.unwrap().unwrap();
        assert_eq!(stored.analysis.unwrap()["summary"], "a");
    }
}
