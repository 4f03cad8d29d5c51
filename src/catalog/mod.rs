//! Remote book catalog: metadata and full text by numeric id.
//!
//! Metadata comes from a Gutendex-compatible JSON API, text from the Project
//! Gutenberg file server. The [`CatalogClient`] trait is the capability the
//! book service consumes.

mod client;
mod config;
pub mod normalize;

pub use client::GutenbergCatalog;
pub use config::CatalogConfig;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Errors from catalog requests.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The metadata service answered with a non-success status.
    #[error("Book metadata not found for id {id} (HTTP {status})")]
    MetadataNotFound { id: i64, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Author entry as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: String,
}

/// Book metadata in the catalog's own shape.
///
/// Missing or `null` lists deserialize as empty; the normalizer decides the
/// remaining defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: Vec<Author>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub languages: Vec<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of book metadata and text.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch metadata for a book.
    ///
    /// A non-success response is [`CatalogError::MetadataNotFound`].
    async fn fetch_metadata(&self, id: i64) -> Result<CatalogMetadata, CatalogError>;

    /// Fetch the plain text of a book.
    ///
    /// A non-success response means the text is unavailable and yields
    /// `Ok(None)`; only transport failures are errors.
    async fn fetch_text(&self, id: i64) -> Result<Option<String>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_tolerates_missing_and_null_lists() {
        let meta: CatalogMetadata =
            serde_json::from_str(r#"{"title": "Ulysses", "authors": null}"#).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Ulysses"));
        assert!(meta.authors.is_empty());
        assert!(meta.languages.is_empty());
    }

    #[test]
    fn test_metadata_ignores_extra_fields() {
        let meta: CatalogMetadata = serde_json::from_str(
            r#"{
                "id": 84,
                "title": "Frankenstein",
                "authors": [{"name": "Shelley, Mary Wollstonecraft", "birth_year": 1797}],
                "languages": ["en"],
                "download_count": 100
            }"#,
        )
        .unwrap();
        assert_eq!(meta.authors[0].name, "Shelley, Mary Wollstonecraft");
        assert_eq!(meta.languages, vec!["en"]);
    }
}
