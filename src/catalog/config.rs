//! Catalog endpoint configuration.

use serde::{Deserialize, Serialize};

/// Base URLs of the catalog services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Gutendex-compatible metadata API (`{metadata_url}/books/{id}`).
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
    /// Gutenberg file server (`{content_url}/files/{id}/{id}-0.txt`).
    #[serde(default = "default_content_url")]
    pub content_url: String,
}

fn default_metadata_url() -> String {
    "https://gutendex.com".to_string()
}

fn default_content_url() -> String {
    "https://www.gutenberg.org".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl CatalogConfig {
    fn base_default() -> Self {
        Self {
            metadata_url: default_metadata_url(),
            content_url: default_content_url(),
        }
    }

    /// Check if the config equals the default (for skip_serializing_if).
    pub fn is_default(&self) -> bool {
        *self == Self::base_default()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `CATALOG_METADATA_URL`
    /// - `CATALOG_CONTENT_URL`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("CATALOG_METADATA_URL") {
            self.metadata_url = val;
        }
        if let Ok(val) = std::env::var("CATALOG_CONTENT_URL") {
            self.content_url = val;
        }
        self
    }

    /// Metadata URL for a book.
    pub fn metadata_endpoint(&self, id: i64) -> String {
        format!("{}/books/{}", self.metadata_url.trim_end_matches('/'), id)
    }

    /// Plain-text URL for a book.
    pub fn content_endpoint(&self, id: i64) -> String {
        format!(
            "{}/files/{id}/{id}-0.txt",
            self.content_url.trim_end_matches('/'),
            id = id
        )
    }
}
