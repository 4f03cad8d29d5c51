//! reqwest-backed catalog client for Gutendex and Project Gutenberg.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{CatalogClient, CatalogConfig, CatalogError, CatalogMetadata};

/// Catalog client issuing one GET per call, without retries.
#[derive(Clone)]
pub struct GutenbergCatalog {
    client: Client,
    config: CatalogConfig,
}

impl GutenbergCatalog {
    /// Create a client with the given endpoints, user agent and request timeout.
    pub fn new(
        config: CatalogConfig,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl CatalogClient for GutenbergCatalog {
    async fn fetch_metadata(&self, id: i64) -> Result<CatalogMetadata, CatalogError> {
        let url = self.config.metadata_endpoint(id);
        debug!("Fetching metadata: {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::MetadataNotFound {
                id,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn fetch_text(&self, id: i64) -> Result<Option<String>, CatalogError> {
        let url = self.config.content_endpoint(id);
        debug!("Fetching text: {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("Book content not found for {} (HTTP {})", id, status);
            return Ok(None);
        }

        Ok(Some(resp.text().await?))
    }
}
