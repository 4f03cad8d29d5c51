//! Book service: cache-through retrieval and write-once analysis.
//!
//! A book is fetched from the catalog at most once and then served from the
//! store. Analysis runs only for stored books, at most once per id within
//! this process, and is never replaced once stored.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::locks::KeyedLocks;
use crate::analysis::{AnalysisError, AnalysisExtractor, DEFAULT_MAX_CHARS};
use crate::catalog::normalize::normalize;
use crate::catalog::{CatalogClient, CatalogError, GutenbergCatalog};
use crate::config::Settings;
use crate::llm::{LlmClient, LlmError};
use crate::models::BookRecord;
use crate::repository::{BookStore, StoreError};
use crate::utils::truncate_chars;

/// Errors surfaced by book workflows.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Invalid book id {0}: ids must be positive")]
    InvalidId(i64),

    /// No stored record, for operations that never fetch.
    #[error("Book {0} not found. Fetch it before analyzing.")]
    NotFound(i64),

    #[error("Book {0} has no text to analyze")]
    NoText(i64),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => BookError::NotFound(id),
            other => BookError::Store(other),
        }
    }
}

impl BookError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookError::InvalidId(_) => StatusCode::BAD_REQUEST,
            BookError::NotFound(_) => StatusCode::NOT_FOUND,
            BookError::NoText(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookError::Catalog(CatalogError::MetadataNotFound { .. }) => StatusCode::NOT_FOUND,
            BookError::Catalog(_) => StatusCode::BAD_GATEWAY,
            BookError::Analysis(AnalysisError::Completion(err)) => match err {
                LlmError::MissingApiKey | LlmError::Disabled => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            },
            BookError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Orchestrates the store, catalog and analysis extractor.
pub struct BookService {
    store: Arc<dyn BookStore>,
    catalog: Arc<dyn CatalogClient>,
    extractor: AnalysisExtractor,
    max_analysis_chars: usize,
    analysis_locks: KeyedLocks,
}

impl BookService {
    pub fn new(
        store: Arc<dyn BookStore>,
        catalog: Arc<dyn CatalogClient>,
        extractor: AnalysisExtractor,
    ) -> Self {
        Self {
            store,
            catalog,
            extractor,
            max_analysis_chars: DEFAULT_MAX_CHARS,
            analysis_locks: KeyedLocks::new(),
        }
    }

    /// Characters of book text sent for analysis. Zero keeps the default.
    pub fn with_max_analysis_chars(mut self, max_chars: usize) -> Self {
        if max_chars > 0 {
            self.max_analysis_chars = max_chars;
        }
        self
    }

    /// Wire the SQLite store, Gutenberg catalog and LLM client from settings.
    ///
    /// The schema is not created here; callers run `init_schema` first.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let db = settings.create_db_context();
        let store: Arc<dyn BookStore> = Arc::new(db.books());

        let catalog = GutenbergCatalog::new(
            settings.catalog.clone(),
            &settings.user_agent,
            Duration::from_secs(settings.request_timeout),
        )?;

        let llm = LlmClient::new(settings.llm.clone())?;
        let extractor = AnalysisExtractor::new(Arc::new(llm))
            .with_strict_schema(settings.analysis.strict_schema);

        Ok(Self::new(store, Arc::new(catalog), extractor)
            .with_max_analysis_chars(settings.analysis.max_chars))
    }

    /// All stored books ordered by id. Never touches the network.
    pub async fn list_books(&self) -> Result<Vec<BookRecord>, BookError> {
        Ok(self.store.list_all().await?)
    }

    /// Alias for [`BookService::get_or_fetch`].
    pub async fn get_book(&self, id: i64) -> Result<BookRecord, BookError> {
        self.get_or_fetch(id).await
    }

    /// Alias for [`BookService::get_or_analyze`].
    pub async fn analyze_book(&self, id: i64) -> Result<BookRecord, BookError> {
        self.get_or_analyze(id).await
    }

    /// Return the stored book, fetching and storing it on first request.
    pub async fn get_or_fetch(&self, id: i64) -> Result<BookRecord, BookError> {
        validate_id(id)?;

        if let Some(book) = self.store.get(id).await? {
            debug!("Book {} served from store", id);
            return Ok(book);
        }

        let metadata = self.catalog.fetch_metadata(id).await?;
        let text = self.catalog.fetch_text(id).await?;
        if text.is_none() {
            warn!("Book {} stored without text", id);
        }

        let record = normalize(id, &metadata, text);
        match self.store.put(&record).await {
            Ok(()) => {
                info!("Fetched book {}: {}", id, record.title);
                Ok(record)
            }
            Err(StoreError::Conflict(_)) => {
                warn!("Book {} was stored concurrently, using stored record", id);
                self.require(id).await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Return the stored book with its analysis, running the analysis if the
    /// book has none yet. Never fetches from the catalog.
    pub async fn get_or_analyze(&self, id: i64) -> Result<BookRecord, BookError> {
        validate_id(id)?;

        let book = self.require(id).await?;
        if book.is_analyzed() {
            debug!("Book {} already analyzed", id);
            return Ok(book);
        }

        let _guard = self.analysis_locks.lock(id).await;

        // Another caller may have finished while we waited.
        let book = self.require(id).await?;
        if book.is_analyzed() {
            debug!("Book {} analyzed while waiting", id);
            return Ok(book);
        }

        let text = book.text.as_deref().ok_or(BookError::NoText(id))?;
        let excerpt = truncate_chars(text, self.max_analysis_chars);
        info!(
            "Analyzing book {} ({} of {} characters)",
            id,
            excerpt.chars().count(),
            text.chars().count()
        );

        let analysis = self.extractor.analyze(excerpt).await?;
        self.store.update_analysis(id, &analysis).await?;
        info!("Analysis stored for book {}", id);

        self.require(id).await
    }

    async fn require(&self, id: i64) -> Result<BookRecord, BookError> {
        self.store.get(id).await?.ok_or(BookError::NotFound(id))
    }
}

fn validate_id(id: i64) -> Result<(), BookError> {
    if id <= 0 {
        return Err(BookError::InvalidId(id));
    }
    Ok(())
}
