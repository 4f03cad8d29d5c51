//! HTTP API for browsing and analyzing cached books.
//!
//! Exposes the book service as a small JSON API:
//! - `GET /books` lists stored books
//! - `GET /books/:id` returns a book, fetching it on first request
//! - `GET /books/:id/analyze` returns a book with its analysis

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::BookService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<BookService>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::from_service(BookService::from_settings(settings)?))
    }

    pub fn from_service(service: BookService) -> Self {
        Self {
            books: Arc::new(service),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
