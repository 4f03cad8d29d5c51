//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(handlers::list_books))
        .route("/books/", get(handlers::list_books))
        .route("/books/:book_id", get(handlers::get_book))
        .route("/books/:book_id/analyze", get(handlers::analyze_book))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
