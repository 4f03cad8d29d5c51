//! Book endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::super::AppState;
use super::types::{ApiError, BookListResponse, BookResponse};

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// List stored books without fetching anything.
pub async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<BookListResponse>, ApiError> {
    let books = state.books.list_books().await?;
    Ok(Json(BookListResponse {
        books: books.into_iter().map(BookResponse::from).collect(),
    }))
}

/// Get a book, fetching it from the catalog on first request.
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let id = parse_id(&book_id)?;
    let book = state.books.get_book(id).await?;
    Ok(Json(book.into()))
}

/// Get a stored book with its analysis, analyzing it if needed.
pub async fn analyze_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let id = parse_id(&book_id)?;
    let book = state.books.analyze_book(id).await?;
    Ok(Json(book.into()))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid book id '{}'", raw)))
}
