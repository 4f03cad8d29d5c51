//! Response bodies and error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::BookRecord;
use crate::services::BookError;

/// A book as returned by the API.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub book_id: i64,
    pub title: String,
    pub authors: String,
    pub languages: String,
    pub text: Option<String>,
    pub analysis: Option<serde_json::Value>,
}

impl From<BookRecord> for BookResponse {
    fn from(book: BookRecord) -> Self {
        Self {
            book_id: book.id,
            title: book.title,
            authors: book.authors,
            languages: book.languages,
            text: book.text,
            analysis: book.analysis,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub books: Vec<BookResponse>,
}

/// Error rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        let status = err.status_code();
        if status.is_server_error() {
            tracing::error!("{}", err);
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}
