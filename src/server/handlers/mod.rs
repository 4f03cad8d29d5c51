//! HTTP request handlers for the web server.

mod books;
mod types;

pub use books::{analyze_book, get_book, health, list_books};
