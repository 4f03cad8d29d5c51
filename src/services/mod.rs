//! Service layer: workflows composed from the store, catalog and extractor.

pub mod books;
mod locks;

pub use books::{BookError, BookService};
