//! Mapping from catalog metadata to the canonical book record.

use super::{Author, CatalogMetadata};
use crate::models::{join_list, BookRecord};

/// Title used when the catalog has none.
pub const UNTITLED: &str = "Untitled";

/// Join author names. An empty list yields `""`.
pub fn join_authors(authors: &[Author]) -> String {
    let names: Vec<&str> = authors.iter().map(|a| a.name.as_str()).collect();
    join_list(&names)
}

/// Join language codes. An empty list yields `""`.
pub fn join_languages(languages: &[String]) -> String {
    join_list(languages)
}

/// Trimmed title, or [`UNTITLED`] when missing or blank.
pub fn normalize_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => UNTITLED.to_string(),
    }
}

/// Build the canonical record for `id` from catalog metadata and optional text.
pub fn normalize(id: i64, metadata: &CatalogMetadata, text: Option<String>) -> BookRecord {
    BookRecord::new(
        id,
        normalize_title(metadata.title.as_deref()),
        join_authors(&metadata.authors),
        join_languages(&metadata.languages),
        text,
    )
}
