//! Canonical book record.
//!
//! A record is created the first time its id is requested, then mutated once
//! more when its analysis is merged in. It is never deleted.

use serde::{Deserialize, Serialize};

use super::AnalysisResult;

/// Separator used when storing author and language lists as a single string.
pub const LIST_SEPARATOR: &str = " | ";

/// A cached book: catalog metadata, full text and optional analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Catalog-assigned identifier (always positive).
    pub id: i64,
    pub title: String,
    /// Author names joined with [`LIST_SEPARATOR`].
    pub authors: String,
    /// Language codes joined with [`LIST_SEPARATOR`].
    pub languages: String,
    /// Full text, absent when the content source had none.
    pub text: Option<String>,
    /// Analysis object exactly as returned by the extractor.
    pub analysis: Option<serde_json::Value>,
}

impl BookRecord {
    /// Create a record without analysis.
    pub fn new(
        id: i64,
        title: String,
        authors: String,
        languages: String,
        text: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            authors,
            languages,
            text,
            analysis: None,
        }
    }

    pub fn is_analyzed(&self) -> bool {
        self.analysis.is_some()
    }

    /// Author names as a list.
    pub fn author_list(&self) -> Vec<String> {
        split_list(&self.authors)
    }

    /// Language codes as a list.
    pub fn language_list(&self) -> Vec<String> {
        split_list(&self.languages)
    }

    /// Typed view of the stored analysis.
    ///
    /// Returns `None` when there is no analysis or when the stored object does
    /// not match the [`AnalysisResult`] shape.
    pub fn analysis_result(&self) -> Option<AnalysisResult> {
        self.analysis
            .as_ref()
            .and_then(|value| AnalysisResult::from_value(value).ok())
    }
}

/// Join list items with [`LIST_SEPARATOR`]. An empty list yields `""`.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Split a joined list string back into items.
pub fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(LIST_SEPARATOR)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_split() {
        assert_eq!(join_list(&["A", "B"]), "A | B");
        assert_eq!(join_list::<&str>(&[]), "");
        assert_eq!(split_list("A | B"), vec!["A", "B"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_lists_from_record() {
        let book = BookRecord::new(
            84,
            "Frankenstein".to_string(),
            "Shelley, Mary Wollstonecraft".to_string(),
            "en".to_string(),
            None,
        );
        assert_eq!(book.author_list(), vec!["Shelley, Mary Wollstonecraft"]);
        assert_eq!(book.language_list(), vec!["en"]);
        assert!(!book.is_analyzed());
        assert!(book.analysis_result().is_none());
    }

    #[test]
    fn test_analysis_result_view() {
        let mut book = BookRecord::new(1, "T".into(), String::new(), String::new(), None);
        book.analysis = Some(serde_json::json!({ "summary": "only a summary" }));
        // Partial objects are stored as-is but have no typed view.
        assert!(book.is_analyzed());
        assert!(book.analysis_result().is_none());
    }
}
