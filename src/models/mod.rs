//! Data models for booklens.

mod analysis;
mod book;

pub use analysis::{AnalysisResult, Character};
pub use book::{join_list, split_list, BookRecord, LIST_SEPARATOR};
