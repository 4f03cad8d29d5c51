//! Shared utility functions.

mod text;

pub use text::truncate_chars;
