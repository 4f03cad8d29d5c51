//! Text helpers.

/// Truncate to at most `max_chars` characters (UTF-8 safe).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
