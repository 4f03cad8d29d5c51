//! Repair pass for loosely formatted model output.
//!
//! Completions may wrap the JSON in code fences, contain literal `\n`
//! sequences between tokens, or surround the object with prose. The scanner
//! tracks string literals so braces inside values do not affect nesting.

/// Code-fence markers removed before scanning. Longest first.
const FENCE_MARKERS: [&str; 2] = ["```json", "```"];

/// Remove code-fence markers.
pub fn strip_fences(content: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(content.to_string(), |acc, marker| acc.replace(marker, ""))
}

/// Extract the first balanced `{...}` span.
///
/// Literal two-character `\n` sequences outside string literals are dropped.
/// Escapes inside string literals are copied unchanged. Returns `None` when
/// there is no opening brace or the first object never closes.
pub fn extract_object(content: &str) -> Option<String> {
    let start = content.find('{')?;
    let mut out = String::with_capacity(content.len() - start);
    let mut chars = content[start..].chars().peekable();
    let mut depth = 0usize;
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '\\' if chars.peek() == Some(&'n') => {
                chars.next();
            }
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' => {
                depth += 1;
                out.push(c);
            }
            '}' => {
                depth -= 1;
                out.push(c);
                if depth == 0 {
                    return Some(out);
                }
            }
            _ => out.push(c),
        }
    }

    None
}

/// Full repair: strip fences, then extract the first balanced object.
pub fn clean_json_content(content: &str) -> Option<String> {
    extract_object(&strip_fences(content))
}
