//! Flattens extracted page text into a token stream.
//!
//! Table rows wrap unpredictably across visual lines in extracted PDF text,
//! so line structure is discarded up front and fields are recovered by
//! proximity to the anchor instead.

use super::rules::WHITESPACE_RUN;

/// Collapse all line breaks and whitespace runs to single spaces.
pub fn flatten(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Split page text into ordered whitespace-delimited tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let flat = flatten(text);
    if flat.is_empty() {
        return Vec::new();
    }
    flat.split(' ').map(str::to_string).collect()
}
