//! Token predicates used by the line-item extractor.

pub mod patterns;
pub mod price;

pub use patterns::*;
pub use price::{amounts_agree, clean_price_token, parse_price};

/// An all-digit quantity token.
pub fn is_quantity(token: &str) -> bool {
    ALL_DIGITS.is_match(token)
}

/// An all-digit token short enough to be a row number.
pub fn is_item_number(token: &str, max_len: usize) -> bool {
    token.len() <= max_len && ALL_DIGITS.is_match(token)
}

/// A hyphenated identifier of at least `min_len` characters.
pub fn is_mask_name(token: &str, min_len: usize) -> bool {
    token.contains('-') && token.chars().count() >= min_len
}
