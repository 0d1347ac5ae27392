//! Common regex patterns for invoice token classification.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Quantity and item number tokens (ASCII digits only)
    pub static ref ALL_DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();

    // Price tokens after cleanup: digits with at most one decimal point
    pub static ref PRICE_SHAPE: Regex = Regex::new(r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap();

    // Any run of whitespace, line breaks included
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
