//! Price token cleanup and decimal parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::PRICE_SHAPE;

/// Strip thousands separators and the currency literal from a token.
///
/// Returns the cleaned value when what remains is a non-negative decimal
/// number (digits with at most one decimal point).
pub fn clean_price_token(token: &str, currency: &str) -> Option<String> {
    let mut cleaned = token.replace(',', "");
    if !currency.is_empty() {
        cleaned = cleaned.replace(currency, "");
    }

    PRICE_SHAPE.is_match(&cleaned).then_some(cleaned)
}

/// Parse a cleaned price or quantity into a decimal.
pub fn parse_price(value: &str) -> Option<Decimal> {
    let normalized = if value.ends_with('.') {
        value.trim_end_matches('.')
    } else {
        value
    };

    if let Some(fraction) = normalized.strip_prefix('.') {
        return Decimal::from_str(&format!("0.{}", fraction)).ok();
    }

    Decimal::from_str(normalized).ok()
}

/// Check whether `quantity * unit_price` agrees with `amount` to the cent.
///
/// Returns `None` when any of the three values does not parse.
pub fn amounts_agree(quantity: &str, unit_price: &str, amount: &str) -> Option<bool> {
    let quantity = parse_price(quantity)?;
    let unit_price = parse_price(unit_price)?;
    let amount = parse_price(amount)?;

    let expected = quantity.checked_mul(unit_price)?;
    Some((expected - amount).abs() <= Decimal::new(1, 2))
}
