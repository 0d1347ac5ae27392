//! Turns raw anchor fields into finished line items.

use crate::models::config::ExtractionConfig;
use crate::models::line_item::{ExtractedItem, Field, LineItem, UNIT_PC};

use super::parser::RawFields;
use super::rules::is_quantity;

/// Product-family label that some invoices print twice in the description.
const DOUBLED_FAMILY: &str = "PHOTOMASK EB6X-NIK EB6X-NIK";
const FAMILY: &str = "PHOTOMASK EB6X-NIK";

/// Collapse the doubled product-family label to a single occurrence.
///
/// Only this literal phrase is rewritten; other repetitions are left alone.
pub fn collapse_doubled_family(description: &str) -> String {
    description.replace(DOUBLED_FAMILY, FAMILY)
}

/// Build the final record for one anchor, filling defaults.
pub fn assemble(raw: RawFields, page: u32, config: &ExtractionConfig) -> ExtractedItem {
    let mut defaulted = Vec::new();

    let item_no = match raw.item_no {
        Some(n) if is_quantity(&n) => n,
        _ => {
            defaulted.push(Field::ItemNo);
            "1".to_string()
        }
    };

    let description = collapse_doubled_family(raw.description.join(" ").trim());
    let item_code = if description.is_empty() {
        defaulted.push(Field::ItemCode);
        config.default_description.clone()
    } else {
        description
    };

    let mask_name = raw.mask_name.unwrap_or_else(|| {
        defaulted.push(Field::MaskName);
        String::new()
    });

    let quantity = raw.quantity.unwrap_or_else(|| {
        defaulted.push(Field::Quantity);
        "1".to_string()
    });

    let unit_price = raw.unit_price.unwrap_or_else(|| {
        defaulted.push(Field::UnitPrice);
        "0".to_string()
    });

    let amount = raw.amount.unwrap_or_else(|| {
        defaulted.push(Field::Amount);
        unit_price.clone()
    });

    let confidence = defaulted
        .iter()
        .fold(1.0f32, |acc, field| acc - field.penalty())
        .max(0.0);

    ExtractedItem {
        item: LineItem {
            item_no,
            item_code,
            mask_name,
            quantity,
            unit: UNIT_PC.to_string(),
            unit_price,
            amount,
            currency: config.currency.clone(),
        },
        page,
        anchor_index: raw.anchor_index,
        confidence,
        defaulted,
    }
}
