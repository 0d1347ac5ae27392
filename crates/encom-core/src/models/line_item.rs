//! Line-item records recovered from photomask invoices.

use serde::{Deserialize, Serialize};

/// Packing unit printed on every line of the invoice table.
pub const UNIT_PC: &str = "PC";

/// Currency of every amount on the invoice.
pub const CURRENCY_USD: &str = "USD";

/// Spreadsheet column headers, in output order.
pub const COLUMNS: [&str; 8] = [
    "ITEM",
    "Item Code(Pre PR)",
    "MASK NAME",
    "Q'TY",
    "U/M",
    "U/P",
    "AMOUNT",
    "Term",
];

/// A single line item on the invoice.
///
/// Every field is always populated; values that could not be recovered from
/// the page carry their documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Sequential number on the invoice ("1" when not recoverable).
    pub item_no: String,

    /// Free-text description ("Item Code(Pre PR)" column).
    pub item_code: String,

    /// Hyphenated mask identifier, empty when not recoverable.
    pub mask_name: String,

    /// Quantity ("1" by default).
    pub quantity: String,

    /// Unit of measure, always "PC".
    pub unit: String,

    /// Unit price with separators and currency stripped ("0" by default).
    pub unit_price: String,

    /// Line amount (falls back to the unit price).
    pub amount: String,

    /// Currency, always "USD".
    pub currency: String,
}

impl LineItem {
    /// Cells in spreadsheet column order.
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.item_no,
            &self.item_code,
            &self.mask_name,
            &self.quantity,
            &self.unit,
            &self.unit_price,
            &self.amount,
            &self.currency,
        ]
    }
}

/// Fields that can fall back to a default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ItemNo,
    ItemCode,
    MaskName,
    Quantity,
    UnitPrice,
    Amount,
}

impl Field {
    /// Confidence lost when this field carries its default.
    pub fn penalty(self) -> f32 {
        match self {
            Field::MaskName | Field::UnitPrice => 0.3,
            Field::ItemNo | Field::ItemCode | Field::Quantity | Field::Amount => 0.1,
        }
    }
}

/// A line item together with where and how it was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// The assembled record.
    pub item: LineItem,

    /// Page number (1-indexed).
    pub page: u32,

    /// Index of the anchor token within the page token stream.
    pub anchor_index: usize,

    /// Extraction confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Fields that fell back to their defaults.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaulted: Vec<Field>,
}

/// Why an anchor did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No quantity, price or mask name was found in any window around the
    /// anchor, whichever side of the page it sits on.
    Isolated,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Isolated => write!(f, "no fields found near the anchor"),
        }
    }
}

/// An anchor that was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    /// Page number (1-indexed).
    pub page: u32,
    /// Index of the anchor token within the page token stream.
    pub anchor_index: usize,
    /// Reason for dropping it.
    pub reason: SkipReason,
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Items in page order, then stream order.
    pub items: Vec<ExtractedItem>,

    /// Dropped anchors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedCandidate>,

    /// Consistency warnings. These never alter a record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Number of pages inspected.
    pub page_count: u32,

    /// Number of pages that carried any text.
    pub pages_with_text: u32,
}

impl ExtractionReport {
    /// Plain records, in order.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(|i| i.item.clone()).collect()
    }

    /// Check whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Mean confidence over all items (0.0 when empty).
    pub fn mean_confidence(&self) -> f32 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().map(|i| i.confidence).sum::<f32>() / self.items.len() as f32
    }

    /// Append another report (the next page) to this one.
    pub fn merge(&mut self, other: ExtractionReport) {
        self.items.extend(other.items);
        self.skipped.extend(other.skipped);
        self.warnings.extend(other.warnings);
        self.page_count += other.page_count;
        self.pages_with_text += other.pages_with_text;
    }
}
