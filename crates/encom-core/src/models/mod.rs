//! Data models: line items, extraction reports and configuration.

pub mod config;
pub mod line_item;

pub use config::{EncomConfig, ExportConfig, ExtractionConfig, PdfConfig, ServerConfig};
pub use line_item::{
    ExtractedItem, ExtractionReport, Field, LineItem, SkipReason, SkippedCandidate, COLUMNS,
};
