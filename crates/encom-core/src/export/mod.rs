//! Tabular export of extracted line items.

mod csv_sink;
mod xlsx;

pub use csv_sink::CsvSink;
pub use xlsx::XlsxSink;

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::line_item::LineItem;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// MIME type of xlsx workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Serializes a document's line items into a file.
pub trait ExportSink: Send + Sync {
    /// Render all records, one row per item, header row first.
    fn export(&self, items: &[LineItem]) -> Result<Vec<u8>>;

    /// MIME type of the produced file.
    fn content_type(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;
}

/// Line items as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl ExportSink for JsonSink {
    fn export(&self, items: &[LineItem]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(items)?)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Output formats known to the CLI and server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// Build the sink for this format.
    pub fn sink(self, config: &ExportConfig) -> Box<dyn ExportSink> {
        match self {
            ExportFormat::Xlsx => Box::new(XlsxSink::new(&config.sheet_name)),
            ExportFormat::Csv => Box::new(CsvSink),
            ExportFormat::Json => Box::new(JsonSink),
        }
    }
}

/// Name of the converted file: directories and a trailing `.pdf` are
/// stripped from the upload name, then `suffix` and `extension` appended.
pub fn output_file_name(original: &str, suffix: &str, extension: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);

    let cut = base.len().saturating_sub(4);
    let stem = match base.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &base[..cut],
        _ => base,
    };
    let stem = if stem.is_empty() { "invoice" } else { stem };

    format!("{}{}.{}", stem, suffix, extension)
}
