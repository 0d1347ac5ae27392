//! CSV output with the spreadsheet column layout.

use super::{ExportSink, Result};
use crate::error::ExportError;
use crate::models::line_item::{LineItem, COLUMNS};

/// Writes line items as comma-separated values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl ExportSink for CsvSink {
    fn export(&self, items: &[LineItem]) -> Result<Vec<u8>> {
        let mut wtr = ::csv::Writer::from_writer(vec![]);

        wtr.write_record(COLUMNS)?;
        for item in items {
            wtr.write_record(item.cells())?;
        }

        wtr.into_inner()
            .map_err(|e| ExportError::Buffer(e.to_string()))
    }

    fn content_type(&self) -> &'static str {
        "text/csv; charset=utf-8"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}
