//! Excel workbook output.

use rust_xlsxwriter::{Format, Workbook};

use super::{ExportSink, Result, XLSX_CONTENT_TYPE};
use crate::models::line_item::{LineItem, COLUMNS};

/// Writes line items to a single-sheet xlsx workbook.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    sheet_name: String,
}

impl XlsxSink {
    /// Create a sink writing to a worksheet with the given name.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl Default for XlsxSink {
    fn default() -> Self {
        Self::new("Invoice_Items")
    }
}

impl ExportSink for XlsxSink {
    fn export(&self, items: &[LineItem]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, title) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        // Cells stay text so values read back exactly as printed on the invoice
        for (row, item) in items.iter().enumerate() {
            for (col, value) in item.cells().iter().enumerate() {
                worksheet.write_string(row as u32 + 1, col as u16, *value)?;
            }
        }

        worksheet.autofit();

        Ok(workbook.save_to_buffer()?)
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}
