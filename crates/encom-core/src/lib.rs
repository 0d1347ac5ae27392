//! Core library for photomask invoice conversion.
//!
//! This crate provides:
//! - PDF decoding into per-page text
//! - Anchor-based line-item extraction from the flattened token stream
//! - Record cleanup and defaults
//! - Spreadsheet (xlsx), CSV and JSON export

pub mod error;
pub mod export;
pub mod invoice;
pub mod models;
pub mod pdf;

pub use error::{EncomError, ExportError, ExtractionError, PdfError, Result};
pub use export::{output_file_name, CsvSink, ExportFormat, ExportSink, JsonSink, XlsxSink};
pub use invoice::InvoiceParser;
pub use models::config::EncomConfig;
pub use models::line_item::{ExtractedItem, ExtractionReport, LineItem};
pub use pdf::{PdfExtractor, PdfPage, PdfProcessor, PdfType};

use tracing::{info, warn};

/// Decode a PDF and extract its line items.
///
/// Fails with [`ExtractionError::NoItems`] when no page yields a record.
pub fn convert_pdf(
    data: &[u8],
    processor: &dyn PdfProcessor,
    parser: &InvoiceParser,
) -> Result<ExtractionReport> {
    let pages = processor.extract_pages(data)?;
    info!(
        "Decoded {} pages with {} ({} bytes)",
        pages.len(),
        processor.backend_name(),
        data.len()
    );

    if PdfType::of(&pages) == PdfType::Empty {
        warn!("PDF has no extractable text; scanned documents are not supported");
    }

    let report = parser.parse_pages(&pages);
    if report.is_empty() {
        return Err(ExtractionError::NoItems.into());
    }

    Ok(report)
}

/// Decode, extract and export in one step.
pub fn convert_pdf_to(
    data: &[u8],
    processor: &dyn PdfProcessor,
    parser: &InvoiceParser,
    sink: &dyn ExportSink,
) -> Result<(ExtractionReport, Vec<u8>)> {
    let report = convert_pdf(data, processor, parser)?;
    let bytes = sink.export(&report.line_items())?;
    Ok((report, bytes))
}
