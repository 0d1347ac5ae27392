//! PDF decoding module.

mod extractor;

pub use extractor::{LoadedPdf, PdfExtractor};

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// At least one page carries extractable text.
    Text,
    /// No page carries text (typically a scanned image).
    Empty,
}

impl PdfType {
    /// Classify decoded pages.
    pub fn of(pages: &[PdfPage]) -> Self {
        if pages.iter().any(|p| !p.text.trim().is_empty()) {
            PdfType::Text
        } else {
            PdfType::Empty
        }
    }
}

/// Text of a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text; empty when the page has none.
    pub text: String,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF page decoders.
pub trait PdfProcessor: Send + Sync {
    /// Decode a PDF into per-page text, in page order.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<PdfPage>>;

    /// Short name of the decoding backend, for logs.
    fn backend_name(&self) -> &str;
}
