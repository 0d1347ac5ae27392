//! Error types for the encom-core library.

use thiserror::Error;

/// Main error type for the encom library.
#[derive(Error, Debug)]
pub enum EncomError {
    /// PDF decoding error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Line-item extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Spreadsheet export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF decoding.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to line-item extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No line item could be recovered from any page of the document.
    #[error("no line items found (the document may not match the expected invoice layout)")]
    NoItems,
}

/// Errors raised while serializing line items.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The xlsx writer rejected the workbook.
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The CSV writer failed.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Flushing the in-memory CSV buffer failed.
    #[error("buffer: {0}")]
    Buffer(String),
}

/// Result type for the encom library.
pub type Result<T> = std::result::Result<T, EncomError>;
