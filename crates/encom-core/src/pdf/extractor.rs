//! PDF page text extraction using lopdf and pdf-extract.

use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

use super::{PdfPage, PdfProcessor, Result};
use crate::error::PdfError;

/// PDF page decoder backed by lopdf (structure) and pdf-extract (text).
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    /// Maximum pages to decode (0 = unlimited).
    max_pages: usize,
}

/// A PDF that passed structural checks.
#[derive(Debug)]
pub struct LoadedPdf {
    /// Bytes handed to the text extractor (decrypted and truncated when needed).
    pub data: Vec<u8>,
    /// Number of pages in the original page tree.
    pub page_count: u32,
    /// Number of pages left in `data`.
    pub decoded_pages: u32,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { max_pages: 0 }
    }

    /// Limit the number of decoded pages (0 = unlimited).
    ///
    /// Pages past the limit are removed from the page tree before any text
    /// is extracted, so they are never decoded.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Parse the document structure, decrypting empty-password PDFs and
    /// dropping pages past the configured limit.
    pub fn load(&self, data: &[u8]) -> Result<LoadedPdf> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let encrypted = doc.is_encrypted();
        if encrypted {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let limit = u32::try_from(self.max_pages).unwrap_or(u32::MAX);
        let truncated = limit > 0 && page_count > limit;
        if truncated {
            let excess: Vec<u32> = (limit + 1..=page_count).collect();
            doc.delete_pages(&excess);
            debug!("Dropped {} pages past the limit of {}", excess.len(), limit);
        }

        // pdf-extract reads the bytes, not the lopdf document
        let data = if encrypted || truncated {
            let mut rewritten = Vec::new();
            doc.save_to(&mut rewritten)
                .map_err(|e| PdfError::Parse(format!("Failed to rewrite PDF: {}", e)))?;
            rewritten
        } else {
            data.to_vec()
        };

        let decoded_pages = if truncated { limit } else { page_count };
        debug!("Loaded PDF with {} pages ({} to decode)", page_count, decoded_pages);
        Ok(LoadedPdf {
            data,
            page_count,
            decoded_pages,
        })
    }
}

/// Extract one string per page.
///
/// pdf-extract panics on some malformed documents instead of returning an
/// error, so the call runs behind an unwind boundary.
fn extract_page_texts(data: &[u8]) -> Result<Vec<String>> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(PdfError::TextExtraction(e.to_string())),
        Err(_) => Err(PdfError::TextExtraction(
            "text extraction panicked (malformed document)".to_string(),
        )),
    }
}

impl PdfProcessor for PdfExtractor {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<PdfPage>> {
        let loaded = self.load(data)?;
        let texts = extract_page_texts(&loaded.data)?;

        if texts.len() != loaded.decoded_pages as usize {
            debug!(
                "Page tree has {} pages, text extractor returned {}",
                loaded.decoded_pages,
                texts.len()
            );
        }

        let limit = if self.max_pages == 0 {
            usize::MAX
        } else {
            self.max_pages
        };

        Ok(texts
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, text)| PdfPage {
                number: i as u32 + 1,
                text,
            })
            .collect())
    }

    fn backend_name(&self) -> &str {
        "pdf-extract"
    }
}
