//! Anchor-based line-item parser.
//!
//! Every occurrence of the packing-unit anchor ("PC") in a page's token
//! stream yields one candidate. Quantity sits right next to the anchor,
//! prices follow it and the mask name, description and row number precede
//! it, each within a bounded window.

use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::line_item::{ExtractionReport, Field, SkipReason, SkippedCandidate};
use crate::pdf::PdfPage;

use super::assemble::assemble;
use super::normalize::tokenize;
use super::rules::{amounts_agree, clean_price_token, is_item_number, is_mask_name, is_quantity};

/// Which neighbor of the anchor supplied the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantitySide {
    /// Token immediately before the anchor.
    Before,
    /// Token immediately after the anchor.
    After,
    /// Neither neighbor was all digits.
    Missing,
}

/// Fields recovered around one anchor, before cleanup and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    /// Index of the anchor in the token stream.
    pub anchor_index: usize,
    /// Row number, when one terminated the backtrack.
    pub item_no: Option<String>,
    /// Description tokens in stream order.
    pub description: Vec<String>,
    /// Hyphenated mask identifier.
    pub mask_name: Option<String>,
    /// All-digit quantity.
    pub quantity: Option<String>,
    /// Where the quantity came from.
    pub quantity_side: QuantitySide,
    /// First price after the anchor.
    pub unit_price: Option<String>,
    /// Second price after the anchor.
    pub amount: Option<String>,
}

/// Outcome for one anchor occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Fields were derived; defaults are applied during assembly.
    Extracted(RawFields),
    /// The anchor was dropped and the scan moved on.
    Skipped {
        anchor_index: usize,
        reason: SkipReason,
    },
}

/// Line-item parser for photomask invoices.
#[derive(Debug, Clone)]
pub struct InvoiceParser {
    config: ExtractionConfig,
}

impl InvoiceParser {
    /// Create a parser with the default invoice layout.
    pub fn new() -> Self {
        Self::from_config(ExtractionConfig::default())
    }

    /// Create a parser from an extraction configuration.
    pub fn from_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set the number of tokens scanned for prices.
    pub fn with_price_window(mut self, window: usize) -> Self {
        self.config.price_window = window;
        self
    }

    /// Set the number of tokens scanned backward for the description.
    pub fn with_backtrack_window(mut self, window: usize) -> Self {
        self.config.backtrack_window = window;
        self
    }

    /// Replace the table-header tokens dropped from descriptions.
    pub fn with_header_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.header_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Derive one candidate per anchor occurrence, in stream order.
    pub fn scan_tokens(&self, tokens: &[String]) -> Vec<Candidate> {
        tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| **token == self.config.anchor)
            .map(|(i, _)| self.derive(tokens, i))
            .collect()
    }

    fn derive(&self, tokens: &[String], i: usize) -> Candidate {
        let (quantity, quantity_side) = self.find_quantity(tokens, i);

        let price_start = match quantity_side {
            QuantitySide::After => i + 2,
            QuantitySide::Before | QuantitySide::Missing => i + 1,
        };
        let (unit_price, amount) = self.find_prices(tokens, price_start);

        let backtrack_start = match quantity_side {
            QuantitySide::Before => i.checked_sub(2),
            QuantitySide::After | QuantitySide::Missing => i.checked_sub(1),
        };
        let (mask_name, item_no, description) = self.backtrack(tokens, backtrack_start);

        // item number and description are only read once a mask is found
        if quantity.is_none() && unit_price.is_none() && mask_name.is_none() {
            return Candidate::Skipped {
                anchor_index: i,
                reason: SkipReason::Isolated,
            };
        }

        Candidate::Extracted(RawFields {
            anchor_index: i,
            item_no,
            description,
            mask_name,
            quantity,
            quantity_side,
            unit_price,
            amount,
        })
    }

    fn find_quantity(&self, tokens: &[String], i: usize) -> (Option<String>, QuantitySide) {
        if let Some(before) = i.checked_sub(1).and_then(|j| tokens.get(j)) {
            if is_quantity(before) {
                return (Some(before.clone()), QuantitySide::Before);
            }
        }
        if let Some(after) = tokens.get(i + 1) {
            if is_quantity(after) {
                return (Some(after.clone()), QuantitySide::After);
            }
        }
        (None, QuantitySide::Missing)
    }

    /// Up to two price-shaped tokens from the window starting at `start`.
    /// Values are kept as printed, whatever their magnitude.
    fn find_prices(&self, tokens: &[String], start: usize) -> (Option<String>, Option<String>) {
        let mut found = tokens
            .iter()
            .skip(start)
            .take(self.config.price_window)
            .filter_map(|token| clean_price_token(token, &self.config.currency))
            .take(2);
        (found.next(), found.next())
    }

    /// Walk backward from `start` collecting mask name, then description
    /// tokens until a row number ends the walk.
    fn backtrack(
        &self,
        tokens: &[String],
        start: Option<usize>,
    ) -> (Option<String>, Option<String>, Vec<String>) {
        let Some(start) = start else {
            return (None, None, Vec::new());
        };

        let mut mask_name = None;
        let mut item_no = None;
        let mut description = Vec::new();

        for token in tokens[..=start].iter().rev().take(self.config.backtrack_window) {
            if !self.config.skip_prefix.is_empty() && token.starts_with(&self.config.skip_prefix) {
                continue;
            }

            if mask_name.is_none() {
                if is_mask_name(token, self.config.min_mask_len) {
                    mask_name = Some(token.clone());
                }
                continue;
            }

            if is_item_number(token, self.config.max_item_no_len) {
                item_no = Some(token.clone());
                break;
            }

            if self.config.header_tokens.iter().any(|h| h == token) {
                continue;
            }

            description.push(token.clone());
        }

        description.reverse();
        (mask_name, item_no, description)
    }

    /// Extract line items from the text of one page.
    pub fn parse_page(&self, page: u32, text: &str) -> ExtractionReport {
        let mut report = ExtractionReport {
            page_count: 1,
            ..Default::default()
        };

        let tokens = tokenize(text);
        if tokens.is_empty() {
            debug!("Page {} has no extractable text", page);
            return report;
        }
        report.pages_with_text = 1;

        let candidates = self.scan_tokens(&tokens);
        debug!(
            "Page {}: {} tokens, {} anchors",
            page,
            tokens.len(),
            candidates.len()
        );

        for candidate in candidates {
            match candidate {
                Candidate::Extracted(raw) => {
                    let extracted = assemble(raw, page, &self.config);
                    let item = &extracted.item;

                    let checkable = !extracted.defaulted.contains(&Field::Quantity)
                        && !extracted.defaulted.contains(&Field::Amount);
                    if checkable
                        && amounts_agree(&item.quantity, &item.unit_price, &item.amount)
                            == Some(false)
                    {
                        report.warnings.push(format!(
                            "page {}, item {} ({}): {} x {} does not equal {}",
                            page,
                            item.item_no,
                            item.mask_name,
                            item.quantity,
                            item.unit_price,
                            item.amount
                        ));
                    }

                    report.items.push(extracted);
                }
                Candidate::Skipped {
                    anchor_index,
                    reason,
                } => {
                    warn!("Page {}: skipping anchor at token {}: {}", page, anchor_index, reason);
                    report.skipped.push(SkippedCandidate {
                        page,
                        anchor_index,
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Extract line items from every page, concatenated in page order.
    pub fn parse_pages(&self, pages: &[PdfPage]) -> ExtractionReport {
        let mut report = ExtractionReport::default();
        for page in pages {
            report.merge(self.parse_page(page.number, &page.text));
        }

        info!(
            "Extracted {} line items from {} pages ({} skipped)",
            report.items.len(),
            report.page_count,
            report.skipped.len()
        );
        report
    }
}

impl Default for InvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}
