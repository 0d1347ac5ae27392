//! Configuration structures for the conversion pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EncomError, Result};

use crate::models::line_item::{CURRENCY_USD, UNIT_PC};

/// Main configuration for encom.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncomConfig {
    /// Upload endpoint configuration.
    pub server: ServerConfig,

    /// PDF decoding configuration.
    pub pdf: PdfConfig,

    /// Line-item extraction configuration.
    pub extraction: ExtractionConfig,

    /// Spreadsheet export configuration.
    pub export: ExportConfig,
}

/// Upload endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Largest accepted request body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

/// PDF decoding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { max_pages: 0 }
    }
}

/// Line-item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Token every line item is anchored on.
    pub anchor: String,

    /// Tokens scanned after the anchor for unit price and amount.
    pub price_window: usize,

    /// Tokens scanned before the anchor for mask name, description and item number.
    pub backtrack_window: usize,

    /// Minimum length of a hyphenated mask name.
    pub min_mask_len: usize,

    /// Longest all-digit token accepted as an item number.
    pub max_item_no_len: usize,

    /// Prefix of internal reference codes that never belong to a description.
    pub skip_prefix: String,

    /// Table-header tokens dropped from descriptions.
    pub header_tokens: Vec<String>,

    /// Description used when none is recovered.
    pub default_description: String,

    /// Currency literal stripped from price tokens and written to the Term column.
    pub currency: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            anchor: UNIT_PC.to_string(),
            price_window: 6,
            backtrack_window: 15,
            min_mask_len: 10,
            max_item_no_len: 2,
            skip_prefix: "RRCA".to_string(),
            header_tokens: ["NAME", "MASK", "DESCRIPTION", "ITEM", "Item", "PR)", "Code(Pre"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_description: "PHOTOMASK".to_string(),
            currency: CURRENCY_USD.to_string(),
        }
    }
}

/// Spreadsheet export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Worksheet name.
    pub sheet_name: String,

    /// Appended to the source file stem when naming the output.
    pub file_suffix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Invoice_Items".to_string(),
            file_suffix: "_ENCOM".to_string(),
        }
    }
}

impl EncomConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| EncomError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| EncomError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `ENCOM_HOST` / `ENCOM_PORT` overrides to the server section.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("ENCOM_HOST").ok(),
            std::env::var("ENCOM_PORT").ok(),
        )
    }

    fn with_overrides(mut self, host: Option<String>, port: Option<String>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = port.and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        self
    }

    /// Address the upload endpoint binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
