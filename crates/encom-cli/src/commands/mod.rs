pub mod batch;
pub mod config;
pub mod process;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use tracing::debug;

use encom_core::models::config::EncomConfig;
use encom_core::ExportFormat;

/// Output format accepted by `process` and `batch`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook
    Xlsx,
    /// CSV
    Csv,
    /// JSON array of line items
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => ExportFormat::Xlsx,
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

/// `<config_dir>/encom/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("encom")
        .join("config.json")
}

/// Resolve the config file in use: `--config` if given, else the default path.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration, falling back to defaults when no file exists,
/// then apply environment overrides.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<EncomConfig> {
    let path = config_path(explicit);

    let config = if path.exists() {
        debug!("Loading config from {}", path.display());
        EncomConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    } else {
        EncomConfig::default()
    };

    Ok(config.with_env_overrides())
}

/// Output path for `input`, placed in `dir` (or beside the input).
pub fn output_path_for(input: &Path, dir: Option<&Path>, suffix: &str, extension: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = encom_core::output_file_name(&file_name, suffix, extension);

    match dir.or_else(|| input.parent()) {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
