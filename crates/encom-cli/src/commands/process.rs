//! Process command - convert a single invoice PDF.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use encom_core::models::config::EncomConfig;
use encom_core::{
    convert_pdf, ExportFormat, ExportSink, ExtractionReport, InvoiceParser, PdfExtractor,
};

use super::OutputFormat;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: <stem>_ENCOM.<ext> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,

    /// Show per-item extraction confidence
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading PDF...");
    let data = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    pb.set_message("Extracting line items...");
    let report = extract(&data, &config)?;

    pb.set_message("Writing output...");
    let format = ExportFormat::from(args.format);
    let sink = format.sink(&config.export);
    let bytes = sink.export(&report.line_items())?;

    let output_path = args.output.clone().unwrap_or_else(|| {
        super::output_path_for(&args.input, None, &config.export.file_suffix, sink.extension())
    });
    fs::write(&output_path, &bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    pb.finish_and_clear();

    println!(
        "{} Extracted {} line items from {} pages",
        style("✓").green(),
        report.items.len(),
        report.page_count
    );
    println!(
        "{} Output written to {}",
        style("✓").green(),
        output_path.display()
    );

    print_diagnostics(&report);

    if args.show_confidence {
        print_confidence(&report);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Decode and extract with the configured backend and parser.
pub fn extract(data: &[u8], config: &EncomConfig) -> anyhow::Result<ExtractionReport> {
    let extractor = PdfExtractor::new().with_max_pages(config.pdf.max_pages);
    let parser = InvoiceParser::from_config(config.extraction.clone());

    Ok(convert_pdf(data, &extractor, &parser)?)
}

fn print_diagnostics(report: &ExtractionReport) {
    if !report.skipped.is_empty() {
        eprintln!("{}", style("Skipped candidates:").yellow());
        for skipped in &report.skipped {
            eprintln!(
                "  - page {}, token {}: {}",
                skipped.page, skipped.anchor_index, skipped.reason
            );
        }
    }

    if !report.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &report.warnings {
            eprintln!("  - {}", warning);
        }
    }
}

fn print_confidence(report: &ExtractionReport) {
    println!();
    for extracted in &report.items {
        let defaulted = if extracted.defaulted.is_empty() {
            String::new()
        } else {
            let fields: Vec<String> = extracted.defaulted.iter().map(|f| format!("{:?}", f)).collect();
            format!(" (defaulted: {})", fields.join(", "))
        };
        println!(
            "  item {:>3} {:<20} {:>5.1}%{}",
            extracted.item.item_no,
            extracted.item.mask_name,
            extracted.confidence * 100.0,
            defaulted
        );
    }
    println!(
        "{} Mean extraction confidence: {:.1}%",
        style("ℹ").blue(),
        report.mean_confidence() * 100.0
    );
}
