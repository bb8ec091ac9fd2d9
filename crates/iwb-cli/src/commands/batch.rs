//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use iwb_core::models::config::IwbConfig;
use iwb_core::{DocumentHandle, DocumentSource, ExtractionResult, FieldExtractor, FileSource};

use super::describe_source_error;
use super::load_config;
use super::output::{OutputFormat, format_invoice};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files (.pdf, .txt)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let source = FileSource::new(config.fetch.clone(), config.document.clone());
    let extractor = FieldExtractor::new();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_single_file(&path, &source, &extractor);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(extraction) => {
                if extraction.is_low_confidence(config.extraction.min_found_fields) {
                    warn!(
                        "{}: only {} fields matched",
                        path.display(),
                        extraction.found_count()
                    );
                }
                results.push(ProcessResult {
                    path,
                    extraction: Some(extraction),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        extraction: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        write_outputs(output_dir, &results, args.format)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results, &config)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    source: &FileSource,
    extractor: &FieldExtractor,
) -> anyhow::Result<ExtractionResult> {
    let handle = DocumentHandle::Path(path.to_path_buf());
    let text = source
        .fetch_text(&handle)
        .map_err(|e| describe_source_error(&handle, e))?;

    Ok(extractor.parse(&text))
}

fn write_outputs(
    output_dir: &Path,
    results: &[ProcessResult],
    format: OutputFormat,
) -> anyhow::Result<()> {
    for result in results {
        let Some(extraction) = &result.extraction else {
            continue;
        };

        let output_name = result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("invoice");
        let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

        fs::write(&output_path, format_invoice(&extraction.invoice, format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult], config: &IwbConfig) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "client",
        "invoice_date",
        "order_number",
        "total",
        "revenue_total",
        "found_fields",
        "line_items",
        "low_confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let record = match &result.extraction {
            Some(extraction) => {
                let invoice = &extraction.invoice;
                [
                    filename,
                    "success".to_string(),
                    invoice.client.clone().unwrap_or_default(),
                    invoice.invoice_date.clone().unwrap_or_default(),
                    invoice.order_number.clone().unwrap_or_default(),
                    invoice.total.map(|d| d.to_string()).unwrap_or_default(),
                    invoice.revenue_total.map(|d| d.to_string()).unwrap_or_default(),
                    extraction.found_count().to_string(),
                    invoice.line_items.len().to_string(),
                    extraction
                        .is_low_confidence(config.extraction.min_found_fields)
                        .to_string(),
                    result.processing_time_ms.to_string(),
                    String::new(),
                ]
            }
            None => [
                filename,
                "error".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                result.processing_time_ms.to_string(),
                result.error.clone().unwrap_or_default(),
            ],
        };

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
