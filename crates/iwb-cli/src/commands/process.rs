//! Process command - extract data from a single invoice document.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use iwb_core::{DocumentHandle, ExtractionResult, FieldExtractor};

use super::output::{OutputFormat, format_invoice};
use super::{describe_source_error, load_config, load_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file path or http(s) URL (PDF or text)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which fields were found and which are missing
    #[arg(long)]
    show_fields: bool,

    /// Check extracted data for inconsistencies
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let handle = DocumentHandle::parse(&args.input);

    info!("Processing document: {}", handle);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(match handle {
        DocumentHandle::Url(_) => "Downloading document...",
        DocumentHandle::Path(_) => "Reading document...",
    });

    let text = match load_text(&handle, &config).await {
        Ok(text) => text,
        Err(e) => {
            pb.finish_and_clear();
            return Err(describe_source_error(&handle, e));
        }
    };

    pb.set_message("Extracting invoice fields...");
    let result = FieldExtractor::new().parse(&text);
    pb.finish_and_clear();

    report_confidence(&result, config.extraction.min_found_fields);

    if args.validate {
        let issues = result.invoice.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_invoice(&result.invoice, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_fields {
        print_fields(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn report_confidence(result: &ExtractionResult, min_found_fields: usize) {
    for warning in &result.warnings {
        debug!("{}", warning);
    }

    if result.is_low_confidence(min_found_fields) {
        warn!(
            "Only {} fields matched (minimum {})",
            result.found_count(),
            min_found_fields
        );
        eprintln!(
            "{} Low confidence: only {} of {} fields found. The document may not be an invoice.",
            style("⚠").yellow(),
            result.found_count(),
            result.found_count() + result.missing_fields.len()
        );
    }
}

fn print_fields(result: &ExtractionResult) {
    eprintln!();
    for field in &result.found_fields {
        eprintln!("  {} {}", style("✓").green(), field);
    }
    for field in &result.missing_fields {
        eprintln!("  {} {}", style("✗").red(), field);
    }
    eprintln!(
        "{} {} line items",
        style("ℹ").blue(),
        result.invoice.line_items.len()
    );
}
