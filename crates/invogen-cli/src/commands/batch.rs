//! Batch command - normalize multiple spreadsheet files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use invogen_core::models::invoice::InvoiceData;
use invogen_core::normalize::parse_workbook_with;

use super::process::{OutputFormat, format_invoices, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV, one line per invoice
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    invoices: Option<Vec<InvoiceData>>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One summary.csv line.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'a str,
    invoice_no: &'a str,
    date: &'a str,
    customer_name: &'a str,
    products: usize,
    taxable: String,
    gst: String,
    grand_total: String,
    processing_time_ms: u64,
    error: &'a str,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "xlsx" | "xls" | "xlsb" | "ods")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
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
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|data| Ok(parse_workbook_with(&data, &config)?));
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(invoices) => {
                debug!(
                    "{}: {} invoices in {}ms",
                    path.display(),
                    invoices.len(),
                    processing_time_ms
                );
                results.push(ProcessResult {
                    path,
                    invoices: Some(invoices),
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
                        invoices: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Write per-file outputs
    let successful: Vec<_> = results.iter().filter(|r| r.invoices.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(invoices), Some(output_dir)) = (&result.invoices, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoices");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content = format_invoices(invoices, args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.invoices {
            Some(invoices) => {
                for invoice in invoices {
                    let totals = invoice.totals();
                    wtr.serialize(SummaryRow {
                        filename,
                        status: "success",
                        invoice_no: &invoice.invoice_no,
                        date: &invoice.date,
                        customer_name: &invoice.customer.name,
                        products: invoice.products.len(),
                        taxable: totals.taxable.to_string(),
                        gst: totals.gst.to_string(),
                        grand_total: totals.grand_total.to_string(),
                        processing_time_ms: result.processing_time_ms,
                        error: "",
                    })?;
                }
            }
            None => {
                wtr.serialize(SummaryRow {
                    filename,
                    status: "error",
                    invoice_no: "",
                    date: "",
                    customer_name: "",
                    products: 0,
                    taxable: String::new(),
                    gst: String::new(),
                    grand_total: String::new(),
                    processing_time_ms: result.processing_time_ms,
                    error: result.error.as_deref().unwrap_or(""),
                })?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
