//! Process command - normalize a single spreadsheet file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use clap::Args;
use console::style;
use tracing::{debug, info};

use invogen_core::models::config::ParseConfig;
use invogen_core::models::invoice::InvoiceData;
use invogen_core::models::session::Session;
use invogen_core::normalize::parse_workbook_with;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input spreadsheet (xlsx, xls, xlsb or ods)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Wrap the result in a named session (JSON output only)
    #[arg(long)]
    session: Option<String>,

    /// Print advisory data-quality issues per invoice
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one line per product
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let invoices = parse_workbook_with(&data, &config)?;

    if invoices.is_empty() {
        eprintln!(
            "{} No invoices found in {}",
            style("!").yellow(),
            args.input.display()
        );
    }

    if args.validate {
        report_issues(&invoices);
    }

    let output = if let Some(name) = &args.session {
        if !matches!(args.format, OutputFormat::Json) {
            anyhow::bail!("Session output is only available as JSON");
        }
        let session = Session::new(name.clone(), Utc::now(), invoices);
        serde_json::to_string(&session)?
    } else {
        format_invoices(&invoices, args.format)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the parse config from an explicit path, or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ParseConfig> {
    Ok(match config_path {
        Some(path) => ParseConfig::from_file(std::path::Path::new(path))?,
        None => ParseConfig::default(),
    })
}

/// Print advisory validation issues to stderr, one block per invoice.
pub fn report_issues(invoices: &[InvoiceData]) {
    for invoice in invoices {
        let issues = invoice.validate();
        if !issues.is_empty() {
            eprintln!(
                "{} {}",
                style("Issues in").yellow(),
                style(&invoice.invoice_no).bold()
            );
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }
}

/// Render a parse result in the requested format.
pub fn format_invoices(invoices: &[InvoiceData], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(invoices)?),
        OutputFormat::Csv => format_csv(invoices),
        OutputFormat::Text => Ok(format_text(invoices)),
    }
}

fn format_csv(invoices: &[InvoiceData]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_no",
        "date",
        "seller_name",
        "customer_name",
        "product_details",
        "hsn_code",
        "qty",
        "rate",
        "gst_percent",
        "taxable_value",
        "gst_amount",
        "line_total",
    ])?;

    for invoice in invoices {
        for product in &invoice.products {
            wtr.write_record([
                invoice.invoice_no.as_str(),
                invoice.date.as_str(),
                invoice.seller.name.as_str(),
                invoice.customer.name.as_str(),
                product.details.as_str(),
                product.hsn_code.as_str(),
                &product.qty.to_string(),
                &product.amount.to_string(),
                &product.gst_percent.to_string(),
                &product.taxable_value().to_string(),
                &product.gst_amount().to_string(),
                &product.line_total().to_string(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(invoices: &[InvoiceData]) -> String {
    let mut output = String::new();

    for invoice in invoices {
        output.push_str(&format!("Invoice: {}\n", invoice.invoice_no));
        output.push_str(&format!("Date: {}\n", invoice.date));
        output.push('\n');

        output.push_str("Seller:\n");
        output.push_str(&format!("  {}\n", invoice.seller.name));
        output.push_str(&format!(
            "  {}, {}\n",
            invoice.seller.address, invoice.seller.pincode
        ));
        if !invoice.seller.gst_no.is_empty() {
            output.push_str(&format!("  GSTIN: {}\n", invoice.seller.gst_no));
        }
        output.push('\n');

        output.push_str("Customer:\n");
        output.push_str(&format!("  {}\n", invoice.customer.name));
        output.push_str(&format!(
            "  {}, {}\n",
            invoice.customer.address, invoice.customer.pincode
        ));
        if !invoice.customer.gst_no.is_empty() {
            output.push_str(&format!("  GSTIN: {}\n", invoice.customer.gst_no));
        }
        if let Some(phone) = &invoice.customer.phone {
            output.push_str(&format!("  Phone: {}\n", phone));
        }
        output.push('\n');

        output.push_str("Products:\n");
        for (i, product) in invoice.products.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (HSN {}) {} x {} @ {}% = {}\n",
                i + 1,
                product.details,
                product.hsn_code,
                product.qty,
                product.amount,
                product.gst_percent,
                product.line_total(),
            ));
        }

        let totals = invoice.totals();
        output.push('\n');
        output.push_str("Totals:\n");
        output.push_str(&format!("  Taxable: {}\n", totals.taxable));
        output.push_str(&format!("  GST:     {}\n", totals.gst));
        output.push_str(&format!("  Total:   {}\n", totals.grand_total));
        output.push('\n');
    }

    output
}
