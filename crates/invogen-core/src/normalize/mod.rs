//! Spreadsheet-to-invoice normalization pipeline.

pub mod aggregator;
pub mod coerce;

pub use aggregator::aggregate;
pub use coerce::{coerce_gst_percent, coerce_number, format_date_value};

use crate::error::DecodeError;
use crate::models::config::ParseConfig;
use crate::models::invoice::InvoiceData;
use crate::sheet;

/// Decode a workbook and aggregate it with the default configuration.
///
/// See [`parse_workbook_with`].
pub fn parse_workbook(data: &[u8]) -> Result<Vec<InvoiceData>, DecodeError> {
    parse_workbook_with(data, &ParseConfig::default())
}

/// Decode a workbook buffer and aggregate its rows into invoices.
///
/// Single-shot: a decode failure is terminal for the call and yields no
/// partial result. Everything after decoding is a pure function of the
/// row content and the config, so identical bytes produce structurally
/// identical results.
pub fn parse_workbook_with(
    data: &[u8],
    config: &ParseConfig,
) -> Result<Vec<InvoiceData>, DecodeError> {
    let rows = sheet::decode_rows(data)?;
    Ok(aggregate(&rows, config))
}
