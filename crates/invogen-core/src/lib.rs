//! Core library for invoice spreadsheet normalization.
//!
//! This crate provides:
//! - Workbook decoding (first sheet, header row establishes column names)
//! - Fuzzy logical-field resolution over raw spreadsheet headers
//! - Numeric, GST-percent and date coercion policies
//! - Row-to-invoice aggregation grouped by invoice number

pub mod error;
pub mod models;
pub mod normalize;
pub mod sheet;

pub use error::{DecodeError, InvogenError, Result};
pub use models::config::ParseConfig;
pub use models::invoice::{Customer, InvoiceData, InvoiceTotals, Product, Seller};
pub use models::session::{Session, InvoiceStat, build_invoice_stats};
pub use normalize::{aggregate, parse_workbook, parse_workbook_with};
pub use sheet::{CellValue, RowRecord, decode_rows};
