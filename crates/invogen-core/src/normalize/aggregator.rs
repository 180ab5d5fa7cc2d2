//! Row-to-invoice aggregation.

use std::collections::HashMap;

use tracing::{debug, info};

use super::coerce::{coerce_gst_percent, coerce_number, format_date_value};
use crate::models::config::ParseConfig;
use crate::models::invoice::{Customer, InvoiceData, Product, Seller};
use crate::sheet::{CellValue, RowRecord};

/// Fold row records into invoices, grouped by invoice number.
///
/// Rows without an invoice number contribute nothing. The first row of a
/// group populates seller, customer and date; every row of the group,
/// including the first, appends one product. The expected input shape
/// is one row per product with header-level data repeated per row.
/// Output preserves the order invoice numbers were first seen in.
pub fn aggregate(rows: &[RowRecord], config: &ParseConfig) -> Vec<InvoiceData> {
    let mut invoices: Vec<InvoiceData> = Vec::new();
    let mut index_by_no: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let invoice_no = row
            .resolve_non_empty("invoice no", None)
            .map(CellValue::display)
            .unwrap_or_default();
        if invoice_no.is_empty() {
            debug!("skipping row without invoice number");
            continue;
        }

        let index = match index_by_no.get(&invoice_no) {
            Some(&index) => index,
            None => {
                debug!("new invoice group '{}'", invoice_no);
                invoices.push(new_invoice(row, invoice_no.clone()));
                index_by_no.insert(invoice_no, invoices.len() - 1);
                invoices.len() - 1
            }
        };

        invoices[index].products.push(read_product(row, config));
    }

    info!(
        "aggregated {} invoices from {} rows",
        invoices.len(),
        rows.len()
    );
    invoices
}

/// Build the header-level record from the first row of an invoice group.
/// Later rows of the same group never touch these fields.
fn new_invoice(row: &RowRecord, invoice_no: String) -> InvoiceData {
    let seller = Seller {
        name: row.resolve_text("seller name", None),
        address: row.resolve_text("seller address", None),
        pincode: row.resolve_text("seller pincode", None),
        gst_no: row.resolve_text("seller gst no", None),
    };

    // Single-party sheets carry generic name/address/pincode columns;
    // those belong to the customer as long as they are not seller columns.
    let customer = Customer {
        name: resolve_with_fallback(row, "customer name", "name"),
        address: resolve_with_fallback(row, "customer address", "address"),
        pincode: resolve_with_fallback(row, "customer pincode", "pincode"),
        gst_no: row
            .resolve_non_empty("gst no if available", None)
            .or_else(|| row.resolve_non_empty("customer gst", None))
            .map(CellValue::display)
            .unwrap_or_default(),
        phone: resolve_phone(row),
    };

    let date = row
        .resolve_non_empty("invoice date", None)
        .or_else(|| row.resolve_non_empty("date", None));

    InvoiceData {
        invoice_no,
        date: format_date_value(date),
        seller,
        customer,
        products: Vec::new(),
    }
}

fn resolve_with_fallback(row: &RowRecord, key: &str, generic: &str) -> String {
    row.resolve_non_empty(key, None)
        .or_else(|| row.resolve_non_empty(generic, Some("seller")))
        .map(CellValue::display)
        .unwrap_or_default()
}

fn resolve_phone(row: &RowRecord) -> Option<String> {
    ["phone", "mobile", "contact"]
        .iter()
        .find_map(|key| row.resolve_non_empty(key, None))
        .map(CellValue::display)
}

/// Read one product line. Every field coerces; nothing here can fail.
fn read_product(row: &RowRecord, config: &ParseConfig) -> Product {
    Product {
        details: row.resolve_text("product details", None),
        hsn_code: row.resolve_text("hsn code", None),
        qty: coerce_number(row.resolve("qty", None)),
        amount: coerce_number(row.resolve("product amount", None)),
        gst_percent: coerce_gst_percent(
            row.resolve("gst percent", None),
            config.normalize_fractional_gst,
        ),
    }
}
