//! Invoice data models produced by the normalization pipeline.
//!
//! Serialized field names are camelCase so the wire shape matches what
//! downstream rendering and editing collaborators consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selling party on an invoice. Populated once, from the first row of
/// an invoice group, and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub name: String,
    pub address: String,
    pub pincode: String,
    pub gst_no: String,
}

/// Buying party on an invoice. Same single-population rule as
/// [`Seller`]; on single-party sheets the generic name/address/pincode
/// columns fill these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub address: String,
    pub pincode: String,
    pub gst_no: String,

    /// Contact number, when the sheet carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A single product line. One is appended per spreadsheet row carrying
/// a non-empty invoice number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product description.
    pub details: String,

    /// HSN classification code.
    pub hsn_code: String,

    /// Quantity.
    pub qty: Decimal,

    /// Rate per unit, before tax.
    pub amount: Decimal,

    /// Applicable GST rate in percent.
    pub gst_percent: Decimal,
}

impl Product {
    /// Net value of the line before tax.
    pub fn taxable_value(&self) -> Decimal {
        self.qty * self.amount
    }

    /// Tax charged on the line.
    pub fn gst_amount(&self) -> Decimal {
        self.taxable_value() * self.gst_percent / Decimal::ONE_HUNDRED
    }

    /// Gross value of the line.
    pub fn line_total(&self) -> Decimal {
        self.taxable_value() + self.gst_amount()
    }
}

/// A normalized invoice: one per distinct invoice number in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    /// Invoice number; non-empty and unique within a parse result.
    pub invoice_no: String,

    /// Formatted invoice date. Serial dates render as
    /// `DD/MM/YYYY H:MM:SS AM|PM`; textual dates stay as typed.
    pub date: String,

    /// Issuing party.
    pub seller: Seller,

    /// Receiving party.
    pub customer: Customer,

    /// Product lines, in row order.
    pub products: Vec<Product>,
}

/// Invoice-level sums of the per-line values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of taxable line values.
    pub taxable: Decimal,

    /// Sum of line tax amounts.
    pub gst: Decimal,

    /// Taxable plus tax.
    pub grand_total: Decimal,
}

impl InvoiceData {
    /// Compute the invoice totals from its product lines.
    pub fn totals(&self) -> InvoiceTotals {
        let taxable: Decimal = self.products.iter().map(Product::taxable_value).sum();
        let gst: Decimal = self.products.iter().map(Product::gst_amount).sum();
        InvoiceTotals {
            taxable,
            gst,
            grand_total: taxable + gst,
        }
    }

    /// Advisory data-quality check. Parsing never depends on this;
    /// callers wanting stricter guarantees than best-effort coercion
    /// run it after the parse.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.invoice_no.is_empty() {
            issues.push("Missing invoice number".to_string());
        }

        if self.seller.name.is_empty() {
            issues.push("Missing seller name".to_string());
        }

        if self.customer.name.is_empty() {
            issues.push("Missing customer name".to_string());
        }

        if self.products.is_empty() {
            issues.push("No product lines".to_string());
        }

        for (i, product) in self.products.iter().enumerate() {
            if product.details.is_empty() {
                issues.push(format!("Product {} has no details", i + 1));
            }
            if product.qty <= Decimal::ZERO {
                issues.push(format!("Product {} has a non-positive quantity", i + 1));
            }
            if product.amount <= Decimal::ZERO {
                issues.push(format!("Product {} has a non-positive rate", i + 1));
            }
        }

        issues
    }
}
