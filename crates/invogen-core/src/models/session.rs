//! Caller-owned session and reporting models.
//!
//! The core defines these shapes and their construction; persisting them
//! is the job of the session-store collaborator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::invoice::InvoiceData;

/// A named batch of parsed invoices, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Random UUID assigned at creation.
    pub id: String,

    /// Display name chosen by the caller.
    pub name: String,

    /// Creation time, milliseconds since the Unix epoch.
    pub created_at: i64,

    /// The parse result this session wraps.
    pub invoices: Vec<InvoiceData>,
}

impl Session {
    /// Create a session with a fresh random id.
    pub fn new(
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        invoices: Vec<InvoiceData>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: created_at.timestamp_millis(),
            invoices,
        }
    }
}

/// Flat per-invoice record for usage reporting. Field names stay
/// snake_case to match the reporting store's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceStat {
    pub invoice_no: String,

    /// Grand total including tax, rounded to two decimal places.
    pub amount: Decimal,

    pub customer_name: String,

    /// RFC 3339 timestamp of the parse, supplied by the caller.
    pub created_at: String,

    pub user_id: String,
}

/// Build reporting records for a parse result.
///
/// Timestamp and user id are parameters so this stays a pure function
/// of its inputs.
pub fn build_invoice_stats(
    invoices: &[InvoiceData],
    user_id: &str,
    created_at: DateTime<Utc>,
) -> Vec<InvoiceStat> {
    let created_at = created_at.to_rfc3339();
    invoices
        .iter()
        .map(|invoice| InvoiceStat {
            invoice_no: invoice.invoice_no.clone(),
            amount: invoice.totals().grand_total.round_dp(2),
            customer_name: invoice.customer.name.clone(),
            created_at: created_at.clone(),
            user_id: user_id.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;
    use crate::models::invoice::{Customer, Product};

    #[test]
    fn test_session_wraps_invoices() {
        let created = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        let session = Session::new("January batch", created, Vec::new());

        assert_eq!(session.name, "January batch");
        assert_eq!(session.created_at, created.timestamp_millis());
        assert!(!session.id.is_empty());
    }

    #[test]
    fn test_stats_round_grand_total() {
        let invoice = InvoiceData {
            invoice_no: "INV-1".to_string(),
            customer: Customer {
                name: "Bob".to_string(),
                ..Default::default()
            },
            products: vec![Product {
                details: "Widget".to_string(),
                hsn_code: String::new(),
                qty: Decimal::from(3),
                amount: Decimal::from_str("33.33").unwrap(),
                gst_percent: Decimal::from(18),
            }],
            ..Default::default()
        };
        let created = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();

        let stats = build_invoice_stats(&[invoice], "user-1", created);

        assert_eq!(stats.len(), 1);
        // 3 x 33.33 = 99.99 net, 117.9882 gross, rounded to 2 dp.
        assert_eq!(stats[0].amount, Decimal::from_str("117.99").unwrap());
        assert_eq!(stats[0].customer_name, "Bob");
        assert_eq!(stats[0].user_id, "user-1");
    }
}
