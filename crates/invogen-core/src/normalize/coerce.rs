//! Numeric and date coercion policies.
//!
//! Spreadsheet input is unreliable user data, so every policy here is a
//! total function: malformed input coerces to a definite value instead
//! of failing the parse.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::sheet::CellValue;

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch.
const SERIAL_UNIX_OFFSET_DAYS: f64 = 25_569.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Coerce a resolved cell to a number.
///
/// Numeric cells pass through. Textual cells are stripped to digits,
/// `.` and `-` before parsing, so `"1,234.50"` reads as `1234.5`.
/// Unparsable or missing input coerces to zero.
pub fn coerce_number(value: Option<&CellValue>) -> Decimal {
    match value {
        Some(CellValue::Number(n)) => Decimal::from_f64(*n).unwrap_or_default(),
        Some(CellValue::Text(s)) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            Decimal::from_str(&cleaned).unwrap_or_default()
        }
        None => Decimal::ZERO,
    }
}

/// Coerce a GST percentage.
///
/// Textual cells drop a trailing `%` before parsing; unparsable input
/// coerces to zero. With `normalize` set, values strictly between 0 and
/// 1 are read as fractional rates and scaled to percentages (`0.18`
/// reads as `18`). The threshold cannot tell a genuine sub-1% rate from
/// a fractional one; inputs carrying such rates disable normalization
/// through the parse config.
pub fn coerce_gst_percent(value: Option<&CellValue>, normalize: bool) -> Decimal {
    let percent = match value {
        Some(CellValue::Number(n)) => Decimal::from_f64(*n).unwrap_or_default(),
        Some(CellValue::Text(s)) => {
            Decimal::from_str(s.trim().trim_end_matches('%').trim_end()).unwrap_or_default()
        }
        None => Decimal::ZERO,
    };

    if normalize && percent > Decimal::ZERO && percent < Decimal::ONE {
        percent * Decimal::ONE_HUNDRED
    } else {
        percent
    }
}

/// Format a resolved date cell.
///
/// Numeric cells are spreadsheet serial dates and format as
/// `DD/MM/YYYY H:MM:SS AM|PM` using UTC components exclusively; textual
/// cells pass through unmodified, with no reformatting or validation.
/// A serial outside the representable range falls back to the raw
/// number's display string.
pub fn format_date_value(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Number(serial)) => {
            format_serial_date(*serial).unwrap_or_else(|| CellValue::Number(*serial).display())
        }
        Some(CellValue::Text(s)) => s.clone(),
        None => String::new(),
    }
}

/// Serial day-count to a 12-hour-clock timestamp string. Hour 0 renders
/// as 12 AM, hour 12 as 12 PM.
fn format_serial_date(serial: f64) -> Option<String> {
    let millis = ((serial - SERIAL_UNIX_OFFSET_DAYS) * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    let utc = DateTime::from_timestamp_millis(millis as i64)?;

    let (hour, meridiem) = match utc.hour() {
        0 => (12, "AM"),
        h @ 1..=11 => (h, "AM"),
        12 => (12, "PM"),
        h => (h - 12, "PM"),
    };

    Some(format!(
        "{:02}/{:02}/{} {}:{:02}:{:02} {}",
        utc.day(),
        utc.month(),
        utc.year(),
        hour,
        utc.minute(),
        utc.second(),
        meridiem,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(
            coerce_number(Some(&text("1,234.50"))),
            Decimal::from_str("1234.5").unwrap()
        );
        assert_eq!(coerce_number(Some(&text("abc"))), Decimal::ZERO);
        assert_eq!(coerce_number(Some(&text(""))), Decimal::ZERO);
        assert_eq!(
            coerce_number(Some(&CellValue::Number(1234.5))),
            Decimal::from_str("1234.5").unwrap()
        );
        assert_eq!(coerce_number(None), Decimal::ZERO);
    }

    #[test]
    fn test_coerce_number_currency_prefix() {
        assert_eq!(
            coerce_number(Some(&text("Rs. 450"))),
            Decimal::from_str("450").unwrap()
        );
    }

    #[test]
    fn test_coerce_gst_percent() {
        assert_eq!(
            coerce_gst_percent(Some(&CellValue::Number(0.18)), true),
            Decimal::from(18)
        );
        assert_eq!(
            coerce_gst_percent(Some(&CellValue::Number(18.0)), true),
            Decimal::from(18)
        );
        assert_eq!(
            coerce_gst_percent(Some(&CellValue::Number(0.0)), true),
            Decimal::ZERO
        );
        assert_eq!(coerce_gst_percent(Some(&text("18%")), true), Decimal::from(18));
        assert_eq!(coerce_gst_percent(Some(&text("n/a")), true), Decimal::ZERO);
        assert_eq!(coerce_gst_percent(None, true), Decimal::ZERO);
    }

    #[test]
    fn test_coerce_gst_percent_without_normalization() {
        assert_eq!(
            coerce_gst_percent(Some(&CellValue::Number(0.18)), false),
            Decimal::from_str("0.18").unwrap()
        );
        assert_eq!(
            coerce_gst_percent(Some(&CellValue::Number(18.0)), false),
            Decimal::from(18)
        );
    }

    #[test]
    fn test_serial_date_fixture() {
        // Regression fixture: serial 45000 is 2023-03-15 midnight UTC.
        assert_eq!(
            format_date_value(Some(&CellValue::Number(45000.0))),
            "15/03/2023 12:00:00 AM"
        );
        assert_eq!(
            format_date_value(Some(&CellValue::Number(45000.5))),
            "15/03/2023 12:00:00 PM"
        );
        assert_eq!(
            format_date_value(Some(&CellValue::Number(45000.25))),
            "15/03/2023 6:00:00 AM"
        );
    }

    #[test]
    fn test_textual_date_passes_through() {
        assert_eq!(format_date_value(Some(&text("05/01/2024"))), "05/01/2024");
        assert_eq!(format_date_value(None), "");
    }
}
