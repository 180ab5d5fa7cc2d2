//! Workbook decoding via the calamine spreadsheet codec.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use super::row::{CellValue, RowRecord};
use super::Result;
use crate::error::DecodeError;

/// Decode the first sheet of a workbook byte buffer into row records.
///
/// The first row is consumed as the header row and establishes column
/// names; every following row becomes one [`RowRecord`]. Cells under an
/// empty header, empty cells and error cells are omitted, and rows with
/// no surviving cells are dropped. The sheet name is not configurable.
pub fn decode_rows(data: &[u8]) -> Result<Vec<RowRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(DecodeError::NoSheets)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_display).collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = RowRecord::new();
        for (header, cell) in headers.iter().zip(row) {
            if header.trim().is_empty() {
                continue;
            }
            if let Some(value) = cell_value(cell) {
                record.push(header.clone(), value);
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }

    debug!("decoded {} rows from sheet '{}'", records.len(), sheet_name);
    Ok(records)
}

/// Map a codec cell to a raw value; empty and error cells yield `None`.
///
/// Date cells keep their serial number so the date policy sees the raw
/// value rather than a pre-rendered string.
fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::Bool(b) => Some(CellValue::Text(b.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

/// Header cell rendered as text; empty headers stay empty.
fn cell_display(cell: &Data) -> String {
    cell_value(cell).map(|v| v.display()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_mapping() {
        assert_eq!(
            cell_value(&Data::String("Acme".to_string())),
            Some(CellValue::Text("Acme".to_string()))
        );
        assert_eq!(cell_value(&Data::Int(3)), Some(CellValue::Number(3.0)));
        assert_eq!(cell_value(&Data::Float(2.5)), Some(CellValue::Number(2.5)));
        assert_eq!(
            cell_value(&Data::Bool(true)),
            Some(CellValue::Text("true".to_string()))
        );
        assert_eq!(cell_value(&Data::Empty), None);
        assert_eq!(cell_value(&Data::String(String::new())), None);
    }

    #[test]
    fn test_decode_rejects_garbage_buffer() {
        let result = decode_rows(b"definitely not a workbook");
        assert!(matches!(result, Err(DecodeError::Workbook(_))));
    }

    #[test]
    fn test_header_display() {
        assert_eq!(cell_display(&Data::String(" Qty ".to_string())), " Qty ");
        assert_eq!(cell_display(&Data::Float(2024.0)), "2024");
        assert_eq!(cell_display(&Data::Empty), "");
    }
}
