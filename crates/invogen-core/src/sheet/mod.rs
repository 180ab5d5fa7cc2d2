//! Spreadsheet decoding module.

mod decoder;
mod row;

pub use decoder::decode_rows;
pub use row::{CellValue, RowRecord};

use crate::error::DecodeError;

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
