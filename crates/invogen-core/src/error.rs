//! Error types for the invogen-core library.

use thiserror::Error;

/// Main error type for the invogen library.
#[derive(Error, Debug)]
pub enum InvogenError {
    /// Workbook decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to workbook decoding.
///
/// Decoding is single-shot: any of these is fatal to the call and no
/// partial result is produced. Malformed rows are not decode errors;
/// they are recovered per-row by the aggregation policies.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The buffer is not a parseable spreadsheet workbook.
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook contains no sheets.
    #[error("workbook has no sheets")]
    NoSheets,
}

/// Result type for the invogen library.
pub type Result<T> = std::result::Result<T, InvogenError>;
