//! Error types for the CNAB engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// The specific validation that a CNAB line failed.
///
/// Validation is fail-fast per line: the first violation wins, so a
/// decode error always carries exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The line has no content at all
    #[error("line is empty")]
    EmptyLine,

    /// The line is not exactly 80 characters
    #[error("expected {expected} characters, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The type field is not a code in 1-9
    #[error("transaction type '{found}' is not valid (must be 1-9)")]
    InvalidType { found: String },

    /// The date field is not a valid YYYYMMDD calendar date
    #[error("invalid date '{found}' (expected YYYYMMDD)")]
    InvalidDate { found: String },

    /// The value field is not a non-negative integer
    #[error("invalid value '{found}' (expected non-negative numeric)")]
    InvalidValue { found: String },

    /// Hour component outside 0-23
    #[error("invalid hour value {value} (must be 0-23)")]
    InvalidHour { value: u32 },

    /// Minute component outside 0-59
    #[error("invalid minute value {value} (must be 0-59)")]
    InvalidMinute { value: u32 },

    /// Second component outside 0-59
    #[error("invalid second value {value} (must be 0-59)")]
    InvalidSecond { value: u32 },

    /// The time field contains non-numeric content
    #[error("invalid time format '{found}' (expected HHMMSS)")]
    InvalidTimeFormat { found: String },
}

/// A single line that failed validation, tagged with its 1-indexed
/// position in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct DecodeError {
    /// 1-indexed physical line number in the input file
    pub line: usize,

    /// What the line failed
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(line: usize, kind: DecodeErrorKind) -> Self {
        DecodeError { line, kind }
    }
}

/// Errors that can occur during engine operation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the input stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// One or more lines failed validation; the whole file is rejected
    #[error("failed to parse CNAB file, {count} error(s) found:\n{details}")]
    ParseFailed { count: usize, details: String },

    /// Every line in the file was blank or whitespace
    #[error("no valid transactions found in the CNAB file")]
    NoValidTransactions,

    /// Missing input file argument
    #[error("Missing input file argument. Usage: cnab-engine <input.txt> [--json]")]
    MissingArgument,
}
