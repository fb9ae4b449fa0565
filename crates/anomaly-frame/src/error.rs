//! Error types for anomaly-frame
//!
//! Every failure names the offending column or value; nothing is reported
//! through a side channel.

use thiserror::Error;

/// Error type for table construction and access
#[derive(Error, Debug)]
pub enum Error {
    /// The declared time column is absent from the input
    #[error("Missing time column: {column}")]
    MissingTimeColumn { column: String },

    /// A cell in the time column could not be parsed as a timestamp
    #[error("Unparseable time value {value:?} at row {row}")]
    TimeParseError { value: String, row: usize },

    /// Two columns share a name
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column's length does not match the table's row count
    #[error("Length mismatch in column {column}: expected {expected} values, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A derived-column insert targeted an existing source column
    #[error("Column {0} is a source column and cannot be replaced")]
    SourceColumnCollision(String),

    /// A derived-column insert carried the `Source` role
    #[error("Column {0} cannot be inserted with the source role")]
    SourceRoleRejected(String),

    /// CSV error (malformed records, ragged rows)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
