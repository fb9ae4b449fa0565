//! Error types for anomaly detection

use thiserror::Error;

/// Error type for detection passes
#[derive(Error, Debug)]
pub enum Error {
    /// Classification threshold outside (0, +inf)
    #[error("Invalid threshold: {0} (must be finite and > 0)")]
    InvalidThreshold(f64),

    /// One or more value columns contain no usable numeric data
    #[error("Non-numeric column(s): {}", columns.join(", "))]
    NonNumericColumn { columns: Vec<String> },

    /// Table-level error
    #[error("Table error: {0}")]
    Frame(#[from] anomaly_frame::Error),

    /// Visualization collaborator error
    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
