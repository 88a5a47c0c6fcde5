//! Typed errors for dataset persistence

use thiserror::Error;

/// Failures reading or writing the assembled advisory dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("advisory dataset not found at {path}")]
    Missing { path: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
