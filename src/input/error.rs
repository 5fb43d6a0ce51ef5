//! Input error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting estimate inputs
///
/// The schedule engine itself never fails; everything here is caught
/// before a computation starts.
#[derive(Debug, Error)]
pub enum InputError {
    /// Base month is not a `YYYY-MM` calendar month.
    #[error("Invalid base month {0:?}: expected YYYY-MM")]
    InvalidBaseMonth(String),

    /// Arrears index could not be read.
    #[error("Invalid arrears period {0:?}")]
    InvalidPeriod(String),

    /// Command-line quantity edit not in `m=quantity` form.
    #[error("Invalid quantity entry {0:?}: expected m=quantity")]
    InvalidQuantityEntry(String),

    /// Malformed quantities CSV.
    #[error("Failed to read quantities CSV: {0}")]
    Csv(#[from] csv::Error),

    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
