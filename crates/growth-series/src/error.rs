//! Error types for series ingestion.

use thiserror::Error;

/// Result type alias for ingestion operations.
pub type SeriesResult<T> = Result<T, SeriesError>;

/// Errors that can occur while reading or building a series.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid CSV series: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON series: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognised timestamp: {0}")]
    Timestamp(String),

    #[error(transparent)]
    Invalid(#[from] growth_core::ForecastError),
}
