//! Error types for the growth forecaster.

use thiserror::Error;

/// Result type alias for forecaster operations.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Errors that can occur while building a series or projecting capacity.
#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ForecastError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ForecastError::InvalidInput(msg.into())
    }
}
