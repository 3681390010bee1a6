//! Error types for the fish_forecast crate

use crate::period::PeriodKey;
use thiserror::Error;

/// Custom error types for the fish_forecast crate
///
/// Every variant describes an input problem the caller can correct and
/// resubmit. A failed operation never leaves a series half-updated.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Month name or year could not be turned into a period
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// The series already holds an observation for this period
    #[error("Period '{0}' already exists")]
    DuplicatePeriod(PeriodKey),

    /// Production must be a finite, non-negative mass
    #[error("Production must be a non-negative number of kilograms, got {0}")]
    NegativeProduction(f64),

    /// Empty series, or a model fit that did not reach a finite state
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Requested horizon is outside the allowed range
    #[error("Forecast horizon must be between 1 and {max}, got {requested}")]
    InvalidHorizon { requested: usize, max: usize },

    /// Error from invalid configuration or model parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
