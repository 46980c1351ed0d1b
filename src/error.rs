//! Error types for the isotherm crate.
//!
//! This module defines a single error enum covering every failure the
//! rendering pipeline, the atlas job and the HTTP surface can report.

use thiserror::Error;

/// The main error type for isotherm operations.
#[derive(Error, Debug)]
pub enum IsothermError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by the image crate while compositing or encoding
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Malformed color stop table
    #[error("Invalid color ramp: {message}")]
    InvalidColorRamp { message: String },

    /// Grid buffer does not hold exactly `num_days` days of cells
    #[error(
        "Grid size mismatch: expected {expected} values for {num_days} day(s), got {actual}"
    )]
    GridSize {
        expected: usize,
        actual: usize,
        num_days: usize,
    },

    /// Index out of bounds errors
    #[error("Index out of bounds: {param}={value} (max allowed: {max})")]
    IndexOutOfBounds {
        param: String,
        value: String,
        max: usize,
    },

    /// Image encoding errors
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// A start request arrived while another atlas job is running
    #[error("Atlas job {job_id} is already running")]
    JobAlreadyRunning { job_id: String },

    /// No finished atlas is available
    #[error("No atlas result: {message}")]
    NoResult { message: String },

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl IsothermError {
    /// Shorthand for an [`IsothermError::InvalidParameter`].
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        IsothermError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with IsothermError
pub type Result<T> = std::result::Result<T, IsothermError>;
