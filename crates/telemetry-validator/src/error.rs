//! Validation Error Types

use thiserror::Error;

/// Errors raised while resolving a raw telemetry row
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Required field with no documented default
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Cell that could not be read as the field's type
    #[error("Invalid value for {field}: {value:?}")]
    InvalidFormat { field: &'static str, value: String },

    /// Weather label outside Clear/Cloudy/Rainy
    #[error("Unknown weather condition: {0:?}")]
    UnknownWeather(String),
}
