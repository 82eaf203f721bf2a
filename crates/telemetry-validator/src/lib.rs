//! Telemetry Validation
//!
//! Resolves raw flight telemetry rows: substitutes documented defaults for
//! absent cells, clamps unit-interval scores, and rejects malformed values.

mod error;
mod row;
mod validator;

pub use error::ValidationError;
pub use row::{Field, RawTelemetryRow, TelemetryRow, WeatherCondition};
pub use validator::{parse_timestamp, RowDefaults, Validator};
