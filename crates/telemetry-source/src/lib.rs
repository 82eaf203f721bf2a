//! Telemetry Sources
//!
//! Fetches whole CSV batches of flight telemetry and resolves them into
//! validated rows.

mod batch;
mod csv;
mod sample;
mod source;

pub use batch::TelemetryBatch;
pub use csv::parse_csv;
pub use sample::{SampleSource, DEFAULT_SAMPLE_ROWS, DEFAULT_SAMPLE_SEED};
pub use source::{FallbackSource, FileSource, HttpSource, TelemetrySource};

use thiserror::Error;

/// Source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Feed returned status {0}")]
    Status(u16),
    #[error("Feed has no header row")]
    EmptyHeader,
    #[error("No telemetry rows available")]
    NoRowsAvailable,
}
