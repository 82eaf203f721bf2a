//! Telemetry source trait and feed implementations

use crate::{parse_csv, SourceError, TelemetryBatch};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use telemetry_validator::Validator;
use tracing::{debug, info, warn};

/// Supplies a full batch of telemetry on every fetch
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Short label for logs and health output
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<TelemetryBatch, SourceError>;
}

/// CSV file on local disk
pub struct FileSource {
    path: PathBuf,
    validator: Validator,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            validator: Validator::default(),
        }
    }
}

#[async_trait]
impl TelemetrySource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<TelemetryBatch, SourceError> {
        debug!("Reading telemetry from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_csv(&text, &self.validator)
    }
}

/// CSV document served over HTTP(S)
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    validator: Validator,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
            validator: Validator::default(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TelemetrySource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<TelemetryBatch, SourceError> {
        debug!("Fetching telemetry from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        parse_csv(&text, &self.validator)
    }
}

/// Serves the primary feed, switching to the secondary when a fetch fails
/// or yields no usable rows
pub struct FallbackSource {
    primary: Box<dyn TelemetrySource>,
    secondary: Box<dyn TelemetrySource>,
    label: String,
}

impl FallbackSource {
    pub fn new(primary: Box<dyn TelemetrySource>, secondary: Box<dyn TelemetrySource>) -> Self {
        let label = format!("{}+{}", primary.name(), secondary.name());
        info!("Telemetry source {} (fallback enabled)", label);
        Self {
            primary,
            secondary,
            label,
        }
    }
}

#[async_trait]
impl TelemetrySource for FallbackSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<TelemetryBatch, SourceError> {
        match self.primary.fetch().await {
            Ok(batch) if batch.is_empty() => {
                warn!(
                    "{} source returned no usable rows ({} rejected), serving {} data",
                    self.primary.name(),
                    batch.rejected(),
                    self.secondary.name()
                );
                self.secondary.fetch().await
            }
            Ok(batch) => Ok(batch),
            Err(e) => {
                warn!(
                    "{} source failed ({}), serving {} data",
                    self.primary.name(),
                    e,
                    self.secondary.name()
                );
                self.secondary.fetch().await
            }
        }
    }
}
