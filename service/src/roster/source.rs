//! HTTP source for the published roster tables.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::DirectoryConfig;

/// Errors that can occur while fetching a roster table.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed (network error, DNS failure, etc.)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server responded with a non-success status.
    #[error("fetching {file} failed with status {status}: {message}")]
    Status {
        /// File being fetched when the error occurred.
        file: String,
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
}

/// Trait for fetching the three published roster tables.
///
/// Each operation returns the raw CSV text of one table. Implementations
/// must be thread-safe as they may be called concurrently.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetch the senate roster CSV.
    async fn fetch_senators(&self) -> Result<String, SourceError>;

    /// Fetch the assembly roster CSV.
    async fn fetch_assembly(&self) -> Result<String, SourceError>;

    /// Fetch the ZIP-to-district map CSV.
    async fn fetch_districts(&self) -> Result<String, SourceError>;
}

/// HTTP implementation of [`RosterSource`] backed by reqwest.
pub struct HttpRosterSource {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl HttpRosterSource {
    /// Create a new source with a default reqwest client.
    #[must_use]
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a new source with a custom reqwest client.
    ///
    /// Useful for testing or custom configuration (timeouts, proxies).
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: DirectoryConfig) -> Self {
        Self { client, config }
    }

    async fn fetch(&self, file: &str) -> Result<String, SourceError> {
        let url = self.config.url_for(file);
        tracing::debug!(%url, "fetching roster table");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                file: file.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RosterSource for HttpRosterSource {
    async fn fetch_senators(&self) -> Result<String, SourceError> {
        self.fetch(&self.config.senators_file).await
    }

    async fn fetch_assembly(&self) -> Result<String, SourceError> {
        self.fetch(&self.config.assembly_file).await
    }

    async fn fetch_districts(&self) -> Result<String, SourceError> {
        self.fetch(&self.config.districts_file).await
    }
}
