use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Summary of one completed session, written once to the result store.
///
/// `recorded_at` is RFC 3339 UTC, captured when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Player name entered at game start.
    pub name: String,

    /// Elapsed whole seconds at the moment the final pair matched.
    pub seconds: u64,

    /// Submission timestamp, ISO 8601 / RFC 3339.
    pub recorded_at: String,
}

impl ResultRecord {
    /// Build a record stamped with the current UTC time.
    pub fn new(name: impl Into<String>, seconds: u64) -> Self {
        Self {
            name: name.into(),
            seconds,
            recorded_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Errors from a result store submission
///
/// Submission failures are never fatal: the controller logs them and the
/// game is unaffected (the worst outcome is a missing record).
#[derive(Error, Debug)]
pub enum ResultStoreError {
    #[error("Result store rejected the record with status {0}")]
    Rejected(u16),

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Port to the external result store collaborator.
///
/// The store accepts a record into a named collection and acknowledges or
/// fails; the core treats failure as log-and-continue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn create(&self, collection: &str, record: &ResultRecord) -> Result<(), ResultStoreError>;
}

/// HTTP implementation of [`ResultStore`]
///
/// POSTs the JSON record to `{base_url}/{collection}`. Any non-2xx
/// response is reported as [`ResultStoreError::Rejected`].
pub struct HttpResultStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResultStore {
    /// Create a store client for the given endpoint.
    ///
    /// # Arguments
    /// * `base_url` - Result store base URL, with or without trailing slash
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ResultStoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Build the client described by the game settings.
    pub fn from_settings(settings: &crate::models::GameSettings) -> Result<Self, ResultStoreError> {
        Self::new(settings.result_endpoint.clone(), settings.result_timeout())
    }

    /// Full URL a record for `collection` is posted to.
    pub fn endpoint_for(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }
}

#[async_trait]
impl ResultStore for HttpResultStore {
    async fn create(&self, collection: &str, record: &ResultRecord) -> Result<(), ResultStoreError> {
        let url = self.endpoint_for(collection);
        tracing::debug!("Submitting result for {} to {}", record.name, url);

        let response = self.client.post(&url).json(record).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResultStoreError::Rejected(status.as_u16()));
        }

        tracing::info!(
            "Result stored: {} finished in {}s",
            record.name,
            record.seconds
        );
        Ok(())
    }
}
