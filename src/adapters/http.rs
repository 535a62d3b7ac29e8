//! Shared HTTP transport for beacon adapters.
//!
//! One `reqwest::Client` is built at start-up and cloned into every adapter
//! (clones share the underlying connection pool). Per-query deadlines are
//! imposed by the dispatcher, so the transport only carries a connect
//! timeout as a floor against unreachable hosts.

use std::time::Duration;

use crate::adapters::AdapterError;

/// How long to wait for a TCP connection before giving up.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Thin wrapper around a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the shared client.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Http` if the TLS backend cannot be
    /// initialized; this is a start-up failure, not a per-query one.
    pub fn new() -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("beacon-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Issue a GET and return the body as text.
    ///
    /// Non-2xx statuses are reported as [`AdapterError::Status`] so callers
    /// can tell a provider-side rejection from a transport failure.
    pub async fn get(&self, url: &str) -> Result<String, AdapterError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status(status));
        }

        Ok(response.text().await?)
    }
}
