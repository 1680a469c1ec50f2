//! `OmdbClient` - OMDb API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::api::OmdbApi;
use super::error::ConfigError;
use super::types::OmdbSearchResponse;

/// Default base URL for the OMDb API.
const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of retries for timeouts, connection failures and HTTP 5xx.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default backoff unit between retries (multiplied by the retry count).
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Error body returned alongside non-success HTTP statuses.
#[derive(Debug, Deserialize)]
struct OmdbErrorResponse {
    #[serde(rename = "Error")]
    error: String,
}

/// OMDb API client.
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Endpoint URL; every search is a GET on this URL.
    base_url: Url,
    /// API key sent as the `apikey` query parameter.
    api_key: String,
    /// Retries after the first attempt.
    max_retries: u32,
    /// Backoff unit between retries.
    retry_backoff: Duration,
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .finish_non_exhaustive()
    }
}

/// Builder for `OmdbClient`.
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_backoff: Option<Duration>,
}

impl std::fmt::Debug for OmdbClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClientBuilder")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .finish()
    }
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
            max_retries: None,
            retry_backoff: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of retries after the first attempt (default: 2).
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the backoff unit between retries (default: 500ms).
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingApiKey` if `api_key` is unset or blank.
    /// - `ConfigError::MissingUserAgent` if `user_agent` is unset.
    /// - `ConfigError::HttpClient` if `reqwest::Client` build fails.
    pub fn build(self) -> std::result::Result<OmdbClient, ConfigError> {
        let api_key = self
            .api_key
            .map(|key| String::from(key.trim()))
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let user_agent = self.user_agent.ok_or(ConfigError::MissingUserAgent)?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|_| ConfigError::InvalidBaseUrl(String::from(DEFAULT_BASE_URL)))?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_backoff: self.retry_backoff.unwrap_or(DEFAULT_RETRY_BACKOFF),
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Returns the endpoint URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with the given query params plus `apikey`.
    /// Retries up to `max_retries` times on timeouts, connection failures
    /// and HTTP 5xx.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T> {
        let mut retries = 0u32;
        loop {
            let request = self
                .http_client
                .get(self.base_url.clone())
                .query(query)
                .query(&[("apikey", self.api_key.as_str())])
                .build()
                .map_err(reqwest::Error::without_url)
                .context("failed to build OMDb request")?;

            // The URL carries the API key: log params only and strip it from errors.
            tracing::debug!(params = ?query, attempt = retries, "OMDb API request");

            let sent = self.http_client.execute(request).await;
            let response = match sent.map_err(reqwest::Error::without_url) {
                Ok(response) => response,
                Err(err) if is_retryable(&err) && retries < self.max_retries => {
                    retries = retries.saturating_add(1);
                    tracing::warn!(
                        retry = retries,
                        max_retries = self.max_retries,
                        error = %err,
                        "OMDb API request failed. Retrying..."
                    );
                    tokio::time::sleep(self.retry_backoff.saturating_mul(retries)).await;
                    continue;
                }
                Err(err) => return Err(err).context("OMDb request failed"),
            };

            let status = response.status();

            if status.is_server_error() && retries < self.max_retries {
                retries = retries.saturating_add(1);
                tracing::warn!(
                    retry = retries,
                    max_retries = self.max_retries,
                    %status,
                    "OMDb API server error. Retrying..."
                );
                tokio::time::sleep(self.retry_backoff.saturating_mul(retries)).await;
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<failed to read body>"));
                if let Ok(error_response) = serde_json::from_str::<OmdbErrorResponse>(&body) {
                    bail!("OMDb API error (HTTP {status}): {}", error_response.error);
                }
                bail!("OMDb API error (HTTP {status}): {body}");
            }

            let body = response
                .text()
                .await
                .map_err(reqwest::Error::without_url)
                .context("failed to read OMDb response body")?;
            let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
            let parsed = raw_result.context("failed to decode OMDb JSON response")?;
            return Ok(parsed);
        }
    }
}

/// Whether a transport error is worth retrying.
fn is_retryable(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

impl OmdbApi for OmdbClient {
    #[instrument(skip_all)]
    async fn search(&self, query: &str) -> Result<OmdbSearchResponse> {
        self.get_json(&[("s", query)]).await
    }
}
