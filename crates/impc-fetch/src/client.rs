//! HTTP client for the IMPC Solr API.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use impc_types::{ImpcError, QueryParams, SolrResponse};

use crate::url::{DEFAULT_BASE_URL, select_url};

/// Maximum number of body characters carried in a server error.
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for the Solr client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Solr API.
    pub base_url: String,
    /// Maximum concurrent page requests.
    pub concurrency: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            concurrency: 5, // The EBI endpoint is shared infrastructure
            timeout: Duration::from_secs(60),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("impc-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur during a select request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The select URL for this core does not exist (404).
    #[error("Unknown Solr core: {0}")]
    UnknownCore(String),

    /// Server returned an error status after retries were exhausted.
    #[error("Solr returned status {status}: {body}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for display.
        body: String,
    },

    /// The request URL could not be constructed.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl From<RequestError> for ImpcError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::UnknownCore(core) => Self::UnknownCore(core),
            RequestError::ServerError { status, body } => Self::Server { status, body },
            RequestError::Http(e) if e.is_decode() => Self::Decode(e.to_string()),
            RequestError::Http(e) => Self::Http(e.to_string()),
            RequestError::InvalidUrl(url) => Self::Http(format!("invalid URL: {url}")),
        }
    }
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct SolrClient {
    client: Client,
    config: ClientConfig,
}

impl SolrClient {
    /// Creates a new Solr client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            // Keep enough idle connections for concurrent page requests
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the select URL for a core (without query parameters).
    #[must_use]
    pub fn select_url(&self, core: &str) -> String {
        select_url(&self.config.base_url, core)
    }

    /// Returns the full request URL for a query, as it would be sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL.
    pub fn request_url(&self, core: &str, params: &QueryParams) -> Result<String, RequestError> {
        let url = reqwest::Url::parse_with_params(&self.select_url(core), params.to_pairs())
            .map_err(|_| RequestError::InvalidUrl(self.select_url(core)))?;
        Ok(url.into())
    }

    /// Performs a single select request against a core.
    ///
    /// Returns the parsed Solr response, including `numFound` and the
    /// matched documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the core does not exist, the request fails
    /// after all retries, or the response cannot be decoded.
    pub async fn select(
        &self,
        core: &str,
        params: &QueryParams,
    ) -> Result<SolrResponse, RequestError> {
        let url = self.select_url(core);
        let pairs = params.to_pairs();
        let mut attempts = 0;

        loop {
            match self.client.get(&url).query(&pairs).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::NOT_FOUND {
                        return Err(RequestError::UnknownCore(core.to_string()));
                    }

                    // Retry on server errors (5xx) and rate limiting (429)
                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        let body = response.text().await.unwrap_or_default();
                        return Err(RequestError::ServerError {
                            status: status.as_u16(),
                            body: truncate_body(&body),
                        });
                    }

                    if !status.is_success() {
                        // Bad query syntax and the like: not retryable
                        let body = response.text().await.unwrap_or_default();
                        return Err(RequestError::ServerError {
                            status: status.as_u16(),
                            body: truncate_body(&body),
                        });
                    }

                    return Ok(response.json::<SolrResponse>().await?);
                }
                Err(e) if is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter (±25%) keeps retries from aligning without
        // pulling in a random number generator
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset.saturating_sub(jitter_range)
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter as i64).max(100) as u64;
        Duration::from_millis(final_delay)
    }
}

/// Determines if an error is retryable.
fn is_retryable_error(error: &reqwest::Error) -> bool {
    // Builder errors are configuration issues
    if error.is_builder() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}

/// Truncates a response body for inclusion in an error message.
fn truncate_body(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_LIMIT {
        body.to_string()
    } else {
        let truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = SolrClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_request_url() {
        let client = SolrClient::with_defaults().unwrap();
        let params = QueryParams::new().with_rows(10).with_fields(["marker_symbol"]);
        let url = client.request_url("genotype-phenotype", &params).unwrap();

        assert!(url.starts_with("https://www.ebi.ac.uk/mi/impc/solr/genotype-phenotype/select?"));
        assert!(url.contains("q=*%3A*"));
        assert!(url.contains("rows=10"));
        assert!(url.contains("fl=marker_symbol"));
        assert!(url.contains("wt=json"));
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = SolrClient::with_defaults().unwrap();

        let delay1 = client.calculate_backoff_delay(1);
        assert!(delay1.as_millis() >= 750 && delay1.as_millis() <= 1250);

        let delay2 = client.calculate_backoff_delay(2);
        assert!(delay2.as_millis() >= 1500 && delay2.as_millis() <= 2500);

        // High attempt counts are capped at max_delay plus jitter
        let delay_high = client.calculate_backoff_delay(20);
        assert!(delay_high.as_millis() <= 37_500);
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(1000);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
    }
}
