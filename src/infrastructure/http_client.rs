//! HTTP client for fetching search and detail pages
//!
//! One shared client with a bounded per-request timeout, a bounded redirect
//! policy and a `governor` rate limiter, so every worker draws from the same
//! request budget. No retries happen here; a failed fetch is reported once.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{Quota, RateLimiter, clock::DefaultClock, state::{InMemoryState, direct::NotKeyed}};
use reqwest::{Client, header::{HeaderMap, HeaderValue, USER_AGENT}};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::config::ScraperConfig;

/// Transport failure for one URL
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP request failed with status {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to fetch URL {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request cancelled: {url}")]
    Cancelled { url: String },
}

impl FetchError {
    /// URL the failure belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Request { url, .. }
            | Self::Body { url, .. }
            | Self::Cancelled { url } => url,
        }
    }

    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout { url: url.to_string() }
        } else {
            Self::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// Raw document plus the URL it was finally served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub requested_url: String,
    /// URL after following redirects
    pub final_url: String,
    pub body: String,
}

/// Source of raw documents for the scraping pipeline
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str, cancellation_token: &CancellationToken) -> Result<FetchedDocument, FetchError>;
}

struct ClientInner {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    timeout: Duration,
}

/// Rate limited HTTP client, cheap to clone
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("Rate limit must be greater than 0")?,
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                client,
                rate_limiter: RateLimiter::direct(quota),
                timeout,
            }),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Fetch a URL without a cancellation source
    pub async fn fetch_url(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        self.fetch(url, &CancellationToken::new()).await
    }
}

#[async_trait]
impl DocumentFetcher for HttpClient {
    async fn fetch(&self, url: &str, cancellation_token: &CancellationToken) -> Result<FetchedDocument, FetchError> {
        reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if cancellation_token.is_cancelled() {
            return Err(FetchError::Cancelled { url: url.to_string() });
        }

        tokio::select! {
            _ = self.inner.rate_limiter.until_ready() => {},
            _ = cancellation_token.cancelled() => {
                return Err(FetchError::Cancelled { url: url.to_string() });
            }
        }

        debug!("Fetching URL: {}", url);

        let response = tokio::select! {
            result = self.inner.client.get(url).send() => {
                result.map_err(|e| FetchError::from_reqwest(url, e))?
            },
            _ = cancellation_token.cancelled() => {
                warn!("🛑 HTTP request cancelled for URL: {}", url);
                return Err(FetchError::Cancelled { url: url.to_string() });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();

        let body = tokio::select! {
            result = response.text() => {
                result.map_err(|e| if e.is_timeout() {
                    FetchError::Timeout { url: url.to_string() }
                } else {
                    FetchError::Body { url: url.to_string(), source: e }
                })?
            },
            _ = cancellation_token.cancelled() => {
                warn!("🛑 Response reading cancelled for URL: {}", url);
                return Err(FetchError::Cancelled { url: url.to_string() });
            }
        };

        debug!("Successfully fetched: {} -> {} ({} chars)", url, final_url, body.len());

        Ok(FetchedDocument {
            requested_url: url.to_string(),
            final_url,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_client_creation() {
        let client = HttpClient::new(&ScraperConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_zero_rate_limit_is_rejected() {
        let config = ScraperConfig {
            max_requests_per_second: 0,
            ..Default::default()
        };
        assert!(HttpClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_relative_url_is_rejected_before_sending() {
        let client = HttpClient::new(&ScraperConfig::default()).unwrap();
        let err = client.fetch_url("/rc/clk?jk=1").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert_eq!(err.url(), "/rc/clk?jk=1");
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let client = HttpClient::new(&ScraperConfig::default()).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let err = client.fetch("https://www.indeed.co.uk/jobs", &token).await.unwrap_err();
        assert!(matches!(err, FetchError::Cancelled { .. }));
    }
}
