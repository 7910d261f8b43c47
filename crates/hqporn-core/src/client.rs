//! HTTP client with rate limiting and retry logic for hqporn.xxx
//!
//! Provides a rate-limited HTTP client that respects server limits
//! and implements exponential backoff for transient errors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{HqpornError, Result};
use crate::url::{DEFAULT_ORIGIN, normalize_origin};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site origin, used for fetching and for resolving relative links
    /// (default: "https://hqporn.xxx")
    pub origin: String,
    /// User-Agent header sent with every request (default: desktop Chrome)
    pub user_agent: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: u64,
    /// Maximum retry attempts for transient errors (default: 3)
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: USER_AGENT.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 15,
            max_retries: 3,
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// Non-positive rates disable the limit; rates too small to express as
    /// an interval saturate to [`Duration::MAX`].
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second > 0.0 {
            Duration::try_from_secs_f64(1.0 / requests_per_second).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        let now = Instant::now();
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(
                now.checked_sub(min_interval).unwrap_or(now),
            )),
        }
    }

    /// Acquire permission to make a request
    ///
    /// If called before the minimum interval has passed since the last request,
    /// this method will sleep until the interval has elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// HTTP client wrapper with rate limiting and retry logic
///
/// Fetches raw page HTML for the parsers. It handles:
/// - Rate limiting to avoid overwhelming the server
/// - Automatic retries with exponential backoff for transient errors
/// - Browser-like headers (User-Agent, Accept-Language) and cookies
pub struct HqpornClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    max_retries: u32,
    origin: String,
}

impl HqpornClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(HqpornError::HttpError)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            max_retries: config.max_retries,
            origin: normalize_origin(&config.origin),
        })
    }

    /// Site origin this client fetches from, without trailing slash
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Fetch HTML content from a path on the site
    ///
    /// # Arguments
    /// * `path` - The path to fetch (e.g., "/fresh/2/")
    ///
    /// # Errors
    /// - `HttpError` - Network errors, timeouts and non-2xx statuses
    /// - `NotFound` - Server returned 404
    /// - `RateLimited` - Server returned 429 after all retries exhausted
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.origin, path);
        self.fetch_url(&url).await
    }

    /// Fetch HTML content from an absolute URL
    pub async fn fetch_url(&self, url: &str) -> Result<String> {
        info!(url, "fetching page");
        self.fetch_with_retry(url).await.inspect_err(|e| {
            warn!(url, error = %e, "fetch failed");
        })
    }

    /// Internal method to fetch with retry logic
    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            self.rate_limiter.acquire().await;

            match self.do_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    // Exponential backoff: 1s, 2s, 4s
                    let backoff = Duration::from_secs(1 << attempt.min(6));
                    debug!(url, attempt, error = %e, ?backoff, "retrying fetch");
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Perform a single fetch attempt
    async fn do_fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(HqpornError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(HqpornError::NotFound(url.to_string()));
        }

        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Check if an error is retryable
    fn is_retryable(error: &HqpornError) -> bool {
        match error {
            HqpornError::RateLimited => true,
            HqpornError::HttpError(e) => {
                // Retry on timeout, connection errors, or 5xx status codes
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| s.is_server_error())
            }
            _ => false,
        }
    }

    /// Get a reference to the rate limiter
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
