//! Network layer: the [`Transport`] seam, the reqwest-backed [`HttpClient`] and rate limiting.
//!
//! Everything above this module issues requests through `&dyn Transport`, so the
//! query builder and chapter aggregator can be driven by any transport, including
//! the recording transports used in tests.
//!
//! # Examples
//!
//! ```rust
//! use hondana::config::SourceConfig;
//! use hondana::net::{self, HttpClient};
//! use url::Url;
//!
//! # async fn example() -> hondana::Result<()> {
//! let client = HttpClient::from_config("comick-en", &SourceConfig::default());
//! let url = Url::parse("https://api.comick.fun/v1.0/search?q=naruto&limit=20&page=1")?;
//! let body: serde_json::Value = net::fetch_json(&client, &url).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, RETRY_AFTER},
};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use crate::config::SourceConfig;
use crate::error::{Error, Result};

pub mod json;

/// Shared HTTP client: 30 second timeout, pooled connections, gzip and brotli.
///
/// Per-source identity (user agent, referer) travels as request headers so that
/// every source can reuse the same connection pool.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Executes GET requests for the core.
///
/// Implementations may block (rate limiting) and must report any failure,
/// including non-success statuses, as an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Bytes>;
}

/// Fetches `url` through `transport` and decodes the body as JSON.
pub async fn fetch_json<T>(transport: &dyn Transport, url: &Url) -> Result<T>
where
    T: DeserializeOwned,
{
    let bytes = transport.get(url).await?;
    serde_json::from_slice(&bytes).map_err(Into::into)
}

/// Minimum-interval rate limiter.
///
/// Every call to [`wait`](RateLimiter::wait) is admitted at least `delay` after the
/// previous one.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    delay: Duration,
}

impl RateLimiter {
    /// ```rust
    /// use hondana::net::RateLimiter;
    ///
    /// // three requests per second
    /// let limiter = RateLimiter::new(334);
    /// ```
    pub fn new(delay_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Sleeps until the next request is allowed, then claims the slot.
    pub async fn wait(&self) {
        loop {
            let pending = {
                let mut last = self.last_request.lock();
                let now = Instant::now();
                match *last {
                    Some(prev) if now.duration_since(prev) < self.delay => {
                        Some(self.delay - now.duration_since(prev))
                    }
                    _ => {
                        *last = Some(now);
                        None
                    }
                }
            };

            match pending {
                Some(duration) => tokio::time::sleep(duration).await,
                None => return,
            }
        }
    }
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            last_request: Mutex::new(None),
            delay: self.delay,
        }
    }
}

/// reqwest-backed [`Transport`] with rate limiting, identifying headers and
/// optional retries.
///
/// ```rust
/// use hondana::net::HttpClient;
///
/// let client = HttpClient::new("comick-en")
///     .with_rate_limit(1000)
///     .with_header("Referer", "https://comick.app/");
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    source_id: String,
    rate_limiter: RateLimiter,
    max_retries: u32,
    headers: HeaderMap,
}

impl HttpClient {
    /// Creates a client with a 334ms rate limit and no retries.
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            rate_limiter: RateLimiter::new(crate::config::DEFAULT_RATE_LIMIT_MS),
            max_retries: 0,
            headers: HeaderMap::new(),
        }
    }

    /// Creates a client carrying the `Referer` and `User-Agent` of `config`.
    pub fn from_config(source_id: impl Into<String>, config: &SourceConfig) -> Self {
        Self::new(source_id)
            .with_rate_limit(config.rate_limit_ms)
            .with_max_retries(config.max_retries)
            .with_header("Referer", &format!("{}/", config.web_root()))
            .with_header("User-Agent", &config.user_agent)
    }

    pub fn with_rate_limit(mut self, delay_ms: u64) -> Self {
        self.rate_limiter = RateLimiter::new(delay_ms);
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Adds a header to all requests. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<reqwest::header::HeaderValue>(),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }
}

/// Outcome of one request attempt that did not fail outright.
enum Attempt {
    Body(Bytes),
    /// 429; seconds from `Retry-After` when the server sent one
    Throttled(Option<u64>),
}

impl HttpClient {
    async fn attempt(&self, url: &Url) -> Result<Attempt> {
        self.rate_limiter.wait().await;

        let response = CLIENT
            .get(url.as_str())
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Ok(Attempt::Throttled(retry_after));
        }
        if !status.is_success() {
            return Err(Error::source(
                &self.source_id,
                format!("HTTP {} for {}", status, url),
            ));
        }

        Ok(Attempt::Body(response.bytes().await?))
    }
}

#[async_trait]
impl Transport for HttpClient {
    /// GET with rate limiting. Throttled responses and connection failures are
    /// retried up to `max_retries` times; other statuses fail immediately.
    async fn get(&self, url: &Url) -> Result<Bytes> {
        let mut retries = 0;

        loop {
            debug!(source = %self.source_id, %url, retries, "GET");

            let backoff = match self.attempt(url).await {
                Ok(Attempt::Body(body)) => return Ok(body),
                Ok(Attempt::Throttled(retry_after)) => {
                    if retries >= self.max_retries {
                        return Err(Error::rate_limit(retry_after));
                    }
                    warn!(source = %self.source_id, %url, ?retry_after, "throttled");
                    retry_after
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| Duration::from_secs(2_u64.pow(retries + 1)))
                }
                Err(Error::Network(e)) if retries < self.max_retries => {
                    warn!(source = %self.source_id, %url, error = %e, "request failed, retrying");
                    Duration::from_secs(1)
                }
                Err(e) => return Err(e),
            };

            retries += 1;
            tokio::time::sleep(backoff).await;
        }
    }
}
