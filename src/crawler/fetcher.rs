//! HTTP fetcher
//!
//! This module owns all network access for the scraper:
//! - Building the shared HTTP client with browser-like headers
//! - GET requests with bounded retry and exponential backoff
//! - Error classification into retryable and terminal failures
//!
//! Fetch failures are reported to the caller as values, never panics; every
//! layer above has its own degraded-output policy.

use reqwest::{header, Client, StatusCode};
use std::time::Duration;

/// Total attempts per URL (first try + retries)
const MAX_ATTEMPTS: u32 = 5;

/// Base of the exponential backoff between attempts, in seconds
const BACKOFF_FACTOR_SECS: u64 = 2;

/// HTTP status codes worth retrying
const TRANSIENT_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Why a fetch ultimately failed
#[derive(Debug)]
pub enum FetchError {
    /// Non-success status after exhausting any applicable retries
    Status(u16),

    /// Timeout, connection failure, or other transport error
    Transport(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status(code) => write!(f, "HTTP {}", code),
            FetchError::Transport(message) => write!(f, "{}", message),
        }
    }
}

/// Builds the shared HTTP client used by the whole pipeline
///
/// The client is constructed once by the pipeline driver and passed by
/// reference to every worker; there is no ambient session state. Headers
/// mimic a desktop browser, which the listing site expects.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("text/html,application/xhtml+xml"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("fr-FR,fr;q=0.9,en;q=0.8"),
    );

    Client::builder()
        .user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
             AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/120.0.0.0 Safari/537.36",
        )
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body as text
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | Return body |
/// | 429, 500, 502, 503, 504 | Retry up to 5 attempts, backoff 2s/4s/8s/16s |
/// | Timeout, connection error | Retry with the same budget |
/// | Any other status | Fail immediately |
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError)` - Classified failure after the retry budget is spent
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, FetchError> {
    tracing::debug!("Downloading: {}", url);

    let mut last_error = FetchError::Transport("no attempt made".to_string());

    for attempt in 1..=MAX_ATTEMPTS {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response
                        .text()
                        .await
                        .map_err(|e| FetchError::Transport(e.to_string()));
                }

                if !is_transient_status(status) {
                    return Err(FetchError::Status(status.as_u16()));
                }

                last_error = FetchError::Status(status.as_u16());
            }
            Err(e) => {
                if !(e.is_timeout() || e.is_connect()) {
                    return Err(FetchError::Transport(e.to_string()));
                }
                last_error = FetchError::Transport(e.to_string());
            }
        }

        if attempt < MAX_ATTEMPTS {
            let delay = Duration::from_secs(BACKOFF_FACTOR_SECS.pow(attempt));
            tracing::debug!(
                "Retrying {} in {:?} (attempt {}/{}): {}",
                url,
                delay,
                attempt,
                MAX_ATTEMPTS,
                last_error
            );
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error)
}

/// Whether a status code indicates a transient server-side condition
fn is_transient_status(status: StatusCode) -> bool {
    TRANSIENT_STATUSES.contains(&status.as_u16())
}
