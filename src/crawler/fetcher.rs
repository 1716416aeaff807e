//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests to fetch page content
//! - Classifying failures into page states
//!
//! A fetch never returns an error: every failure is a [`FetchResult`] variant
//! that the coordinator records before moving on to the next page.

use crate::config::UserAgentConfig;
use crate::state::PageState;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Maximum number of redirects followed for one page
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// HTTP error that maps to a specific page state
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// The page state this error maps to
        state: PageState,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// The page state this error maps to
        state: PageState,
    },
}

impl FetchResult {
    /// The page state a non-successful fetch leaves the page in
    pub fn failure_state(&self) -> Option<PageState> {
        match self {
            Self::Success { .. } => None,
            Self::ContentMismatch { .. } => Some(PageState::ContentMismatch),
            Self::HttpError { state, .. } | Self::NetworkError { state, .. } => Some(*state),
        }
    }
}

/// Formats the User-Agent header value: `CrawlerName/Version`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!("{}/{}", config.crawler_name, config.crawler_version)
}

/// Builds an HTTP client with proper configuration
///
/// Every request is bounded by `timeout`, so a slow page surfaces as an
/// `Unreachable` fetch result instead of stalling the crawl.
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::UserAgentConfig;
/// use catalog_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx with HTML or no Content-Type | Success |
/// | HTTP 2xx with another Content-Type | ContentMismatch |
/// | HTTP 404 / 410 | HttpError → DeadLink |
/// | Other HTTP status | HttpError → Failed |
/// | Timeout, connection refused | NetworkError → Unreachable |
/// | Unreadable body, other client errors | NetworkError → Failed |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_request_error(&e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            state: PageState::DeadLink,
        };
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            state: PageState::Failed,
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.contains("html") {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => classify_request_error(&e),
    }
}

fn classify_request_error(e: &reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            state: PageState::Unreachable,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: "Connection refused".to_string(),
            state: PageState::Unreachable,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            state: PageState::Failed,
        }
    }
}
