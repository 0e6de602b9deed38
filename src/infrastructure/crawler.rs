//! HTTP page fetching for the link graph

use crate::error::{Result, SitepipeError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; sitepipe/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully fetched response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub content_type: String,
    pub body: String,
}

impl FetchedPage {
    pub fn is_html(&self) -> bool {
        self.content_type.to_ascii_lowercase().contains("text/html")
    }
}

/// Fetches pages for the crawler
pub trait PageFetcher {
    /// Fetch `url`; non-success statuses are errors
    fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// Blocking HTTP fetcher following redirects
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SitepipeError::Http(format!("failed to build HTTP client: {}", e)))?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| SitepipeError::Http(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitepipeError::Http(format!("{}: HTTP {}", url, status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .map_err(|e| SitepipeError::Http(format!("{}: body read failed: {}", url, e)))?;

        Ok(FetchedPage { content_type, body })
    }
}
