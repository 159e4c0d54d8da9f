//! HTTP page fetcher

use crate::config::ScraperConfig;
use crate::document::Document;
use crate::error::FetchError;
use crate::fetch::pacing::RequestPacer;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Sequential, paced fetcher for wiki pages
#[derive(Debug)]
pub struct PageFetcher {
    client: reqwest::Client,
    pacer: RequestPacer,
    timeout_ms: u64,
}

impl PageFetcher {
    /// Build a fetcher from the crawl configuration
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            pacer: RequestPacer::new(config.request_delay_ms),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Fetch a page body as text.
    ///
    /// Sleeps for the configured delay first. Non-2xx statuses are errors.
    #[instrument(skip(self))]
    pub async fn fetch_html(&mut self, url: &str) -> Result<String, FetchError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FetchError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                url
            )));
        }

        self.pacer.wait().await;
        let start = Instant::now();
        let timeout = Duration::from_millis(self.timeout_ms);

        let response = tokio::time::timeout(timeout, self.client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout_ms))?
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = tokio::time::timeout(timeout, response.text())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout_ms))?
            .map_err(|e| self.classify(e))?;

        debug!(
            "Fetched {} ({} bytes) in {}ms",
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    /// Fetch and parse a page
    pub async fn fetch_document(&mut self, url: &str) -> Result<Document, FetchError> {
        let body = self.fetch_html(url).await?;
        info!("Parsed {}", url);
        Ok(Document::parse(url, &body))
    }

    /// Number of requests issued so far
    pub fn request_count(&self) -> u64 {
        self.pacer.request_count()
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_ms)
        } else {
            err.into()
        }
    }
}
