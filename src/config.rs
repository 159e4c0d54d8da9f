//! Scraper configuration
//!
//! Every knob the crawl needs lives in [`ScraperConfig`]. The defaults point at
//! the public WalkScape wiki; the CLI overrides individual fields.

use crate::error::{Error, FetchError, Result};

/// Browser-like identifying header sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Path fragments that mark a link under the "Regions" heading as not being a region
pub const DEFAULT_REGION_BLACKLIST: &[&str] = &[
    "Coat_of_Arms.svg",
    "Category:",
    "Farming",
    "Activities",
    "Woodcutting",
    "Fishing",
    "Mining",
    "Crafting",
    "Gems",
    "Walkscape",
    "WalkScape",
    "index",
];

/// Configuration for a crawl
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Site root used to resolve relative links (default: https://wiki.walkscape.app)
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout in milliseconds (default: 10000)
    pub timeout_ms: u64,
    /// Delay enforced before every request in milliseconds (default: 500)
    pub request_delay_ms: u64,
    /// Path of the activities listing page
    pub activities_path: String,
    /// Text that identifies the activities table on the listing page
    pub activities_table_marker: String,
    /// Path of the page holding the "Regions" section
    pub regions_path: String,
    /// Heading that opens the region list
    pub regions_heading: String,
    /// Heading that opens the location list on each region page
    pub locations_heading: String,
    /// Region links containing any of these fragments are dropped
    pub region_link_blacklist: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wiki.walkscape.app".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 10_000,
            request_delay_ms: 500,
            activities_path: "/wiki/Activities".to_string(),
            activities_table_marker: "Antique Market Assessor".to_string(),
            regions_path: "/wiki/Arenum".to_string(),
            regions_heading: "Regions".to_string(),
            locations_heading: "Locations".to_string(),
            region_link_blacklist: DEFAULT_REGION_BLACKLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ScraperConfig {
    /// Create a new config builder
    pub fn builder() -> ScraperConfigBuilder {
        ScraperConfigBuilder::default()
    }

    /// Absolute URL of the activities listing page
    pub fn activities_url(&self) -> String {
        join_path(&self.base_url, &self.activities_path)
    }

    /// Absolute URL of the regions page
    pub fn regions_url(&self) -> String {
        join_path(&self.base_url, &self.regions_path)
    }

    /// Reject configurations the fetcher cannot work with
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(FetchError::InvalidUrl(format!(
                "base URL must be http or https: {}",
                self.base_url
            ))
            .into());
        }
        if self.timeout_ms == 0 {
            return Err(Error::generic("timeout must be greater than zero"));
        }
        Ok(())
    }
}

fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Builder for ScraperConfig
#[derive(Default)]
pub struct ScraperConfigBuilder {
    config: ScraperConfig,
}

impl ScraperConfigBuilder {
    /// Set the site root
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Set request timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set the delay enforced before each request
    pub fn request_delay_ms(mut self, ms: u64) -> Self {
        self.config.request_delay_ms = ms;
        self
    }

    /// Set the activities listing path
    pub fn activities_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.activities_path = path.into();
        self
    }

    /// Set the text used to find the activities table
    pub fn activities_table_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.config.activities_table_marker = marker.into();
        self
    }

    /// Set the regions page path
    pub fn regions_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.regions_path = path.into();
        self
    }

    /// Set the heading labels for the region and location sections
    pub fn headings<S: Into<String>>(mut self, regions: S, locations: S) -> Self {
        self.config.regions_heading = regions.into();
        self.config.locations_heading = locations.into();
        self
    }

    /// Add a fragment to the region link blacklist
    pub fn blacklist<S: Into<String>>(mut self, fragment: S) -> Self {
        self.config.region_link_blacklist.push(fragment.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ScraperConfig {
        self.config
    }
}
