//! Link resolution against the wiki root

use crate::error::FetchError;
use url::Url;

/// Resolves hrefs found on wiki pages into absolute URLs
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base: Url,
}

impl UrlResolver {
    /// Create a resolver rooted at `base`
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
        Ok(Self { base })
    }

    /// Join `href` onto the base the way a browser would.
    ///
    /// Returns `None` when the href cannot be joined.
    pub fn resolve(&self, href: &str) -> Option<String> {
        self.base.join(href.trim()).ok().map(|u| u.to_string())
    }

    /// Prefix root-relative hrefs (`/wiki/...`) with the site origin and leave
    /// everything else untouched.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with('/') && !href.starts_with("//") {
            format!("{}{}", self.origin(), href)
        } else {
            href.to_string()
        }
    }

    /// Scheme + host (+ port) of the base URL
    pub fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }

    /// The base URL as configured
    pub fn base(&self) -> &Url {
        &self.base
    }
}
