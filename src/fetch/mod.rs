//! Page fetching
//!
//! Rate-limited HTTP GET of wiki pages. One request at a time; the pacer's
//! sleep before each request is the only suspension point of a crawl.

pub mod client;
pub mod pacing;
pub mod resolve;

pub use client::PageFetcher;
pub use pacing::RequestPacer;
pub use resolve::UrlResolver;
