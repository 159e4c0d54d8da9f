//! Wikiscape - Structured Data Scraper for the WalkScape Wiki
//!
//! This crate crawls the WalkScape wiki and turns its HTML tables and
//! heading-delimited sections into uniform, provenance-tagged records.
//!
//! # Features
//!
//! - **Activity Crawl**: Follow every activity page from the activities listing
//! - **Table Classification**: Activity info, experience, drops and special drops
//! - **Row Normalization**: Row-number skipping, icon-cell look-ahead, footnote stripping
//! - **Region/Location Crawl**: Section walking under "Regions" and "Locations" headings
//! - **Export**: CSV or JSON output after confirmation
//!
//! # Architecture
//!
//! ```text
//! Listing Page ──▶ PageFetcher (paced) ──▶ Document
//!                                             │
//!                        ┌────────────────────┴─────────┐
//!                        ▼                              ▼
//!                 ┌─────────────┐               ┌──────────────┐
//!                 │ Tables      │               │ Sections     │
//!                 │ classify +  │               │ regions +    │
//!                 │ normalize   │               │ locations    │
//!                 └──────┬──────┘               └──────┬───────┘
//!                        ▼                             ▼
//!                   Aggregator                 LocationResults
//!                        └──────────▶ LabeledTable ◀───┘
//!                                         │
//!                                         ▼
//!                                  CSV / JSON files
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wikiscape::{ScraperConfig, WikiScraper, DEFAULT_SAMPLE_SIZE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scraper = WikiScraper::new(ScraperConfig::default())?;
//!
//!     let results = scraper.scrape_activities_or_empty().await;
//!     println!("{}", results.summary(DEFAULT_SAMPLE_SIZE));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extraction;
pub mod fetch;
pub mod pipeline;

// Re-exports for convenience
pub use aggregate::{Aggregator, LocationResults, ResultSet, Summary, DEFAULT_SAMPLE_SIZE};
pub use config::{ScraperConfig, ScraperConfigBuilder};
pub use document::Document;
pub use error::{Error, Result};
pub use export::{ExportFormat, Exporter, LabeledTable};
pub use extraction::{LinkExtractor, Record, SectionExtractor, TableKind};
pub use fetch::{PageFetcher, UrlResolver};
pub use pipeline::WikiScraper;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
