//! Crawl orchestration
//!
//! [`WikiScraper`] runs each crawl path strictly sequentially: fetch a page,
//! extract everything from it, drop it, then move on. Fetch failures and
//! missing tables/sections cost one page and are logged; the `*_or_empty`
//! entry points turn anything that still escapes into empty results.

use crate::aggregate::{Aggregator, LocationResults};
use crate::config::ScraperConfig;
use crate::document::Document;
use crate::error::Result;
use crate::export::LabeledTable;
use crate::extraction::images::image_table;
use crate::extraction::wikitable::dump_wikitables;
use crate::extraction::{process_document, LinkExtractor, LinkRef, SectionExtractor};
use crate::fetch::{PageFetcher, UrlResolver};
use tracing::{error, info, instrument, warn};

/// Classify, normalize and aggregate every table of one activity page.
///
/// Returns the number of records appended.
pub fn process_activity_page(doc: &Document, activity: &str, agg: &mut Aggregator) -> usize {
    let tables = process_document(doc);
    for table in &tables {
        info!("  Found {} table with {} rows", table.kind, table.records.len());
    }
    let processed = tables.len();
    let appended = agg.append_page(activity, tables);
    info!("  Processed {} tables", processed);
    appended
}

/// Log a failed run and fall back to empty results
pub fn or_empty<T: Default>(result: Result<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("{} failed, continuing with empty results: {:?}", what, e);
            T::default()
        }
    }
}

/// Sequential wiki crawler
#[derive(Debug)]
pub struct WikiScraper {
    config: ScraperConfig,
    fetcher: PageFetcher,
    resolver: UrlResolver,
}

impl WikiScraper {
    /// Create a scraper; fails on an unusable configuration
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = PageFetcher::new(&config)?;
        let resolver = UrlResolver::new(&config.base_url)?;
        Ok(Self {
            config,
            fetcher,
            resolver,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Requests issued so far
    pub fn request_count(&self) -> u64 {
        self.fetcher.request_count()
    }

    /// Fetch a page. Any fetch failure costs only this page: it is logged and
    /// becomes `None`.
    async fn fetch_or_skip(&mut self, url: &str) -> Option<Document> {
        match self.fetcher.fetch_document(url).await {
            Ok(doc) => Some(doc),
            Err(e) if e.is_transport() => {
                warn!("Error fetching {}: {}", url, e);
                None
            }
            Err(e) => {
                warn!("Skipping unfetchable link {}: {}", url, e);
                None
            }
        }
    }

    /// Activity links from the listing page.
    ///
    /// A failed fetch or a missing table yields an empty list.
    #[instrument(skip(self))]
    pub async fn activity_links(&mut self) -> Result<Vec<LinkRef>> {
        let url = self.config.activities_url();
        let Some(doc) = self.fetch_or_skip(&url).await else {
            return Ok(Vec::new());
        };

        match LinkExtractor::extract_from_table(
            &doc,
            &self.config.activities_table_marker,
            &self.resolver,
        ) {
            Ok(links) => Ok(links),
            Err(e) => {
                warn!("Could not find activities table: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Fetch one activity page and aggregate its tables
    #[instrument(skip(self, agg), fields(activity = %link.name))]
    pub async fn scrape_activity(
        &mut self,
        link: &LinkRef,
        agg: &mut Aggregator,
    ) -> Result<usize> {
        let Some(doc) = self.fetch_or_skip(&link.url).await else {
            return Ok(0);
        };
        info!("Processing activity: {}", link.name);
        Ok(process_activity_page(&doc, &link.name, agg))
    }

    /// Crawl every activity page listed on the activities page
    pub async fn scrape_activities(&mut self) -> Result<Aggregator> {
        info!("Extracting activity links...");
        let links = self.activity_links().await?;
        let mut agg = Aggregator::new();

        if links.is_empty() {
            warn!("No activity links found");
            return Ok(agg);
        }

        for (i, link) in links.iter().enumerate() {
            info!("Processing {}/{}: {}", i + 1, links.len(), link.name);
            self.scrape_activity(link, &mut agg).await?;
        }

        info!(
            "Scraping completed: {} records from {} pages",
            agg.total(),
            links.len()
        );
        Ok(agg)
    }

    /// [`WikiScraper::scrape_activities`], falling back to empty result sets
    pub async fn scrape_activities_or_empty(&mut self) -> Aggregator {
        let result = self.scrape_activities().await;
        or_empty(result, "Activity scrape")
    }

    /// Region links, then the locations listed on each region page
    pub async fn scrape_locations(&mut self) -> Result<LocationResults> {
        let mut results = LocationResults::new();
        let url = self.config.regions_url();
        let Some(doc) = self.fetch_or_skip(&url).await else {
            return Ok(results);
        };

        let regions = match SectionExtractor::region_links(
            &doc,
            &self.config.regions_heading,
            &self.resolver,
            &self.config.region_link_blacklist,
        ) {
            Ok(regions) => regions,
            Err(e) => {
                warn!("{} on {}", e, url);
                return Ok(results);
            }
        };
        drop(doc);
        info!("Found {} regions", regions.len());
        results.set_regions(regions.clone());

        for region in &regions {
            let Some(doc) = self.fetch_or_skip(&region.link).await else {
                continue;
            };

            let label = &self.config.locations_heading;
            match SectionExtractor::locations(&doc, label, &region.region) {
                Ok(entries) if entries.is_empty() => {
                    warn!("No locations found in {}", region.region)
                }
                Ok(entries) => {
                    let found = entries.len();
                    let added = results.add_locations(entries);
                    info!("Found {} locations in {} ({} new)", found, region.region, added);
                }
                Err(e) => warn!("{} in {}", e, region.region),
            }
        }

        Ok(results)
    }

    /// [`WikiScraper::scrape_locations`], falling back to empty results
    pub async fn scrape_locations_or_empty(&mut self) -> LocationResults {
        let result = self.scrape_locations().await;
        or_empty(result, "Location scrape")
    }

    /// Every wikitable on the activities page
    pub async fn scrape_wikitables(&mut self) -> Result<Vec<LabeledTable>> {
        let url = self.config.activities_url();
        let Some(doc) = self.fetch_or_skip(&url).await else {
            return Ok(Vec::new());
        };
        let tables = dump_wikitables(&doc);
        info!("Found {} tables", tables.len());
        Ok(tables)
    }

    /// Image index of the activities page
    pub async fn scrape_images(&mut self) -> Result<Vec<LabeledTable>> {
        let url = self.config.activities_url();
        let Some(doc) = self.fetch_or_skip(&url).await else {
            return Ok(Vec::new());
        };
        let table = image_table(&doc, &self.resolver, 1);
        info!("Found {} images", table.len());
        Ok(vec![table])
    }
}
