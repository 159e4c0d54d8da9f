//! Link extraction from listing pages
//!
//! Finds the table that mentions a locator text and collects the wiki links in
//! its second column.

use crate::document::Document;
use crate::error::ExtractionError;
use crate::extraction::table::RawTable;
use crate::extraction::text::char_len;
use crate::fetch::UrlResolver;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Path fragment every followed link must contain
pub const WIKI_PATH_FRAGMENT: &str = "/wiki/";

/// A named link to a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRef {
    /// Display name
    pub name: String,
    /// Absolute URL
    pub url: String,
}

impl LinkRef {
    /// Create a link
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Keep the first occurrence of each key, preserving order
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + std::hash::Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// Link extraction functionality
pub struct LinkExtractor;

impl LinkExtractor {
    /// First table whose text contains `locator` (case-insensitive)
    pub fn find_table<'a>(tables: &'a [RawTable], locator: &str) -> Option<&'a RawTable> {
        let needle = locator.to_lowercase();
        tables
            .iter()
            .find(|t| t.text().to_lowercase().contains(&needle))
    }

    /// Links in the second column of each row of `table`, resolved and
    /// deduplicated by URL (first wins). Labels of two characters or fewer
    /// are icons and are skipped.
    pub fn second_column_links(table: &RawTable, resolver: &UrlResolver) -> Vec<LinkRef> {
        let links = table
            .rows
            .iter()
            .filter(|row| row.cells.len() >= 2)
            .flat_map(|row| row.cells[1].links.iter())
            .filter_map(|link| {
                let href = link.href.as_deref()?;
                if !href.contains(WIKI_PATH_FRAGMENT) {
                    return None;
                }
                let name = link.text.trim();
                if char_len(name) <= 2 {
                    return None;
                }
                let url = resolver.resolve(href)?;
                Some(LinkRef::new(name, url))
            })
            .collect();

        dedup_by_key(links, |l: &LinkRef| l.url.clone())
    }

    /// Extract the page links listed in the table identified by `locator`.
    ///
    /// A missing table is reported as [`ExtractionError::TableNotFound`]; the
    /// caller decides whether that is fatal.
    #[instrument(skip(doc, resolver), fields(url = doc.url()))]
    pub fn extract_from_table(
        doc: &Document,
        locator: &str,
        resolver: &UrlResolver,
    ) -> Result<Vec<LinkRef>, ExtractionError> {
        let tables = doc.tables();
        debug!("Searching {} tables for '{}'", tables.len(), locator);

        let table = Self::find_table(&tables, locator)
            .ok_or_else(|| ExtractionError::TableNotFound(locator.to_string()))?;

        let links = Self::second_column_links(table, resolver);
        info!("Found {} unique links", links.len());
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = r#"<html><body>
        <table><tr><td>Navigation</td><td><a href="/wiki/Main">Main</a></td></tr></table>
        <table class="wikitable">
          <tr><th>Icon</th><th>Activity</th><th>Skill</th></tr>
          <tr><td><img src="/a.png"></td><td><a href="/wiki/Antique_Market_Assessor">Antique Market Assessor</a></td><td>Trinketry</td></tr>
          <tr><td><img src="/b.png"></td><td><a href="/wiki/Fishing_Spot">Fishing Spot</a> <a href="/wiki/File:x.png">xx</a></td><td>Fishing</td></tr>
          <tr><td><img src="/c.png"></td><td><a href="/wiki/Fishing_Spot">Fish spot (alt)</a></td><td>Fishing</td></tr>
          <tr><td><img src="/d.png"></td><td><a href="https://elsewhere.example/x">External</a></td><td>-</td></tr>
          <tr><td>only one cell</td></tr>
        </table>
    </body></html>"#;

    fn resolver() -> UrlResolver {
        UrlResolver::new("https://wiki.walkscape.app").unwrap()
    }

    #[test]
    fn test_extract_from_table() {
        let doc = Document::parse("https://wiki.walkscape.app/wiki/Activities", LISTING);
        let links =
            LinkExtractor::extract_from_table(&doc, "antique market assessor", &resolver()).unwrap();

        assert_eq!(
            links,
            vec![
                LinkRef::new(
                    "Antique Market Assessor",
                    "https://wiki.walkscape.app/wiki/Antique_Market_Assessor"
                ),
                LinkRef::new("Fishing Spot", "https://wiki.walkscape.app/wiki/Fishing_Spot"),
            ]
        );
    }

    #[test]
    fn test_missing_table() {
        let doc = Document::parse("https://x", LISTING);
        let err = LinkExtractor::extract_from_table(&doc, "Nonexistent Activity", &resolver())
            .unwrap_err();
        assert!(matches!(err, ExtractionError::TableNotFound(_)));
    }

    #[test]
    fn test_dedup_keeps_first() {
        let items = vec![
            LinkRef::new("A", "https://x/1"),
            LinkRef::new("B", "https://x/1"),
            LinkRef::new("C", "https://x/2"),
        ];
        let unique = dedup_by_key(items, |l| l.url.clone());
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "A");
        assert_eq!(unique[1].name, "C");
    }
}
