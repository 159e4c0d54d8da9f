//! Heading-delimited section extraction
//!
//! A section starts at a heading whose text equals a label and runs until the
//! next heading of the same or a shallower level. The walk is an index cursor
//! over [`Document::flatten`], so the tree is never traversed live.

use crate::document::{Document, FlatNode};
use crate::error::ExtractionError;
use crate::extraction::links::{dedup_by_key, LinkRef};
use crate::fetch::UrlResolver;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deepest heading level considered when looking for a section start
pub const MAX_START_LEVEL: u8 = 4;

/// A region and the page describing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLink {
    /// Region name (link label)
    pub region: String,
    /// Region page URL
    pub link: String,
}

/// A location listed on a region page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    /// Region the location belongs to
    pub region: String,
    /// Location name
    pub location: String,
}

/// Index of the first `h1`..`h4` whose trimmed text equals `label`
pub fn find_heading(nodes: &[FlatNode], label: &str) -> Option<usize> {
    nodes.iter().position(|node| match node {
        FlatNode::Heading { level, text } => *level <= MAX_START_LEVEL && text == label,
        _ => false,
    })
}

/// Nodes after the heading at `start`, up to (not including) the next heading
/// of equal or shallower level.
pub fn section_after(nodes: &[FlatNode], start: usize) -> &[FlatNode] {
    let Some(level) = nodes.get(start).and_then(FlatNode::heading_level) else {
        return &[];
    };

    let mut cursor = start + 1;
    while cursor < nodes.len() {
        if matches!(nodes[cursor].heading_level(), Some(l) if l <= level) {
            break;
        }
        cursor += 1;
    }
    &nodes[start + 1..cursor]
}

/// Section extraction functionality
pub struct SectionExtractor;

impl SectionExtractor {
    /// The nodes of the section headed `label`
    pub fn section<'a>(
        nodes: &'a [FlatNode],
        label: &str,
    ) -> Result<&'a [FlatNode], ExtractionError> {
        let start = find_heading(nodes, label)
            .ok_or_else(|| ExtractionError::SectionNotFound(label.to_string()))?;
        Ok(section_after(nodes, start))
    }

    /// Every link in the section, root-relative hrefs made absolute
    pub fn links(
        doc: &Document,
        label: &str,
        resolver: &UrlResolver,
    ) -> Result<Vec<LinkRef>, ExtractionError> {
        let nodes = doc.flatten();
        let section = Self::section(&nodes, label)?;

        Ok(section
            .iter()
            .filter_map(|node| match node {
                FlatNode::Link { href, text } => {
                    Some(LinkRef::new(text.clone(), resolver.absolutize(href)))
                }
                _ => None,
            })
            .collect())
    }

    /// Region links under `label`: blacklisted fragments removed, then
    /// deduplicated by link (first wins).
    pub fn region_links<S: AsRef<str>>(
        doc: &Document,
        label: &str,
        resolver: &UrlResolver,
        blacklist: &[S],
    ) -> Result<Vec<RegionLink>, ExtractionError> {
        let links = Self::links(doc, label, resolver)?;
        let total = links.len();

        let regions: Vec<RegionLink> = links
            .into_iter()
            .filter(|l| !blacklist.iter().any(|frag| l.url.contains(frag.as_ref())))
            .map(|l| RegionLink {
                region: l.name,
                link: l.url,
            })
            .collect();
        let regions = dedup_by_key(regions, |r: &RegionLink| r.link.clone());

        debug!("Kept {} of {} links under '{}'", regions.len(), total, label);
        Ok(regions)
    }

    /// Non-empty list item texts in the section
    pub fn list_items(doc: &Document, label: &str) -> Result<Vec<String>, ExtractionError> {
        let nodes = doc.flatten();
        let section = Self::section(&nodes, label)?;

        Ok(section
            .iter()
            .filter_map(|node| match node {
                FlatNode::ListItem { text } if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
            .collect())
    }

    /// Locations listed under `label`, tagged with `region`
    pub fn locations(
        doc: &Document,
        label: &str,
        region: &str,
    ) -> Result<Vec<LocationEntry>, ExtractionError> {
        Ok(Self::list_items(doc, label)?
            .into_iter()
            .map(|location| LocationEntry {
                region: region.to_string(),
                location,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(level: u8, text: &str) -> FlatNode {
        FlatNode::Heading {
            level,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_section_stops_at_equal_level() {
        let nodes = vec![
            heading(2, "Regions"),
            FlatNode::Other,
            heading(3, "Sub"),
            FlatNode::List,
            heading(2, "Next"),
            FlatNode::List,
        ];
        let section = SectionExtractor::section(&nodes, "Regions").unwrap();
        assert_eq!(section.len(), 3);
        assert_eq!(section[1], heading(3, "Sub"));
    }

    #[test]
    fn test_section_stops_at_shallower_level() {
        let nodes = vec![heading(3, "Locations"), FlatNode::List, heading(1, "Top")];
        assert_eq!(section_after(&nodes, 0), &[FlatNode::List]);
    }

    #[test]
    fn test_section_runs_to_end() {
        let nodes = vec![heading(2, "Locations"), FlatNode::List, FlatNode::Other];
        assert_eq!(section_after(&nodes, 0).len(), 2);
    }

    #[test]
    fn test_heading_must_match_exactly() {
        let nodes = vec![heading(2, "Regions of Arenum"), heading(5, "Regions")];
        assert!(matches!(
            SectionExtractor::section(&nodes, "Regions"),
            Err(ExtractionError::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_locations_from_document() {
        let html = r#"<html><body>
            <h2>Overview</h2><ul><li>Not a location</li></ul>
            <h2>Locations</h2>
            <p>The region contains:</p>
            <ul><li>Kallaheim</li><li><a href="/wiki/Halfling_Campgrounds">Halfling Campgrounds</a></li><li>Frusenholm</li><li>Old Arenum</li><li>  </li></ul>
            <h2>Trivia</h2>
            <ul><li>Beyond the section</li></ul>
        </body></html>"#;
        let doc = Document::parse("https://x/wiki/Jarvonia", html);
        let locations = SectionExtractor::locations(&doc, "Locations", "Jarvonia").unwrap();

        assert_eq!(locations.len(), 4);
        assert_eq!(
            locations[1],
            LocationEntry {
                region: "Jarvonia".to_string(),
                location: "Halfling Campgrounds".to_string()
            }
        );
        assert!(locations.iter().all(|l| l.location != "Beyond the section"));
    }

    #[test]
    fn test_region_links_filter_and_dedup() {
        let html = r##"<html><body>
            <h2>Regions</h2>
            <a href="/wiki/File:Coat_of_Arms.svg"><img src="/c.svg"></a>
            <ul>
              <li><a href="/wiki/Jarvonia">Jarvonia</a></li>
              <li><a href="/wiki/Jarvonia">Jarvonia (again)</a></li>
              <li><a href="/wiki/Category:Regions">All regions</a></li>
              <li><a href="#Syrenthia">Syrenthia</a></li>
            </ul>
            <h2>History</h2>
            <a href="/wiki/Wrong">Wrong</a>
        </body></html>"##;
        let doc = Document::parse("https://wiki.walkscape.app/wiki/Arenum", html);
        let resolver = UrlResolver::new("https://wiki.walkscape.app").unwrap();
        let regions = SectionExtractor::region_links(
            &doc,
            "Regions",
            &resolver,
            &["Coat_of_Arms.svg", "Category:"],
        )
        .unwrap();

        assert_eq!(
            regions,
            vec![
                RegionLink {
                    region: "Jarvonia".to_string(),
                    link: "https://wiki.walkscape.app/wiki/Jarvonia".to_string()
                },
                RegionLink {
                    region: "Syrenthia".to_string(),
                    link: "#Syrenthia".to_string()
                },
            ]
        );
    }
}
