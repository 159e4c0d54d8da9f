//! Parsed wiki pages
//!
//! [`Document`] wraps the `scraper` tree of one fetched page. It is created per
//! fetch, queried by the extractors, and dropped once the page is processed.

use crate::extraction::table::RawTable;
use crate::extraction::text::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("Failed to parse table selector - this is a bug")
});

static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img[src]").expect("Failed to parse image selector - this is a bug")
});

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});

/// One element of the page in document order, reduced to what the section
/// extractor needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatNode {
    /// `h1`..`h6`
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Trimmed heading text
        text: String,
    },
    /// `a[href]`
    Link {
        /// Raw href attribute
        href: String,
        /// Link label, whitespace collapsed
        text: String,
    },
    /// `ul` or `ol`
    List,
    /// `li`
    ListItem {
        /// Item text including nested content, whitespace collapsed
        text: String,
    },
    /// Any other element
    Other,
}

impl FlatNode {
    /// Heading level if this node is a heading
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            FlatNode::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }
}

/// A parsed page
pub struct Document {
    url: String,
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("url", &self.url).finish()
    }
}

impl Document {
    /// Parse raw HTML fetched from `url`
    pub fn parse(url: &str, body: &str) -> Self {
        Self {
            url: url.to_string(),
            html: Html::parse_document(body),
        }
    }

    /// URL the page was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Underlying parsed tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Page `<title>`, if any
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE_SELECTOR)
            .next()
            .map(|t| collapse_whitespace(&t.text().collect::<String>()))
            .filter(|t| !t.is_empty())
    }

    /// Every `<table>` on the page, in document order, nested tables included
    pub fn tables(&self) -> Vec<RawTable> {
        self.html
            .select(&TABLE_SELECTOR)
            .map(RawTable::from_element)
            .collect()
    }

    /// `src` attribute of every image, in document order
    pub fn image_sources(&self) -> Vec<String> {
        self.html
            .select(&IMAGE_SELECTOR)
            .filter_map(|img| img.value().attr("src"))
            .map(|src| src.to_string())
            .collect()
    }

    /// Flatten the element tree into document order.
    ///
    /// Section walks run an index cursor over this list instead of walking
    /// the live tree.
    pub fn flatten(&self) -> Vec<FlatNode> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(flat_node)
            .collect()
    }
}

fn flat_node(el: ElementRef<'_>) -> FlatNode {
    let name = el.value().name();
    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => FlatNode::Heading {
            level: name.as_bytes()[1] - b'0',
            text: el.text().collect::<String>().trim().to_string(),
        },
        "a" => match el.value().attr("href") {
            Some(href) => FlatNode::Link {
                href: href.to_string(),
                text: collapse_whitespace(&el.text().collect::<String>()),
            },
            None => FlatNode::Other,
        },
        "ul" | "ol" => FlatNode::List,
        "li" => FlatNode::ListItem {
            text: collapse_whitespace(&el.text().collect::<String>()),
        },
        _ => FlatNode::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title> Fishing - WalkScape Wiki </title></head><body>
        <h2>Overview</h2>
        <p>See <a href="/wiki/Fishing">Fishing</a>.</p>
        <ul><li>One <b>fish</b></li><li>Two</li></ul>
        <a name="anchor-only">no href</a>
        <table><tr><td><img src="/images/fish.png"></td></tr></table>
        </body></html>"#;

    #[test]
    fn test_title() {
        let doc = Document::parse("https://wiki.walkscape.app/wiki/Fishing", PAGE);
        assert_eq!(doc.title().as_deref(), Some("Fishing - WalkScape Wiki"));
        assert_eq!(doc.url(), "https://wiki.walkscape.app/wiki/Fishing");
    }

    #[test]
    fn test_tables_and_images() {
        let doc = Document::parse("https://x", PAGE);
        assert_eq!(doc.tables().len(), 1);
        assert_eq!(doc.image_sources(), vec!["/images/fish.png".to_string()]);
    }

    #[test]
    fn test_flatten_document_order() {
        let doc = Document::parse("https://x", PAGE);
        let interesting: Vec<FlatNode> = doc
            .flatten()
            .into_iter()
            .filter(|n| !matches!(n, FlatNode::Other))
            .collect();

        assert_eq!(
            interesting,
            vec![
                FlatNode::Heading {
                    level: 2,
                    text: "Overview".to_string()
                },
                FlatNode::Link {
                    href: "/wiki/Fishing".to_string(),
                    text: "Fishing".to_string()
                },
                FlatNode::List,
                FlatNode::ListItem {
                    text: "One fish".to_string()
                },
                FlatNode::ListItem {
                    text: "Two".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_heading_level() {
        let node = FlatNode::Heading {
            level: 3,
            text: "Locations".to_string(),
        };
        assert_eq!(node.heading_level(), Some(3));
        assert_eq!(FlatNode::List.heading_level(), None);
    }
}
