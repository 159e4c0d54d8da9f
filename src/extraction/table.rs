//! Raw table capture
//!
//! A [`RawTable`] is a detached copy of an HTML table: rows of cells with
//! their text, link labels and image flags. Everything downstream works on
//! these values, never on the live `scraper` tree.

use crate::extraction::text::collapse_whitespace;
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("Failed to parse row selector - this is a bug")
});

static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td, th").expect("Failed to parse cell selector - this is a bug")
});

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a").expect("Failed to parse link selector - this is a bug")
});

static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img").expect("Failed to parse image selector - this is a bug")
});

/// Whether a cell was a `<th>` or a `<td>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellTag {
    /// `<th>`
    Header,
    /// `<td>`
    Data,
}

/// An anchor found inside a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLink {
    /// href attribute, if present
    pub href: Option<String>,
    /// Link label, whitespace collapsed
    pub text: String,
}

/// One table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCell {
    /// Cell tag
    pub tag: CellTag,
    /// Text content with whitespace collapsed and trimmed
    pub text: String,
    /// Anchors inside the cell, in document order
    pub links: Vec<CellLink>,
    /// Number of `<img>` elements inside the cell
    pub images: usize,
}

impl RawCell {
    /// Plain data cell with no links or images
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            tag: CellTag::Data,
            text: text.into(),
            links: Vec::new(),
            images: 0,
        }
    }

    /// Cell holding only an image
    pub fn image() -> Self {
        Self {
            images: 1,
            ..Self::text("")
        }
    }

    /// Attach a link to the cell
    pub fn with_link<S: Into<String>>(mut self, href: Option<&str>, text: S) -> Self {
        self.links.push(CellLink {
            href: href.map(String::from),
            text: text.into(),
        });
        self
    }

    /// Mark the cell as a header cell
    pub fn header(mut self) -> Self {
        self.tag = CellTag::Header;
        self
    }

    fn from_element(el: ElementRef<'_>) -> Self {
        let tag = if el.value().name() == "th" {
            CellTag::Header
        } else {
            CellTag::Data
        };
        let links = el
            .select(&LINK_SELECTOR)
            .map(|a| CellLink {
                href: a.value().attr("href").map(String::from),
                text: collapse_whitespace(&a.text().collect::<String>()),
            })
            .collect();

        Self {
            tag,
            text: collapse_whitespace(&el.text().collect::<String>()),
            links,
            images: el.select(&IMAGE_SELECTOR).count(),
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Cells in document order
    pub cells: Vec<RawCell>,
    /// Full row text exactly as concatenated from the tree
    pub text: String,
}

impl RawRow {
    /// Build a row from cells; the row text is the cells' text joined by spaces
    pub fn new(cells: Vec<RawCell>) -> Self {
        let text = cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self { cells, text }
    }
}

/// A detached HTML table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// `class` attribute tokens of the `<table>` element
    pub classes: Vec<String>,
    /// Rows in document order; the first is the header row
    pub rows: Vec<RawRow>,
    /// Number of `<img>` elements anywhere in the table
    pub images: usize,
}

impl RawTable {
    /// Build a table from rows, counting images from the cells
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let images = rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.images)
            .sum();
        Self {
            classes: Vec::new(),
            rows,
            images,
        }
    }

    /// Capture a `<table>` element
    pub fn from_element(table: ElementRef<'_>) -> Self {
        let rows = table
            .select(&ROW_SELECTOR)
            .map(|tr| RawRow {
                cells: tr.select(&CELL_SELECTOR).map(RawCell::from_element).collect(),
                text: tr.text().collect(),
            })
            .collect();

        Self {
            classes: table.value().classes().map(String::from).collect(),
            rows,
            images: table.select(&IMAGE_SELECTOR).count(),
        }
    }

    /// Whether any image element appears in the table
    pub fn has_images(&self) -> bool {
        self.images > 0
    }

    /// Whether the table carries the given class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Concatenated text of every row
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Trimmed, non-empty texts of the first row's cells
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|c| c.text.clone())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
