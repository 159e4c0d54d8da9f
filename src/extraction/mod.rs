//! Table and section extraction
//!
//! This module turns parsed wiki pages into records: table capture,
//! classification, row normalization, listing-page links, heading-delimited
//! sections, and the plain wikitable/image dumps.

pub mod classify;
pub mod images;
pub mod links;
pub mod normalize;
pub mod sections;
pub mod table;
pub mod text;
pub mod wikitable;

pub use classify::{classify, TableKind};
pub use links::{LinkExtractor, LinkRef};
pub use normalize::{normalize, normalize_row, Record};
pub use sections::{LocationEntry, RegionLink, SectionExtractor};
pub use table::{CellLink, CellTag, RawCell, RawRow, RawTable};

use crate::document::Document;
use tracing::debug;

/// A table that survived the image filter, normalization and classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTable {
    /// Assigned kind (never `Unknown`)
    pub kind: TableKind,
    /// Normalized records, without provenance
    pub records: Vec<Record>,
}

/// Classify and normalize one table.
///
/// Tables without images, without records, or of unknown kind yield `None`.
pub fn process_table(table: &RawTable) -> Option<ClassifiedTable> {
    if !table.has_images() {
        return None;
    }

    let records = normalize(table);
    if records.is_empty() {
        return None;
    }

    let kind = classify(&table.headers(), table);
    if kind == TableKind::Unknown {
        debug!("Dropping table with headers {:?}", table.headers());
        return None;
    }

    Some(ClassifiedTable { kind, records })
}

/// Every classified table of a page, in document order
pub fn process_document(doc: &Document) -> Vec<ClassifiedTable> {
    doc.tables().iter().filter_map(process_table).collect()
}
