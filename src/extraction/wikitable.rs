//! Plain dump of `wikitable` tables
//!
//! No classification here: every `table.wikitable` with a header row and at
//! least one data row becomes a [`LabeledTable`] as-is.

use crate::document::Document;
use crate::export::LabeledTable;
use crate::extraction::table::{CellTag, RawTable};

/// Class MediaWiki puts on content tables
pub const WIKITABLE_CLASS: &str = "wikitable";

/// Convert one table: headers from the first row's `<th>` cells, rows from the
/// `<td>` cells of every later row. Rows are padded or cut to the header width.
pub fn dump_table(table: &RawTable, number: usize) -> Option<LabeledTable> {
    let header_row = table.rows.first()?;
    let columns: Vec<String> = header_row
        .cells
        .iter()
        .filter(|c| c.tag == CellTag::Header)
        .map(|c| c.text.clone())
        .collect();
    if columns.is_empty() {
        return None;
    }

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .skip(1)
        .map(|row| {
            row.cells
                .iter()
                .filter(|c| c.tag == CellTag::Data)
                .map(|c| c.text.clone())
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .map(|mut cells| {
            cells.resize(columns.len(), String::new());
            cells
        })
        .collect();
    if rows.is_empty() {
        return None;
    }

    Some(LabeledTable::new(
        number,
        format!("{}_{}", WIKITABLE_CLASS, number),
        columns,
        rows,
    ))
}

/// Every usable wikitable on the page, numbered by position among all
/// wikitables (1-based), skipped ones included in the numbering.
pub fn dump_wikitables(doc: &Document) -> Vec<LabeledTable> {
    doc.tables()
        .iter()
        .filter(|t| t.has_class(WIKITABLE_CLASS))
        .enumerate()
        .filter_map(|(i, t)| dump_table(t, i + 1))
        .collect()
}
