//! Row normalization
//!
//! Turns a [`RawTable`] into flat [`Record`]s keyed by header text.
//!
//! Wiki tables put an icon in one cell and the item's name either in the next
//! cell or as link text in the same cell. Name-bearing columns ("Item",
//! "Skill(s)") therefore look one cell ahead when the current cell has no
//! usable text. A leading cell holding only a number is a row index and is
//! not data.

use crate::extraction::table::{RawCell, RawTable};
use crate::extraction::text::{char_len, clean_text, is_row_number};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column-header → cell-text mapping, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

impl Record {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. An existing key keeps its position and takes the new value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`Record::insert`]
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// (name, value) pairs in order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No fields at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// At least one field is non-empty after trimming
    pub fn has_content(&self) -> bool {
        self.0.values().any(|v| !v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Whether a column holds names that may sit behind an image cell
pub fn is_name_column(header: &str) -> bool {
    let lower = header.to_lowercase();
    lower.contains("item") || lower.contains("skill(s)")
}

/// Name shown in a cell: the first link label longer than one character,
/// otherwise the cell text. Footnote markers are stripped either way.
pub fn item_name(cell: &RawCell) -> String {
    cell.links
        .iter()
        .map(|link| link.text.as_str())
        .find(|text| char_len(text) > 1)
        .map(clean_text)
        .unwrap_or_else(|| clean_text(&cell.text))
}

/// Map one data row onto the headers.
///
/// Returns `None` when every field comes out empty.
pub fn normalize_row<S: AsRef<str>>(headers: &[S], cells: &[RawCell]) -> Option<Record> {
    if cells.is_empty() {
        return None;
    }

    let mut cursor = usize::from(is_row_number(&cells[0].text));
    let mut record = Record::new();

    for header in headers {
        let header = header.as_ref();
        let Some(cell) = cells.get(cursor) else {
            record.insert(header, "");
            continue;
        };

        let value = if is_name_column(header) {
            let current = cell.text.as_str();
            if (current.is_empty() || char_len(current) <= 2) && cursor + 1 < cells.len() {
                cursor += 1;
            }
            item_name(&cells[cursor])
        } else {
            clean_text(&cell.text)
        };

        record.insert(header, value);
        cursor += 1;
    }

    record.has_content().then_some(record)
}

/// Normalize every data row of a table; the first row supplies the headers.
pub fn normalize(table: &RawTable) -> Vec<Record> {
    let headers = table.headers();
    if headers.is_empty() {
        return Vec::new();
    }

    table
        .rows
        .iter()
        .skip(1)
        .filter_map(|row| normalize_row(&headers, &row.cells))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::table::RawRow;
    use pretty_assertions::assert_eq;

    fn headers(h: &[&str]) -> Vec<String> {
        h.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_image_cell_then_link_cell() {
        let cells = vec![
            RawCell::text("1"),
            RawCell::image(),
            RawCell::text("Iron Ore (ore)").with_link(Some("/wiki/Iron_Ore"), "Iron Ore"),
            RawCell::text("5"),
        ];
        let record = normalize_row(&headers(&["#", "Item", "Quantity"]), &cells).unwrap();

        assert_eq!(record.get("Item"), Some("Iron Ore"));
        assert_eq!(record.get("Quantity"), Some("5"));
        assert_eq!(record.get("#"), Some(""));
    }

    #[test]
    fn test_image_and_name_in_same_cell() {
        let cells = vec![
            RawCell {
                images: 1,
                ..RawCell::text("Birch Log[2]").with_link(Some("/wiki/Birch_Log"), "Birch Log[2]")
            },
            RawCell::text("1-3"),
        ];
        let record = normalize_row(&headers(&["Item", "Quantity"]), &cells).unwrap();
        assert_eq!(record.get("Item"), Some("Birch Log"));
        assert_eq!(record.get("Quantity"), Some("1-3"));
    }

    #[test]
    fn test_short_link_label_falls_back_to_cell_text() {
        let cell = RawCell::text("Copper Ore").with_link(Some("/wiki/File:x.png"), "x");
        assert_eq!(item_name(&cell), "Copper Ore");
    }

    #[test]
    fn test_lookahead_needs_a_next_cell() {
        let cells = vec![RawCell::text("Ab")];
        let record = normalize_row(&headers(&["Item"]), &cells).unwrap();
        assert_eq!(record.get("Item"), Some("Ab"));
    }

    #[test]
    fn test_missing_cells_become_empty() {
        let cells = vec![RawCell::text("Fishing"), RawCell::text("10")];
        let record = normalize_row(&headers(&["Skill", "Level", "Notes"]), &cells).unwrap();
        assert_eq!(record.get("Notes"), Some(""));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Skill", "Level", "Notes"]);
    }

    #[test]
    fn test_regular_columns_are_cleaned() {
        let cells = vec![RawCell::text("Needs   a  boat [3]")];
        let record = normalize_row(&headers(&["Requirement"]), &cells).unwrap();
        assert_eq!(record.get("Requirement"), Some("Needs a boat"));
    }

    #[test]
    fn test_skill_column_uses_lookahead() {
        let cells = vec![
            RawCell::image(),
            RawCell::text("Fishing").with_link(Some("/wiki/Fishing"), "Fishing"),
            RawCell::text("40"),
        ];
        let record = normalize_row(&headers(&["Skill(s)", "BaseExp"]), &cells).unwrap();
        assert_eq!(record.get("Skill(s)"), Some("Fishing"));
        assert_eq!(record.get("BaseExp"), Some("40"));
    }

    #[test]
    fn test_empty_rows_dropped() {
        let cells = vec![RawCell::text(" "), RawCell::image()];
        assert!(normalize_row(&headers(&["Name", "Icon"]), &cells).is_none());
        assert!(normalize_row(&headers(&["Name"]), &[]).is_none());
    }

    #[test]
    fn test_normalize_table() {
        let table = RawTable::from_rows(vec![
            RawRow::new(vec![
                RawCell::text("Item").header(),
                RawCell::text("").header(),
                RawCell::text("Quantity").header(),
            ]),
            RawRow::new(vec![
                RawCell::image(),
                RawCell::text("Raw Cod").with_link(Some("/wiki/Raw_Cod"), "Raw Cod"),
                RawCell::text("1"),
            ]),
            RawRow::new(vec![RawCell::text(""), RawCell::text("")]),
        ]);

        let records = normalize(&table);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            Record::new().with("Item", "Raw Cod").with("Quantity", "1")
        );
    }

    #[test]
    fn test_duplicate_header_keeps_position() {
        let mut record = Record::new().with("A", "1").with("B", "2");
        record.insert("A", "3");
        assert_eq!(record.fields().collect::<Vec<_>>(), vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_record_serializes_as_object() {
        let record: Record = [("Item", "Log"), ("Quantity", "2")].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Item":"Log","Quantity":"2"}"#);
    }
}
