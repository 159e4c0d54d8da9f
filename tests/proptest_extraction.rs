//! Property-based tests for table normalization and aggregation.
//!
//! Uses proptest to generate arbitrary cell texts and tables and verify the
//! invariants the crawl relies on.

use proptest::prelude::*;
use wikiscape::aggregate::ACTIVITY_FIELD;
use wikiscape::extraction::classify::MAX_EFFICIENCY_MARKER;
use wikiscape::extraction::links::dedup_by_key;
use wikiscape::extraction::text::clean_text;
use wikiscape::extraction::{classify, process_table, RawCell, RawRow, RawTable};
use wikiscape::{Aggregator, Record, TableKind};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Cell text that may carry footnote markers
fn arb_cell_text() -> impl Strategy<Value = String> {
    (
        "[A-Za-z][A-Za-z ]{0,15}",
        prop::collection::vec(0u32..100, 0..3),
    )
        .prop_map(|(text, notes)| {
            let markers: String = notes.iter().map(|n| format!("[{n}]")).collect();
            format!("{text}{markers}")
        })
}

/// Header texts that may or may not trigger a classification rule
fn arb_header() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Item".to_string()),
        Just("Quantity".to_string()),
        Just("Type".to_string()),
        Just("Skill(s)".to_string()),
        Just("BaseExp".to_string()),
        Just("Chance".to_string()),
        "[A-Z][a-z]{2,8}",
    ]
}

/// A table with a header row and image-free data rows
fn arb_plain_table() -> impl Strategy<Value = RawTable> {
    (
        prop::collection::vec(arb_header(), 1..5),
        prop::collection::vec(prop::collection::vec(arb_cell_text(), 1..6), 1..6),
    )
        .prop_map(|(headers, rows)| {
            let mut all = vec![RawRow::new(
                headers.into_iter().map(|h| RawCell::text(h).header()).collect(),
            )];
            all.extend(
                rows.into_iter()
                    .map(|cells| RawRow::new(cells.into_iter().map(RawCell::text).collect())),
            );
            RawTable::from_rows(all)
        })
}

/// Add an image cell to every data row
fn with_images(table: RawTable) -> RawTable {
    let rows = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            if i == 0 {
                return row;
            }
            let mut cells = vec![RawCell::image()];
            cells.extend(row.cells);
            RawRow::new(cells)
        })
        .collect();
    RawTable::from_rows(rows)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_clean_text_strips_footnotes(text in arb_cell_text()) {
        let cleaned = clean_text(&text);
        prop_assert!(!cleaned.contains('['));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn prop_image_free_tables_yield_nothing(table in arb_plain_table()) {
        prop_assert!(process_table(&table).is_none());
    }

    #[test]
    fn prop_max_efficiency_has_priority(table in arb_plain_table()) {
        let mut rows = table.rows.clone();
        rows.push(RawRow::new(vec![
            RawCell::image(),
            RawCell::text(MAX_EFFICIENCY_MARKER),
        ]));
        let table = RawTable::from_rows(rows);
        prop_assert_eq!(classify(&table.headers(), &table), TableKind::ActivityInfo);
    }

    #[test]
    fn prop_records_carry_activity(table in arb_plain_table(), activity in "[A-Z][a-z ]{2,20}") {
        let table = with_images(table);
        let mut agg = Aggregator::new();
        if let Some(classified) = process_table(&table) {
            let expected = classified.records.len();
            let appended = agg.append_page(&activity, vec![classified]);
            prop_assert_eq!(appended, expected);
        }
        for set in agg.sets() {
            for record in set.records() {
                prop_assert_eq!(record.get(ACTIVITY_FIELD), Some(activity.as_str()));
            }
        }
    }

    #[test]
    fn prop_records_never_empty(table in arb_plain_table()) {
        let table = with_images(table);
        if let Some(classified) = process_table(&table) {
            prop_assert_ne!(classified.kind, TableKind::Unknown);
            for record in &classified.records {
                prop_assert!(record.has_content());
            }
        }
    }

    #[test]
    fn prop_dedup_keeps_first(keys in prop::collection::vec(0u8..10, 0..30)) {
        let items: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
        let unique = dedup_by_key(items.clone(), |(k, _)| *k);

        let mut distinct = keys.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(unique.len(), distinct.len());

        for (key, index) in &unique {
            let first = items.iter().find(|(k, _)| k == key).map(|(_, i)| *i);
            prop_assert_eq!(first, Some(*index));
        }
    }

    #[test]
    fn prop_unknown_kind_is_dropped(field in "[a-z]{1,8}", value in "[a-z]{1,8}") {
        let mut agg = Aggregator::new();
        let record = Record::new().with(field, value);
        prop_assert_eq!(agg.append(TableKind::Unknown, ACTIVITY_FIELD, "x", vec![record]), 0);
        prop_assert_eq!(agg.total(), 0);
    }
}
