//! Result aggregation
//!
//! [`Aggregator`] owns one [`ResultSet`] per aggregated [`TableKind`] and is
//! passed by `&mut` into each page's processing step. Records get their
//! provenance field before they are appended and are never touched again.

use crate::export::LabeledTable;
use crate::extraction::{ClassifiedTable, LocationEntry, Record, RegionLink, TableKind};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Provenance column for records scraped from activity pages
pub const ACTIVITY_FIELD: &str = "Activity";

/// Provenance column for records scraped from region pages
pub const REGION_FIELD: &str = "Region";

/// Sample rows shown per result set in the summary
pub const DEFAULT_SAMPLE_SIZE: usize = 2;

/// All records of one kind, in crawl order. Duplicates across pages are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    kind: TableKind,
    records: Vec<Record>,
}

impl ResultSet {
    /// Empty set for `kind`
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    /// Kind of the records
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Records in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of all record keys in first-seen order
    pub fn columns(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for key in self.records.iter().flat_map(Record::keys) {
            if seen.insert(key) {
                columns.push(key.to_string());
            }
        }
        columns
    }

    /// Tabular view; a record lacking a column gets an empty cell
    pub fn to_labeled_table(&self, number: usize) -> LabeledTable {
        let columns = self.columns();
        let rows = self
            .records
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| r.get(c).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();
        LabeledTable::new(number, self.kind.slug(), columns, rows)
    }
}

/// Per-kind accumulator for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregator {
    sets: Vec<ResultSet>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Empty result sets for every aggregated kind
    pub fn new() -> Self {
        Self {
            sets: TableKind::AGGREGATED.iter().copied().map(ResultSet::new).collect(),
        }
    }

    /// The set for `kind`; `None` for [`TableKind::Unknown`]
    pub fn get(&self, kind: TableKind) -> Option<&ResultSet> {
        self.sets.iter().find(|s| s.kind == kind)
    }

    /// All sets in fixed kind order
    pub fn sets(&self) -> &[ResultSet] {
        &self.sets
    }

    /// Tag each record with `provenance_field = source` and append it to the
    /// set for `kind`. Returns how many records were appended; unknown kinds
    /// are dropped.
    pub fn append(
        &mut self,
        kind: TableKind,
        provenance_field: &str,
        source: &str,
        records: Vec<Record>,
    ) -> usize {
        let Some(set) = self.sets.iter_mut().find(|s| s.kind == kind) else {
            debug!("Dropping {} records of kind {}", records.len(), kind);
            return 0;
        };

        let count = records.len();
        set.records.extend(records.into_iter().map(|mut record| {
            record.insert(provenance_field, source);
            record
        }));
        count
    }

    /// Append every classified table of an activity page
    pub fn append_page(&mut self, activity: &str, tables: Vec<ClassifiedTable>) -> usize {
        tables
            .into_iter()
            .map(|t| self.append(t.kind, ACTIVITY_FIELD, activity, t.records))
            .sum()
    }

    /// Total records across all sets
    pub fn total(&self) -> usize {
        self.sets.iter().map(ResultSet::len).sum()
    }

    /// Kinds with at least one record
    pub fn available(&self) -> Vec<TableKind> {
        self.sets
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.kind)
            .collect()
    }

    /// Counts plus the first `sample_size` records of each set
    pub fn summary(&self, sample_size: usize) -> Summary {
        Summary {
            entries: self
                .sets
                .iter()
                .map(|s| SummaryEntry {
                    kind: s.kind,
                    count: s.len(),
                    sample: s.records.iter().take(sample_size).cloned().collect(),
                })
                .collect(),
        }
    }

    /// Non-empty sets as labeled tables, numbered from 1
    pub fn to_labeled_tables(&self) -> Vec<LabeledTable> {
        self.sets
            .iter()
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, s)| s.to_labeled_table(i + 1))
            .collect()
    }
}

/// One line of the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Result set kind
    pub kind: TableKind,
    /// Record count
    pub count: usize,
    /// First few records
    pub sample: Vec<Record>,
}

/// Record counts and samples per result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// One entry per aggregated kind, fixed order
    pub entries: Vec<SummaryEntry>,
}

impl Summary {
    /// Count for `kind`
    pub fn count(&self, kind: TableKind) -> usize {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.count)
            .unwrap_or(0)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SCRAPING SUMMARY ===")?;
        for entry in &self.entries {
            writeln!(f, "{} records: {}", entry.kind.label(), entry.count)?;
        }
        for entry in self.entries.iter().filter(|e| !e.sample.is_empty()) {
            writeln!(f)?;
            writeln!(f, "Sample {} data:", entry.kind.label())?;
            for record in &entry.sample {
                let line = record
                    .fields()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}

/// Regions and their locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationResults {
    regions: Vec<RegionLink>,
    locations: Vec<LocationEntry>,
    seen_locations: HashSet<String>,
}

impl LocationResults {
    /// Empty results
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the region list
    pub fn set_regions(&mut self, regions: Vec<RegionLink>) {
        self.regions = regions;
    }

    /// Append locations, skipping names already collected (first wins).
    /// Returns how many were new.
    pub fn add_locations(&mut self, entries: Vec<LocationEntry>) -> usize {
        let before = self.locations.len();
        for entry in entries {
            if self.seen_locations.insert(entry.location.clone()) {
                self.locations.push(entry);
            }
        }
        self.locations.len() - before
    }

    /// Regions in page order
    pub fn regions(&self) -> &[RegionLink] {
        &self.regions
    }

    /// Locations in crawl order
    pub fn locations(&self) -> &[LocationEntry] {
        &self.locations
    }

    /// Locations as provenance-tagged records
    pub fn location_records(&self) -> Vec<Record> {
        self.locations
            .iter()
            .map(|l| {
                Record::new()
                    .with("Location", l.location.as_str())
                    .with(REGION_FIELD, l.region.as_str())
            })
            .collect()
    }

    /// `regions` and `locations` tables (empty ones omitted), numbered from 1
    pub fn to_labeled_tables(&self) -> Vec<LabeledTable> {
        let regions = LabeledTable::new(
            0,
            "regions",
            vec!["region".to_string(), "link".to_string()],
            self.regions
                .iter()
                .map(|r| vec![r.region.clone(), r.link.clone()])
                .collect(),
        );
        let locations = LabeledTable::new(
            0,
            "locations",
            vec!["region".to_string(), "location".to_string()],
            self.locations
                .iter()
                .map(|l| vec![l.region.clone(), l.location.clone()])
                .collect(),
        );

        [regions, locations]
            .into_iter()
            .filter(|t| !t.rows.is_empty())
            .enumerate()
            .map(|(i, t)| t.renumbered(i + 1))
            .collect()
    }
}
