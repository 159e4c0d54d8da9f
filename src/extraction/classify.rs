//! Table classification
//!
//! Assigns a table to one of the fixed semantic kinds from its header texts,
//! with the "Max Efficiency:" marker row taking priority over any header
//! pattern.

use crate::extraction::table::RawTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker that forces [`TableKind::ActivityInfo`]
pub const MAX_EFFICIENCY_MARKER: &str = "Max Efficiency:";

/// Semantic category of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Requirements/efficiency box of an activity
    ActivityInfo,
    /// Skill experience table
    ExperienceInfo,
    /// Regular item drops
    Drops,
    /// Typed special drops (chests, gems, ...)
    SpecialDrops,
    /// Anything else; dropped by the pipeline
    Unknown,
}

impl TableKind {
    /// The kinds that are aggregated, in output order
    pub const AGGREGATED: [TableKind; 4] = [
        TableKind::ActivityInfo,
        TableKind::ExperienceInfo,
        TableKind::Drops,
        TableKind::SpecialDrops,
    ];

    /// snake_case identifier
    pub fn slug(&self) -> &'static str {
        match self {
            TableKind::ActivityInfo => "activity_info",
            TableKind::ExperienceInfo => "experience_info",
            TableKind::Drops => "drops",
            TableKind::SpecialDrops => "special_drops",
            TableKind::Unknown => "unknown",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            TableKind::ActivityInfo => "Activity Info",
            TableKind::ExperienceInfo => "Experience Info",
            TableKind::Drops => "Drops",
            TableKind::SpecialDrops => "Special Drops",
            TableKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Whether any row's text contains the efficiency marker (case-sensitive)
pub fn has_max_efficiency(table: &RawTable) -> bool {
    table
        .rows
        .iter()
        .any(|row| row.text.contains(MAX_EFFICIENCY_MARKER))
}

/// Classify a table. First match wins:
///
/// 1. a row containing `Max Efficiency:` → `ActivityInfo`
/// 2. headers contain `skill(s)` and `baseexp` → `ExperienceInfo`
/// 3. headers contain `type` → `SpecialDrops`
/// 4. headers contain `item` and `quantity` → `Drops`
/// 5. otherwise `Unknown`
///
/// Header matching runs on the lower-cased, space-joined header texts.
pub fn classify<S: AsRef<str>>(headers: &[S], table: &RawTable) -> TableKind {
    if has_max_efficiency(table) {
        return TableKind::ActivityInfo;
    }

    let joined = headers
        .iter()
        .map(|h| h.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if joined.contains("skill(s)") && joined.contains("baseexp") {
        TableKind::ExperienceInfo
    } else if joined.contains("type") {
        TableKind::SpecialDrops
    } else if joined.contains("item") && joined.contains("quantity") {
        TableKind::Drops
    } else {
        TableKind::Unknown
    }
}
