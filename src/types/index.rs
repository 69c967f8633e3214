//! Coordinate spaces.
//!
//! Three index spaces are in play and are deliberately kept as plain integers:
//! - raw: position in the complete, unfiltered log
//! - filtered: dense position within the records passing the active filter
//! - view: position in the displayed sequence, annotation rows included

use serde::{Deserialize, Serialize};

/// Position of a record in the complete, unfiltered log.
pub type RawIndex = u64;

/// Position of a record within the subsequence passing the active filter.
pub type FilteredIndex = u32;

/// Row number in the final displayed sequence.
pub type ViewRow = u32;

/// What a single view row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "index")]
pub enum ViewSlot {
    /// The row of a filtered record.
    Filtered(FilteredIndex),
    /// An annotation row; the index points into the placed annotations of the
    /// current mapping tables.
    Annotation(u32),
}

impl ViewSlot {
    /// Filtered index if this is a record row.
    pub fn filtered(self) -> Option<FilteredIndex> {
        match self {
            Self::Filtered(f) => Some(f),
            Self::Annotation(_) => None,
        }
    }

    /// True for annotation rows.
    pub fn is_annotation(self) -> bool {
        matches!(self, Self::Annotation(_))
    }
}
