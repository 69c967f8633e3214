//! Raw ↔ filtered ↔ view coordinate translation.
//!
//! This module handles:
//! - Binary search from raw index to filtered index over a monotonic filter result
//! - Merging annotation rows into the filtered rows (before/after their anchor)
//! - Publishing the resulting tables atomically, last rebuild wins

mod row_index;
mod source;
mod tables;

pub use row_index::{RebuildTicket, RowIndex};
pub use source::{search_raw, FilteredSource};
pub use tables::{MappingTables, PlacedAnnotation};
