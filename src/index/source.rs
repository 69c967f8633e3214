//! The filtered log as seen by the row core.

use crate::types::{Anchor, FilteredIndex, RawIndex};

/// Read-only view of the log layer's current filter result.
///
/// Implementations are borrowed for the duration of a rebuild or a query and
/// never retained. `raw_of` must be monotonically non-decreasing over
/// increasing filtered index; the loader may append concurrently, so any
/// index beyond what the implementation currently knows yields `None`.
pub trait FilteredSource {
    /// Number of records currently passing the filter.
    fn filtered_count(&self) -> u64;

    /// Raw index of the record at a filtered position.
    fn raw_of(&self, filtered: FilteredIndex) -> Option<RawIndex>;

    /// Raw index of the record an anchor points at.
    fn resolve_anchor(&self, anchor: &Anchor) -> Option<RawIndex>;
}

impl<S: FilteredSource + ?Sized> FilteredSource for &S {
    fn filtered_count(&self) -> u64 {
        (**self).filtered_count()
    }

    fn raw_of(&self, filtered: FilteredIndex) -> Option<RawIndex> {
        (**self).raw_of(filtered)
    }

    fn resolve_anchor(&self, anchor: &Anchor) -> Option<RawIndex> {
        (**self).resolve_anchor(anchor)
    }
}

/// Lowest filtered index in `0..len` whose raw index is exactly `raw`.
///
/// Binary search exploiting monotonicity of `raw_of`. A `None` probe (index
/// beyond the source's current knowledge) is treated as greater than any raw
/// index, so known positions below it are still found.
pub fn search_raw<S: FilteredSource + ?Sized>(
    source: &S,
    len: FilteredIndex,
    raw: RawIndex,
) -> Option<FilteredIndex> {
    let mut lo: FilteredIndex = 0;
    let mut hi: FilteredIndex = len;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match source.raw_of(mid) {
            Some(probe) if probe < raw => lo = mid + 1,
            // Unknown positions sort after every known raw index.
            _ => hi = mid,
        }
    }
    if lo < len && source.raw_of(lo)? == raw {
        Some(lo)
    } else {
        None
    }
}
