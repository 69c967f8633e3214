//! Mapping tables between filtered indices and view rows.
//!
//! Built in one pass from a snapshot of the filter result and the annotation
//! list, then published as a whole. A table set with no placed annotation
//! keeps no arrays at all and translates by identity.

use tracing::debug;

use super::source::{search_raw, FilteredSource};
use crate::error::{LogviewError, Result};
use crate::types::{Annotation, AnchorSide, FilteredIndex, ViewRow, ViewSlot};

/// An annotation that resolved into the current filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedAnnotation {
    /// Position in the annotation list the tables were built from
    pub store_index: usize,
    /// Filtered index of the anchor record
    pub filtered: FilteredIndex,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    /// View row == filtered index.
    Identity,
    Interleaved {
        slots: Vec<ViewSlot>,
        filtered_to_view: Vec<ViewRow>,
    },
}

/// Immutable raw/filtered/view translation tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTables {
    filtered_count: FilteredIndex,
    layout: Layout,
    /// Placed annotations in view order
    placed: Vec<PlacedAnnotation>,
    dropped: usize,
}

impl Default for MappingTables {
    fn default() -> Self {
        Self::empty()
    }
}

impl MappingTables {
    /// Tables for an empty filter result.
    pub fn empty() -> Self {
        Self {
            filtered_count: 0,
            layout: Layout::Identity,
            placed: Vec::new(),
            dropped: 0,
        }
    }

    /// Identity tables for `filtered_count` rows and no annotations.
    pub fn identity(filtered_count: FilteredIndex) -> Self {
        Self {
            filtered_count,
            ..Self::empty()
        }
    }

    /// Merge the filtered rows with the annotations anchored into them.
    ///
    /// Each annotation's anchor is resolved to a raw index and then to the
    /// filtered index carrying exactly that raw index. Annotations whose
    /// anchor does not resolve, or resolves to a record outside the filter,
    /// are left out of these tables (they stay in the caller's list).
    /// Annotations sharing an anchor and side are ordered by creation time,
    /// ties keeping list order.
    ///
    /// # Errors
    /// Fails without side effects when `filtered_count` is negative or the
    /// resulting row count is not addressable.
    pub fn build<S: FilteredSource + ?Sized>(
        filtered_count: i64,
        source: &S,
        annotations: &[Annotation],
    ) -> Result<Self> {
        let count = FilteredIndex::try_from(filtered_count)
            .map_err(|_| LogviewError::InvalidFilteredCount(filtered_count))?;

        if annotations.is_empty() {
            return Ok(Self::identity(count));
        }

        let mut resolved: Vec<(FilteredIndex, usize)> = annotations
            .iter()
            .enumerate()
            .filter_map(|(store_index, a)| {
                let raw = source.resolve_anchor(&a.anchor)?;
                let filtered = search_raw(source, count, raw)?;
                Some((filtered, store_index))
            })
            .collect();
        let dropped = annotations.len() - resolved.len();

        if resolved.is_empty() {
            debug!(
                filtered_count = count,
                dropped, "no annotation resolved into the filtered set"
            );
            return Ok(Self {
                dropped,
                ..Self::identity(count)
            });
        }

        let total = u64::from(count) + resolved.len() as u64;
        let Ok(total_rows) = ViewRow::try_from(total) else {
            return Err(LogviewError::TooManyRows(total));
        };

        // Stable: equal keys keep list order.
        resolved.sort_by_key(|&(filtered, store_index)| {
            let a = annotations.get(store_index);
            let created = a.map_or(0, |a| a.created_utc_ms);
            (filtered, a.is_some_and(Annotation::is_after), created)
        });

        let mut slots = Vec::with_capacity(total_rows as usize);
        let mut filtered_to_view = Vec::with_capacity(count as usize);
        let mut placed = Vec::with_capacity(resolved.len());
        let mut pending = resolved.into_iter().peekable();

        for filtered in 0..count {
            for side in [AnchorSide::Before, AnchorSide::After] {
                if side == AnchorSide::After {
                    filtered_to_view.push(slot_row(&slots));
                    slots.push(ViewSlot::Filtered(filtered));
                }
                while let Some(&(f, store_index)) = pending.peek() {
                    let Some(annotation) = annotations.get(store_index) else {
                        pending.next();
                        continue;
                    };
                    if f != filtered || annotation.side != side {
                        break;
                    }
                    slots.push(ViewSlot::Annotation(slot_row(&placed)));
                    placed.push(PlacedAnnotation {
                        store_index,
                        filtered,
                        annotation: annotation.clone(),
                    });
                    pending.next();
                }
            }
        }

        debug!(
            filtered_count = count,
            placed = placed.len(),
            dropped,
            rows = slots.len(),
            "row mapping rebuilt"
        );

        Ok(Self {
            filtered_count: count,
            layout: Layout::Interleaved {
                slots,
                filtered_to_view,
            },
            placed,
            dropped,
        })
    }

    /// Total number of view rows.
    pub fn row_count(&self) -> ViewRow {
        match &self.layout {
            Layout::Identity => self.filtered_count,
            Layout::Interleaved { slots, .. } => slot_row(slots),
        }
    }

    pub fn filtered_count(&self) -> FilteredIndex {
        self.filtered_count
    }

    /// What a view row shows, `None` if out of range.
    pub fn view_slot(&self, view_row: ViewRow) -> Option<ViewSlot> {
        match &self.layout {
            Layout::Identity => {
                (view_row < self.filtered_count).then_some(ViewSlot::Filtered(view_row))
            }
            Layout::Interleaved { slots, .. } => slots.get(view_row as usize).copied(),
        }
    }

    pub fn view_to_filtered(&self, view_row: ViewRow) -> Option<FilteredIndex> {
        self.view_slot(view_row)?.filtered()
    }

    pub fn view_to_annotation(&self, view_row: ViewRow) -> Option<&PlacedAnnotation> {
        match self.view_slot(view_row)? {
            ViewSlot::Annotation(i) => self.placed.get(i as usize),
            ViewSlot::Filtered(_) => None,
        }
    }

    /// View row of a filtered record's own row.
    pub fn filtered_to_view(&self, filtered: FilteredIndex) -> Option<ViewRow> {
        match &self.layout {
            Layout::Identity => (filtered < self.filtered_count).then_some(filtered),
            Layout::Interleaved {
                filtered_to_view, ..
            } => filtered_to_view.get(filtered as usize).copied(),
        }
    }

    /// Placed annotations in view order.
    pub fn placed(&self) -> &[PlacedAnnotation] {
        &self.placed
    }

    /// Annotations left out because their anchor did not resolve.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// True when no annotation is interleaved.
    pub fn is_identity(&self) -> bool {
        matches!(self.layout, Layout::Identity)
    }
}

/// Next row number of a table whose length was bounded at build time.
fn slot_row<T>(v: &[T]) -> ViewRow {
    ViewRow::try_from(v.len()).unwrap_or(ViewRow::MAX)
}
