//! Published row mapping and its coordinate lookups.

use tracing::{debug, warn};

use super::source::{search_raw, FilteredSource};
use super::tables::{MappingTables, PlacedAnnotation};
use crate::error::Result;
use crate::types::{Annotation, FilteredIndex, RawIndex, ViewRow, ViewSlot};

/// Identifies one rebuild request.
///
/// Tickets are ordered; installing tables built for an older ticket than the
/// last installed one is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RebuildTicket(u64);

/// Owner of the currently published [`MappingTables`].
///
/// Readers always see one complete table set: new tables are built off to
/// the side and swapped in with a single assignment.
#[derive(Debug, Default)]
pub struct RowIndex {
    tables: MappingTables,
    issued: u64,
    installed: u64,
}

impl RowIndex {
    /// Empty index: zero rows until the first rebuild.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a ticket for a rebuild whose tables may be built elsewhere.
    pub fn begin_rebuild(&mut self) -> RebuildTicket {
        self.issued += 1;
        RebuildTicket(self.issued)
    }

    /// Publish tables built for `ticket`.
    ///
    /// Returns `false` (and keeps the current tables) if a newer rebuild has
    /// already been installed.
    pub fn install(&mut self, ticket: RebuildTicket, tables: MappingTables) -> bool {
        if ticket.0 <= self.installed {
            debug!(
                ticket = ticket.0,
                installed = self.installed,
                "discarding superseded row mapping"
            );
            return false;
        }
        self.installed = ticket.0;
        self.tables = tables;
        true
    }

    /// Build and publish new tables synchronously.
    ///
    /// # Errors
    /// On invalid input the previously published tables stay in effect.
    pub fn rebuild<S: FilteredSource + ?Sized>(
        &mut self,
        filtered_count: i64,
        source: &S,
        annotations: &[Annotation],
    ) -> Result<&MappingTables> {
        let ticket = self.begin_rebuild();
        let tables = match MappingTables::build(filtered_count, source, annotations) {
            Ok(tables) => tables,
            Err(err) => {
                warn!(filtered_count, error = %err, "row mapping rebuild rejected");
                return Err(err);
            }
        };
        self.install(ticket, tables);
        Ok(&self.tables)
    }

    /// Currently published tables.
    pub fn tables(&self) -> &MappingTables {
        &self.tables
    }

    pub fn row_count(&self) -> ViewRow {
        self.tables.row_count()
    }

    pub fn filtered_count(&self) -> FilteredIndex {
        self.tables.filtered_count()
    }

    pub fn view_slot(&self, view_row: ViewRow) -> Option<ViewSlot> {
        self.tables.view_slot(view_row)
    }

    pub fn view_to_filtered(&self, view_row: ViewRow) -> Option<FilteredIndex> {
        self.tables.view_to_filtered(view_row)
    }

    pub fn view_to_annotation(&self, view_row: ViewRow) -> Option<&PlacedAnnotation> {
        self.tables.view_to_annotation(view_row)
    }

    pub fn filtered_to_view(&self, filtered: FilteredIndex) -> Option<ViewRow> {
        self.tables.filtered_to_view(filtered)
    }

    pub fn is_annotation_row(&self, view_row: ViewRow) -> bool {
        self.view_slot(view_row).is_some_and(ViewSlot::is_annotation)
    }

    /// Filtered index carrying exactly `raw`, searched within the published
    /// filtered count.
    pub fn raw_to_filtered<S: FilteredSource + ?Sized>(
        &self,
        raw: RawIndex,
        source: &S,
    ) -> Option<FilteredIndex> {
        search_raw(source, self.tables.filtered_count(), raw)
    }

    /// Raw index of the record shown on a view row (`None` for annotation rows).
    pub fn view_to_raw<S: FilteredSource + ?Sized>(
        &self,
        view_row: ViewRow,
        source: &S,
    ) -> Option<RawIndex> {
        source.raw_of(self.view_to_filtered(view_row)?)
    }
}
