//! Log table model - the presentation layer's single entry point.
//!
//! This module provides `LogTableModel`, which ties together:
//! - the published row mapping ([`RowIndex`])
//! - the decode memo ([`DecodeCache`])
//! - marker/search state and a settings snapshot for [`color_for`]
//!
//! The log, filter result, decoder and marker rules are borrowed per call; the
//! model never keeps a reference to them. Every rebuild invalidates the decode
//! cache because a filtered index may denote a different record afterwards.

pub mod cells;

use std::collections::HashSet;

use tracing::debug;

use crate::decode::{CacheStats, DecodeCache, RecordDecoder};
use crate::error::Result;
use crate::highlight::{
    annotation_color, color_for, HighlightSettings, HighlightState, MarkerRules, Rgb,
};
use crate::index::{FilteredSource, PlacedAnnotation, RowIndex};
use crate::types::{
    Annotation, Column, DecodedRecord, FilteredIndex, RawIndex, ViewRow, ViewSlot, ViewerConfig,
};

/// Row/cell/color queries over a filtered, annotated log.
pub struct LogTableModel<R> {
    index: RowIndex,
    cache: DecodeCache<R>,
    highlight: HighlightState,
    settings: HighlightSettings,
    payload_char_limit: usize,
    force_empty: bool,
    logging_only: bool,
}

impl<R: DecodedRecord> LogTableModel<R> {
    /// Create an empty model (zero rows until the first rebuild).
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            index: RowIndex::new(),
            cache: DecodeCache::new(config.decode_cache_capacity)?,
            highlight: HighlightState {
                search_match_color: config.search_result_rgb()?,
                ..HighlightState::default()
            },
            settings: HighlightSettings::from(config),
            payload_char_limit: config.payload_char_limit,
            force_empty: false,
            logging_only: false,
        })
    }

    // ------------------------------------------------------------------
    // Rebuild
    // ------------------------------------------------------------------

    /// Rebuild the row mapping and invalidate the decode cache.
    ///
    /// Returns the new row count.
    ///
    /// # Errors
    /// On invalid input (negative `filtered_count`) neither the mapping nor
    /// the cache is touched.
    pub fn rebuild<S: FilteredSource + ?Sized>(
        &mut self,
        filtered_count: i64,
        source: &S,
        annotations: &[Annotation],
    ) -> Result<ViewRow> {
        self.index.rebuild(filtered_count, source, annotations)?;
        self.cache.invalidate_all();
        Ok(self.row_count())
    }

    /// The filter result changed: rebuild from the source's current count
    /// and forget the last search match.
    pub fn filter_changed<S: FilteredSource + ?Sized>(
        &mut self,
        source: &S,
        annotations: &[Annotation],
    ) -> Result<ViewRow> {
        let count = i64::try_from(source.filtered_count()).unwrap_or(i64::MAX);
        let rows = self.rebuild(count, source, annotations)?;
        if self.highlight.search_match.take().is_some() {
            debug!("last search match cleared by filter change");
        }
        Ok(rows)
    }

    /// The annotation list changed; the filter result did not.
    pub fn annotations_changed<S: FilteredSource + ?Sized>(
        &mut self,
        source: &S,
        annotations: &[Annotation],
    ) -> Result<ViewRow> {
        let count = i64::try_from(source.filtered_count()).unwrap_or(i64::MAX);
        self.rebuild(count, source, annotations)
    }

    // ------------------------------------------------------------------
    // Coordinates
    // ------------------------------------------------------------------

    /// Number of rows to display.
    ///
    /// Zero while forced empty, one (the notice row) in logging-only mode.
    pub fn row_count(&self) -> ViewRow {
        if self.force_empty {
            0
        } else if self.logging_only {
            1
        } else {
            self.index.row_count()
        }
    }

    fn shows_records(&self) -> bool {
        !self.force_empty && !self.logging_only
    }

    pub fn view_slot(&self, view_row: ViewRow) -> Option<ViewSlot> {
        if !self.shows_records() {
            return None;
        }
        self.index.view_slot(view_row)
    }

    pub fn view_to_filtered(&self, view_row: ViewRow) -> Option<FilteredIndex> {
        self.view_slot(view_row)?.filtered()
    }

    pub fn view_to_annotation(&self, view_row: ViewRow) -> Option<&PlacedAnnotation> {
        if !self.shows_records() {
            return None;
        }
        self.index.view_to_annotation(view_row)
    }

    pub fn filtered_to_view(&self, filtered: FilteredIndex) -> Option<ViewRow> {
        if !self.shows_records() {
            return None;
        }
        self.index.filtered_to_view(filtered)
    }

    pub fn raw_to_filtered<S: FilteredSource + ?Sized>(
        &self,
        raw: RawIndex,
        source: &S,
    ) -> Option<FilteredIndex> {
        if !self.shows_records() {
            return None;
        }
        self.index.raw_to_filtered(raw, source)
    }

    pub fn view_to_raw<S: FilteredSource + ?Sized>(
        &self,
        view_row: ViewRow,
        source: &S,
    ) -> Option<RawIndex> {
        source.raw_of(self.view_to_filtered(view_row)?)
    }

    pub fn is_annotation_row(&self, view_row: ViewRow) -> bool {
        self.view_slot(view_row).is_some_and(ViewSlot::is_annotation)
    }

    // ------------------------------------------------------------------
    // Cells
    // ------------------------------------------------------------------

    /// Background color of a view row, decoding the record on first access.
    pub fn cell_color<S, D, M>(
        &mut self,
        view_row: ViewRow,
        source: &S,
        decoder: &D,
        rules: &M,
    ) -> Option<Rgb>
    where
        S: FilteredSource + ?Sized,
        D: RecordDecoder<Record = R> + ?Sized,
        M: MarkerRules<R> + ?Sized,
    {
        match self.view_slot(view_row)? {
            ViewSlot::Annotation(_) => Some(annotation_color()),
            ViewSlot::Filtered(filtered) => {
                let raw = source.raw_of(filtered)?;
                let state = &self.highlight;
                let settings = &self.settings;
                Some(self.cache.with_decoded(filtered, raw, decoder, |outcome| {
                    color_for(outcome, filtered, raw, state, rules, settings)
                }))
            }
        }
    }

    /// Foreground color that reads well on [`Self::cell_color`].
    pub fn text_color<S, D, M>(
        &mut self,
        view_row: ViewRow,
        source: &S,
        decoder: &D,
        rules: &M,
    ) -> Option<Rgb>
    where
        S: FilteredSource + ?Sized,
        D: RecordDecoder<Record = R> + ?Sized,
        M: MarkerRules<R> + ?Sized,
    {
        self.cell_color(view_row, source, decoder, rules)
            .map(Rgb::optimal_text_color)
    }

    /// Display text of one cell.
    pub fn cell_text<S, D>(
        &mut self,
        view_row: ViewRow,
        column: Column,
        source: &S,
        decoder: &D,
    ) -> Option<String>
    where
        S: FilteredSource + ?Sized,
        D: RecordDecoder<Record = R> + ?Sized,
    {
        if self.logging_only && !self.force_empty {
            return (view_row == 0 && column == Column::Payload)
                .then(|| cells::LOGGING_ONLY_TEXT.to_string());
        }
        match self.view_slot(view_row)? {
            ViewSlot::Annotation(_) => {
                let placed = self.index.view_to_annotation(view_row)?;
                cells::annotation_text(&placed.annotation, column)
            }
            ViewSlot::Filtered(filtered) => {
                let raw = source.raw_of(filtered)?;
                let limit = self.payload_char_limit;
                self.cache.with_decoded(filtered, raw, decoder, |outcome| {
                    cells::record_text(outcome, column, raw, limit)
                })
            }
        }
    }

    /// Tooltip of a view row: annotation text or full record payload.
    pub fn tooltip<S, D>(&mut self, view_row: ViewRow, source: &S, decoder: &D) -> Option<String>
    where
        S: FilteredSource + ?Sized,
        D: RecordDecoder<Record = R> + ?Sized,
    {
        match self.view_slot(view_row)? {
            ViewSlot::Annotation(_) => self
                .index
                .view_to_annotation(view_row)
                .map(|placed| placed.annotation.text.clone()),
            ViewSlot::Filtered(filtered) => {
                let raw = source.raw_of(filtered)?;
                self.cache
                    .with_decoded(filtered, raw, decoder, cells::record_tooltip)
            }
        }
    }

    // ------------------------------------------------------------------
    // Marker and search state
    // ------------------------------------------------------------------

    /// Replace the manually marked raw indices and their color.
    pub fn set_manual_markers(&mut self, rows: impl IntoIterator<Item = RawIndex>, color: Rgb) {
        self.highlight.manual_markers = rows.into_iter().collect::<HashSet<_>>();
        self.highlight.manual_marker_color = color;
    }

    /// Set (or clear) the last completed search match.
    pub fn set_search_match(&mut self, raw: Option<RawIndex>, color: Rgb) {
        self.highlight.search_match = raw;
        self.highlight.search_match_color = color;
    }

    /// Set (or clear) the search hit cursor.
    pub fn set_search_hit(&mut self, filtered: Option<FilteredIndex>, color: Rgb) {
        self.highlight.search_hit = filtered;
        self.highlight.search_hit_color = color;
    }

    pub fn highlight_state(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn set_settings(&mut self, settings: HighlightSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &HighlightSettings {
        &self.settings
    }

    /// Show no rows at all (e.g. while a file is being reloaded).
    pub fn set_force_empty(&mut self, force_empty: bool) {
        self.force_empty = force_empty;
    }

    /// Show a single notice row instead of the log.
    pub fn set_logging_only(&mut self, logging_only: bool) {
        self.logging_only = logging_only;
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn row_index(&self) -> &RowIndex {
        &self.index
    }

    pub fn decode_cache(&self) -> &DecodeCache<R> {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
