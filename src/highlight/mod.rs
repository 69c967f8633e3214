//! Row background resolution.
//!
//! [`color_for`] is a pure function of the decode outcome, the row's
//! coordinates, the caller's marker/search state and a settings snapshot.
//! Priority, first match wins:
//! 1. manual marker on the raw index
//! 2. decode failure
//! 3. persistent marker rule
//! 4. comment embedded in the log
//! 5. last completed search match (raw index)
//! 6. search hit cursor (filtered index)
//! 7. auto-marks: fatal/error, warn, marker control response
//! 8. theme background

mod colors;

pub use colors::{palette, Rgb};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::decode::DecodeOutcome;
use crate::types::{
    AutoMark, DecodedRecord, FilteredIndex, RawIndex, Severity, UiTheme, ViewerConfig,
    MARKER_SERVICE_ID,
};

/// Settings consulted while resolving colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSettings {
    pub theme: UiTheme,
    pub auto_mark: AutoMark,
}

impl From<&ViewerConfig> for HighlightSettings {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            theme: config.theme,
            auto_mark: config.auto_mark,
        }
    }
}

/// Marker and search state owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightState {
    /// Raw indices the user marked by hand
    pub manual_markers: HashSet<RawIndex>,
    pub manual_marker_color: Rgb,
    /// Raw index of the last completed text search match
    pub search_match: Option<RawIndex>,
    pub search_match_color: Rgb,
    /// Filtered index of the current search hit cursor
    pub search_hit: Option<FilteredIndex>,
    pub search_hit_color: Rgb,
}

impl Default for HighlightState {
    fn default() -> Self {
        Self {
            manual_markers: HashSet::new(),
            manual_marker_color: palette::WHITE,
            search_match: None,
            search_match_color: palette::SEARCH_RESULT,
            search_hit: None,
            search_hit_color: palette::WHITE,
        }
    }
}

/// Persistent marker rules, evaluated outside the core.
pub trait MarkerRules<R> {
    /// Color of the first matching rule, if any.
    fn marker_color(&self, record: &R) -> Option<Rgb>;
}

impl<R, F> MarkerRules<R> for F
where
    F: Fn(&R) -> Option<Rgb>,
{
    fn marker_color(&self, record: &R) -> Option<Rgb> {
        self(record)
    }
}

/// No marker rules configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarkerRules;

impl<R> MarkerRules<R> for NoMarkerRules {
    fn marker_color(&self, _record: &R) -> Option<Rgb> {
        None
    }
}

/// Background color of a record row.
pub fn color_for<R, M>(
    outcome: &DecodeOutcome<R>,
    filtered: FilteredIndex,
    raw: RawIndex,
    state: &HighlightState,
    rules: &M,
    settings: &HighlightSettings,
) -> Rgb
where
    R: DecodedRecord,
    M: MarkerRules<R> + ?Sized,
{
    if state.manual_markers.contains(&raw) {
        return state.manual_marker_color;
    }

    let DecodeOutcome::Decoded(record) = outcome else {
        return palette::CORRUPTED;
    };

    if let Some(color) = rules.marker_color(record) {
        return color;
    }

    if record.is_embedded_comment() {
        return palette::COMMENT;
    }

    if state.search_match == Some(raw) {
        return state.search_match_color;
    }

    if state.search_hit == Some(filtered) {
        return state.search_hit_color;
    }

    if let Some(color) = auto_mark_color(record, settings.auto_mark) {
        return color;
    }

    theme_background(settings.theme)
}

/// Background of annotation rows.
pub fn annotation_color() -> Rgb {
    palette::COMMENT
}

/// Default row background for a theme.
pub fn theme_background(theme: UiTheme) -> Rgb {
    match theme {
        UiTheme::Light => palette::LIGHT_BACKGROUND,
        UiTheme::Dark => palette::DARK_BACKGROUND,
    }
}

fn auto_mark_color<R: DecodedRecord>(record: &R, auto_mark: AutoMark) -> Option<Rgb> {
    let severity = record.severity();
    if auto_mark.fatal_error && matches!(severity, Some(Severity::Fatal | Severity::Error)) {
        return Some(palette::AUTO_ERROR);
    }
    if auto_mark.warn && severity == Some(Severity::Warn) {
        return Some(palette::AUTO_WARN);
    }
    if auto_mark.marker && record.control_service_id() == Some(MARKER_SERVICE_ID) {
        return Some(palette::AUTO_MARKER);
    }
    None
}
