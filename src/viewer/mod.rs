//! `LogView` - the WASM-exported table model for browser front ends.
//!
//! The page owns the log: it hands over the filter result as an array of raw
//! indices and lends three callbacks:
//! - `resolveAnchor(sourceId, byteOffset) -> number | null`
//! - `decode(rawIndex) -> record object` (throwing marks the record corrupted)
//! - `markerColor(record) -> "#RRGGBB" | null` (optional persistent markers)
//!
//! Rows, colors and cell text are then queried per view row.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::decode::RecordDecoder;
use crate::error::DecodeError;
use crate::highlight::{HighlightSettings, MarkerRules, Rgb};
use crate::index::FilteredSource;
use crate::memlog::LogRecord;
use crate::table::LogTableModel;
use crate::types::{
    Anchor, Annotation, Column, FilteredIndex, RawIndex, UiTheme, ViewRow, ViewerConfig,
};

/// Filter result and callbacks supplied by the page.
#[derive(Default)]
struct JsLog {
    filtered: Vec<RawIndex>,
    resolve_anchor: Option<Function>,
    decode: Option<Function>,
}

impl FilteredSource for JsLog {
    fn filtered_count(&self) -> u64 {
        self.filtered.len() as u64
    }

    fn raw_of(&self, filtered: FilteredIndex) -> Option<RawIndex> {
        self.filtered.get(filtered as usize).copied()
    }

    fn resolve_anchor(&self, anchor: &Anchor) -> Option<RawIndex> {
        let f = self.resolve_anchor.as_ref()?;
        let result = f
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(&anchor.source_id),
                &JsValue::from_f64(anchor.byte_offset as f64),
            )
            .ok()?;
        serde_wasm_bindgen::from_value::<Option<RawIndex>>(result)
            .ok()
            .flatten()
    }
}

impl RecordDecoder for JsLog {
    type Record = LogRecord;

    fn decode(&self, raw: RawIndex) -> Result<LogRecord, DecodeError> {
        let f = self.decode.as_ref().ok_or(DecodeError::OutOfRange(raw))?;
        let value = f
            .call1(&JsValue::NULL, &JsValue::from_f64(raw as f64))
            .map_err(|e| DecodeError::Corrupted {
                raw,
                reason: e.as_string().unwrap_or_else(|| "decode callback threw".to_string()),
            })?;
        if value.is_null() || value.is_undefined() {
            return Err(DecodeError::OutOfRange(raw));
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| DecodeError::Corrupted {
            raw,
            reason: e.to_string(),
        })
    }
}

/// Persistent marker rules evaluated by the page.
#[derive(Default)]
struct JsMarkerRules(Option<Function>);

impl MarkerRules<LogRecord> for JsMarkerRules {
    fn marker_color(&self, record: &LogRecord) -> Option<Rgb> {
        let f = self.0.as_ref()?;
        let arg = serde_wasm_bindgen::to_value(record).ok()?;
        let result = f.call1(&JsValue::NULL, &arg).ok()?;
        Rgb::from_hex(&result.as_string()?)
    }
}

fn view_row(row: i32) -> Option<ViewRow> {
    ViewRow::try_from(row).ok()
}

fn parse_color(color: &str) -> Result<Rgb, JsValue> {
    Rgb::from_hex(color).ok_or_else(|| JsValue::from_str(&format!("Invalid color: {color}")))
}

/// Browser-facing log table model.
#[wasm_bindgen]
pub struct LogView {
    model: LogTableModel<LogRecord>,
    log: JsLog,
    rules: JsMarkerRules,
    annotations: Vec<Annotation>,
}

#[wasm_bindgen]
impl LogView {
    /// Create a view. `config` is a settings object or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<LogView, JsValue> {
        console_error_panic_hook::set_once();

        let config: ViewerConfig = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            model: LogTableModel::new(&config)?,
            log: JsLog::default(),
            rules: JsMarkerRules::default(),
            annotations: Vec::new(),
        })
    }

    #[wasm_bindgen(js_name = "setAnchorResolver")]
    pub fn set_anchor_resolver(&mut self, f: Function) {
        self.log.resolve_anchor = Some(f);
    }

    #[wasm_bindgen(js_name = "setDecoder")]
    pub fn set_decoder(&mut self, f: Function) {
        self.log.decode = Some(f);
    }

    #[wasm_bindgen(js_name = "setMarkerRules")]
    pub fn set_marker_rules(&mut self, f: Option<Function>) {
        self.rules = JsMarkerRules(f);
    }

    /// Install a new filter result (raw indices in ascending order) and
    /// rebuild. Returns the new row count.
    #[wasm_bindgen(js_name = "setFilter")]
    pub fn set_filter(&mut self, raw_indices: Vec<u32>) -> Result<u32, JsValue> {
        self.log.filtered = raw_indices.into_iter().map(RawIndex::from).collect();
        Ok(self.model.filter_changed(&self.log, &self.annotations)?)
    }

    /// Replace the annotation snapshot and rebuild. Returns the new row count.
    #[wasm_bindgen(js_name = "setAnnotations")]
    pub fn set_annotations(&mut self, annotations: JsValue) -> Result<u32, JsValue> {
        self.annotations = serde_wasm_bindgen::from_value(annotations)?;
        Ok(self.model.annotations_changed(&self.log, &self.annotations)?)
    }

    #[wasm_bindgen(js_name = "rowCount")]
    pub fn row_count(&self) -> u32 {
        self.model.row_count()
    }

    #[wasm_bindgen(js_name = "viewToFiltered")]
    pub fn view_to_filtered(&self, row: i32) -> Option<u32> {
        self.model.view_to_filtered(view_row(row)?)
    }

    #[wasm_bindgen(js_name = "filteredToView")]
    pub fn filtered_to_view(&self, filtered: i32) -> Option<u32> {
        self.model.filtered_to_view(FilteredIndex::try_from(filtered).ok()?)
    }

    #[wasm_bindgen(js_name = "rawToFiltered")]
    pub fn raw_to_filtered(&self, raw: u32) -> Option<u32> {
        self.model.raw_to_filtered(RawIndex::from(raw), &self.log)
    }

    #[wasm_bindgen(js_name = "viewToRaw")]
    pub fn view_to_raw(&self, row: i32) -> Option<u32> {
        self.model
            .view_to_raw(view_row(row)?, &self.log)
            .and_then(|raw| u32::try_from(raw).ok())
    }

    /// Annotation shown on a row, or `null`.
    #[wasm_bindgen(js_name = "viewToAnnotation")]
    pub fn view_to_annotation(&self, row: i32) -> Result<JsValue, JsValue> {
        match view_row(row).and_then(|r| self.model.view_to_annotation(r)) {
            Some(placed) => Ok(serde_wasm_bindgen::to_value(&placed.annotation)?),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = "isAnnotationRow")]
    pub fn is_annotation_row(&self, row: i32) -> bool {
        view_row(row).is_some_and(|r| self.model.is_annotation_row(r))
    }

    /// Background color ("#RRGGBB") of a row.
    #[wasm_bindgen(js_name = "cellColor")]
    pub fn cell_color(&mut self, row: i32) -> Option<String> {
        self.model
            .cell_color(view_row(row)?, &self.log, &self.log, &self.rules)
            .map(Rgb::to_hex)
    }

    /// Foreground color ("#RRGGBB") of a row.
    #[wasm_bindgen(js_name = "textColor")]
    pub fn text_color(&mut self, row: i32) -> Option<String> {
        self.model
            .text_color(view_row(row)?, &self.log, &self.log, &self.rules)
            .map(Rgb::to_hex)
    }

    /// Text of a cell. `column` is a column name ("payload", "appId", ...)
    /// or `{ "arg": n }`.
    #[wasm_bindgen(js_name = "cellText")]
    pub fn cell_text(&mut self, row: i32, column: JsValue) -> Result<Option<String>, JsValue> {
        let column: Column = serde_wasm_bindgen::from_value(column)?;
        let Some(row) = view_row(row) else {
            return Ok(None);
        };
        Ok(self.model.cell_text(row, column, &self.log, &self.log))
    }

    /// Full payload (or annotation text) of a row.
    pub fn tooltip(&mut self, row: i32) -> Option<String> {
        self.model.tooltip(view_row(row)?, &self.log, &self.log)
    }

    #[wasm_bindgen(js_name = "setManualMarkers")]
    pub fn set_manual_markers(&mut self, raw_indices: Vec<u32>, color: &str) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.model
            .set_manual_markers(raw_indices.into_iter().map(RawIndex::from), color);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setSearchMatch")]
    pub fn set_search_match(&mut self, raw: Option<u32>, color: &str) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.model.set_search_match(raw.map(RawIndex::from), color);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setSearchHit")]
    pub fn set_search_hit(&mut self, filtered: Option<u32>, color: &str) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.model.set_search_hit(filtered, color);
        Ok(())
    }

    /// Switch between light and dark row backgrounds.
    #[wasm_bindgen(js_name = "setDarkTheme")]
    pub fn set_dark_theme(&mut self, dark: bool) {
        let theme = if dark { UiTheme::Dark } else { UiTheme::Light };
        self.model.set_settings(HighlightSettings {
            theme,
            ..*self.model.settings()
        });
    }

    #[wasm_bindgen(js_name = "setForceEmpty")]
    pub fn set_force_empty(&mut self, force_empty: bool) {
        self.model.set_force_empty(force_empty);
    }

    #[wasm_bindgen(js_name = "setLoggingOnly")]
    pub fn set_logging_only(&mut self, logging_only: bool) {
        self.model.set_logging_only(logging_only);
    }
}
