//! logview - row core for filtered, annotated log tables
//!
//! Translates between the three coordinate spaces of a log table viewer and
//! memoizes record decoding:
//! - raw index (position in the complete log) ↔ filtered index (position in
//!   the current filter result) by binary search over a monotonic filter result
//! - filtered index ↔ view row, with user annotations interleaved before or
//!   after their anchor record
//! - a bounded LRU decode cache that memoizes failures as well as successes
//! - a pure row color resolver (markers, search, auto-marks, theme)
//!
//! Loading the log, evaluating filters, decoding records and drawing are
//! left to the caller, which lends them to the core per call.
//!
//! # Usage
//!
//! ```
//! use logview::memlog::{LogRecord, MemoryLog};
//! use logview::{Anchor, AnchorSide, Annotation, LogTableModel, ViewerConfig};
//!
//! let log = MemoryLog::new(vec![
//!     LogRecord { source_id: "trace.dlt".into(), byte_offset: 0, ..Default::default() },
//!     LogRecord { source_id: "trace.dlt".into(), byte_offset: 64, ..Default::default() },
//! ]);
//! let notes = vec![Annotation::new(Anchor::new("trace.dlt", 64), AnchorSide::Before, "here", 0)];
//!
//! let mut model: LogTableModel<LogRecord> = LogTableModel::new(&ViewerConfig::default()).unwrap();
//! model.filter_changed(&log, &notes).unwrap();
//! assert_eq!(model.row_count(), 3);
//! assert!(model.is_annotation_row(1));
//! assert_eq!(model.view_to_filtered(2), Some(1));
//! ```

pub mod decode;
pub mod error;
pub mod highlight;
pub mod index;
pub mod memlog;
pub mod table;
pub mod types;

// WebAssembly surface
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::LogView;

pub use decode::{CacheStats, DecodeCache, DecodeOutcome, RecordDecoder};
pub use error::{DecodeError, LogviewError, Result};
pub use highlight::{color_for, HighlightSettings, HighlightState, MarkerRules, NoMarkerRules, Rgb};
pub use index::{search_raw, FilteredSource, MappingTables, PlacedAnnotation, RebuildTicket, RowIndex};
pub use table::LogTableModel;
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
