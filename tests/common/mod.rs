//! Common test sources, decoders and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use std::cell::Cell;

use logview::{
    Anchor, AnchorSide, Annotation, Column, DecodeError, DecodedRecord, FilteredIndex,
    FilteredSource, MappingTables, RawIndex, RecordDecoder, Severity, ViewSlot,
};

/// Source id understood by [`Raws`]: the anchor's byte offset is the raw index.
pub const RAW_SOURCE: &str = "raw";

/// Filter result given directly as raw indices.
#[derive(Debug, Clone, Default)]
pub struct Raws(pub Vec<RawIndex>);

impl FilteredSource for Raws {
    fn filtered_count(&self) -> u64 {
        self.0.len() as u64
    }

    fn raw_of(&self, filtered: FilteredIndex) -> Option<RawIndex> {
        self.0.get(filtered as usize).copied()
    }

    fn resolve_anchor(&self, anchor: &Anchor) -> Option<RawIndex> {
        (anchor.source_id == RAW_SOURCE).then_some(anchor.byte_offset)
    }
}

/// Annotation anchored at raw index `raw` of a [`Raws`] source.
pub fn raw_note(raw: RawIndex, side: AnchorSide, created_utc_ms: i64) -> Annotation {
    Annotation::new(
        Anchor::new(RAW_SOURCE, raw),
        side,
        format!("raw {raw} @{created_utc_ms}"),
        created_utc_ms,
    )
}

/// Minimal decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rec {
    pub raw: RawIndex,
    pub severity: Option<Severity>,
}

impl DecodedRecord for Rec {
    fn app_id(&self) -> &str {
        "APP"
    }

    fn context_id(&self) -> &str {
        "CTX"
    }

    fn severity(&self) -> Option<Severity> {
        self.severity
    }

    fn control_service_id(&self) -> Option<u32> {
        None
    }

    fn field(&self, column: Column) -> Option<String> {
        match column {
            Column::Payload => Some(format!("payload {}", self.raw)),
            _ => None,
        }
    }
}

/// Decoder that counts its calls and fails on chosen raw indices.
#[derive(Debug, Default)]
pub struct CountingDecoder {
    pub calls: Cell<u32>,
    pub failing: Vec<RawIndex>,
}

impl CountingDecoder {
    pub fn failing(failing: Vec<RawIndex>) -> Self {
        Self {
            calls: Cell::new(0),
            failing,
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl RecordDecoder for CountingDecoder {
    type Record = Rec;

    fn decode(&self, raw: RawIndex) -> Result<Rec, DecodeError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.contains(&raw) {
            return Err(DecodeError::Corrupted {
                raw,
                reason: "bad header".to_string(),
            });
        }
        Ok(Rec {
            raw,
            severity: Some(Severity::Info),
        })
    }
}

/// Check the structural invariants of a table set built from `source`.
pub fn assert_consistent(tables: &MappingTables, source: &Raws) {
    let filtered_count = tables.filtered_count();
    assert_eq!(u64::from(filtered_count), source.filtered_count());
    assert_eq!(
        tables.row_count() as usize,
        filtered_count as usize + tables.placed().len(),
        "row count must be filtered rows plus placed annotations"
    );

    for f in 0..filtered_count {
        let view = tables
            .filtered_to_view(f)
            .unwrap_or_else(|| panic!("filtered {f} has no view row"));
        assert_eq!(tables.view_to_filtered(view), Some(f));
    }

    let mut last_filtered = None;
    let mut annotations_seen = 0;
    for view in 0..tables.row_count() {
        match tables.view_slot(view).expect("row in range") {
            ViewSlot::Filtered(f) => {
                if let Some(last) = last_filtered {
                    assert!(f > last, "filtered order broken at view {view}");
                }
                last_filtered = Some(f);
            }
            ViewSlot::Annotation(i) => {
                assert_eq!(i as usize, annotations_seen, "annotation order broken");
                annotations_seen += 1;
                assert!(tables.view_to_annotation(view).is_some());
            }
        }
    }
    assert_eq!(tables.view_slot(tables.row_count()), None);
}
