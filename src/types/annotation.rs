use serde::{Deserialize, Serialize};

/// Identifies the raw record an annotation attaches to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    /// Source the record was read from (absolute path as opened)
    pub source_id: String,
    /// Byte offset of the record's storage header within that source
    pub byte_offset: u64,
}

impl Anchor {
    pub fn new(source_id: impl Into<String>, byte_offset: u64) -> Self {
        Self {
            source_id: source_id.into(),
            byte_offset,
        }
    }
}

/// Which side of its anchor record an annotation row is placed on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum AnchorSide {
    #[default]
    Before,
    After,
}

/// A user note rendered as a synthetic row next to its anchor record.
///
/// Owned by the document layer; the row core only ever sees immutable
/// snapshots of the annotation list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub anchor: Anchor,
    /// Placement relative to the anchor record
    #[serde(default)]
    pub side: AnchorSide,
    /// Free text of the note
    pub text: String,
    /// Creation time (UTC milliseconds); only used to order annotations
    /// sharing an anchor and side
    #[serde(default)]
    pub created_utc_ms: i64,

    // Display fields copied from the anchor record by the document layer.
    #[serde(default)]
    pub ecu: String,
    #[serde(default)]
    pub time_seconds: u32,
    #[serde(default)]
    pub microseconds: u32,
    /// Record timestamp in 0.1 ms ticks
    #[serde(default)]
    pub timestamp: u32,
    #[serde(default)]
    pub session_id: u32,
}

impl Annotation {
    /// Create an annotation with empty display fields.
    pub fn new(anchor: Anchor, side: AnchorSide, text: impl Into<String>, created_utc_ms: i64) -> Self {
        Self {
            anchor,
            side,
            text: text.into(),
            created_utc_ms,
            ecu: String::new(),
            time_seconds: 0,
            microseconds: 0,
            timestamp: 0,
            session_id: 0,
        }
    }

    pub fn is_after(&self) -> bool {
        self.side == AnchorSide::After
    }
}
