//! In-memory log.
//!
//! A reference implementation of the log layer's side of the contract: it
//! stores records, evaluates a caller-supplied filter predicate, resolves
//! anchors by (source, byte offset) and "decodes" by cloning. Used by the CLI,
//! the benchmarks and the tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::decode::RecordDecoder;
use crate::error::{DecodeError, Result};
use crate::index::FilteredSource;
use crate::table::cells::{format_time, format_timestamp};
use crate::types::{Anchor, Annotation, Column, DecodedRecord, FilteredIndex, RawIndex, Severity};

/// One stored log record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LogRecord {
    /// Source the record was read from
    pub source_id: String,
    /// Byte offset of the record within its source
    pub byte_offset: u64,
    pub ecu: String,
    pub app_id: String,
    pub context_id: String,
    /// Log level; `None` for trace and control records
    pub severity: Option<Severity>,
    /// Service id of a control response
    pub control_service_id: Option<u32>,
    pub time_seconds: u32,
    pub microseconds: u32,
    /// Timestamp in 0.1 ms ticks
    pub timestamp: u32,
    pub counter: u8,
    pub session_id: u32,
    pub message_id: u32,
    pub payload: String,
    pub args: Vec<String>,
    /// Stored bytes are damaged; decoding fails
    pub corrupt: bool,
}

impl DecodedRecord for LogRecord {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn context_id(&self) -> &str {
        &self.context_id
    }

    fn severity(&self) -> Option<Severity> {
        self.severity
    }

    fn control_service_id(&self) -> Option<u32> {
        self.control_service_id
    }

    fn field(&self, column: Column) -> Option<String> {
        let text = match column {
            Column::Index => return None,
            Column::Time => format_time(self.time_seconds, self.microseconds),
            Column::TimeStamp => format_timestamp(self.timestamp),
            Column::Counter => self.counter.to_string(),
            Column::EcuId => self.ecu.clone(),
            Column::AppId => self.app_id.clone(),
            Column::ContextId => self.context_id.clone(),
            Column::SessionId => self.session_id.to_string(),
            Column::Type => match (self.severity, self.control_service_id) {
                (Some(_), _) => "log".to_string(),
                (None, Some(_)) => "control".to_string(),
                (None, None) => "trace".to_string(),
            },
            Column::Subtype => match (self.severity, self.control_service_id) {
                (Some(severity), _) => severity.as_str().to_string(),
                (None, Some(_)) => "response".to_string(),
                (None, None) => String::new(),
            },
            Column::Mode => "verbose".to_string(),
            Column::ArgCount => self.args.len().to_string(),
            Column::Payload => self.payload.clone(),
            Column::MessageId => self.message_id.to_string(),
            Column::Arg(n) => return self.args.get(usize::from(n)).cloned(),
        };
        Some(text)
    }
}

/// Serialized form of a log plus its annotations.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogDocument {
    pub records: Vec<LogRecord>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl LogDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Records held in memory with an active filter result.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Vec<LogRecord>,
    anchors: HashMap<Anchor, RawIndex>,
    filtered: Vec<RawIndex>,
}

impl MemoryLog {
    /// Load records; the filter initially passes everything.
    pub fn new(records: Vec<LogRecord>) -> Self {
        let mut log = Self::default();
        for record in records {
            log.push(record);
        }
        log.clear_filter();
        log
    }

    /// Append a record. The current filter result is not extended until the
    /// filter is re-applied.
    pub fn push(&mut self, record: LogRecord) -> RawIndex {
        let raw = self.records.len() as RawIndex;
        self.anchors
            .entry(Anchor::new(record.source_id.clone(), record.byte_offset))
            .or_insert(raw);
        self.records.push(record);
        raw
    }

    /// Keep the records matching `predicate`, in raw order.
    pub fn apply_filter(&mut self, predicate: impl Fn(&LogRecord) -> bool) {
        self.filtered = (0..)
            .zip(&self.records)
            .filter(|(_, record)| predicate(record))
            .map(|(raw, _)| raw)
            .collect();
    }

    /// Pass every record.
    pub fn clear_filter(&mut self) {
        self.filtered = (0..self.records.len() as RawIndex).collect();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, raw: RawIndex) -> Option<&LogRecord> {
        self.records.get(usize::try_from(raw).ok()?)
    }

    /// Raw indices passing the filter.
    pub fn filtered(&self) -> &[RawIndex] {
        &self.filtered
    }
}

impl FilteredSource for MemoryLog {
    fn filtered_count(&self) -> u64 {
        self.filtered.len() as u64
    }

    fn raw_of(&self, filtered: FilteredIndex) -> Option<RawIndex> {
        self.filtered.get(filtered as usize).copied()
    }

    fn resolve_anchor(&self, anchor: &Anchor) -> Option<RawIndex> {
        self.anchors.get(anchor).copied()
    }
}

impl RecordDecoder for MemoryLog {
    type Record = LogRecord;

    fn decode(&self, raw: RawIndex) -> std::result::Result<LogRecord, DecodeError> {
        let record = self.record(raw).ok_or(DecodeError::OutOfRange(raw))?;
        if record.corrupt {
            return Err(DecodeError::Corrupted {
                raw,
                reason: "damaged storage header".to_string(),
            });
        }
        Ok(record.clone())
    }
}
