//! Test fixtures for building logs and annotations in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{LogBuilder, note};
//!
//! let log = LogBuilder::new()
//!     .info("APP1", "hello")
//!     .error("APP2", "boom")
//!     .build();
//! let notes = vec![note(1, AnchorSide::Before, 0)];
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]

use logview::memlog::{LogRecord, MemoryLog};
use logview::{Anchor, AnchorSide, Annotation, Severity, MARKER_SERVICE_ID};

/// Source id of every record built by [`LogBuilder`].
pub const SOURCE: &str = "trace.dlt";

/// Bytes between consecutive records built by [`LogBuilder`].
pub const RECORD_SIZE: u64 = 16;

/// Anchor of the record at `raw` in a [`LogBuilder`] log.
pub fn anchor(raw: u64) -> Anchor {
    Anchor::new(SOURCE, raw * RECORD_SIZE)
}

/// Annotation anchored at the record at `raw` in a [`LogBuilder`] log.
pub fn note(raw: u64, side: AnchorSide, created_utc_ms: i64) -> Annotation {
    Annotation::new(
        anchor(raw),
        side,
        format!("note@{raw}/{created_utc_ms}"),
        created_utc_ms,
    )
}

/// Builder for an in-memory log with evenly spaced records.
#[derive(Debug, Default)]
pub struct LogBuilder {
    records: Vec<LogRecord>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` info records of application "APP".
    pub fn with_records(count: usize) -> Self {
        let mut builder = Self::new();
        for i in 0..count {
            builder = builder.info("APP", &format!("record {i}"));
        }
        builder
    }

    pub fn record(mut self, mut record: LogRecord) -> Self {
        let raw = self.records.len() as u64;
        record.source_id = SOURCE.to_string();
        record.byte_offset = raw * RECORD_SIZE;
        self.records.push(record);
        self
    }

    pub fn log(self, app: &str, severity: Severity, payload: &str) -> Self {
        self.record(LogRecord {
            app_id: app.to_string(),
            context_id: "CTX".to_string(),
            severity: Some(severity),
            payload: payload.to_string(),
            ..LogRecord::default()
        })
    }

    pub fn info(self, app: &str, payload: &str) -> Self {
        self.log(app, Severity::Info, payload)
    }

    pub fn warn(self, app: &str, payload: &str) -> Self {
        self.log(app, Severity::Warn, payload)
    }

    pub fn error(self, app: &str, payload: &str) -> Self {
        self.log(app, Severity::Error, payload)
    }

    /// Comment written into the stream by the logging tool.
    pub fn embedded_comment(self, payload: &str) -> Self {
        self.record(LogRecord {
            app_id: "USER".to_string(),
            context_id: "CMNT".to_string(),
            severity: Some(Severity::Info),
            payload: payload.to_string(),
            ..LogRecord::default()
        })
    }

    /// Control response of the marker service.
    pub fn marker(self) -> Self {
        self.record(LogRecord {
            app_id: "DA1".to_string(),
            context_id: "DC1".to_string(),
            control_service_id: Some(MARKER_SERVICE_ID),
            ..LogRecord::default()
        })
    }

    /// Record whose stored bytes cannot be decoded.
    pub fn corrupt(self) -> Self {
        self.record(LogRecord {
            corrupt: true,
            ..LogRecord::default()
        })
    }

    pub fn build(self) -> MemoryLog {
        MemoryLog::new(self.records)
    }
}
