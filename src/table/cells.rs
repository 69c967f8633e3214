//! Cell text for rows the core itself is responsible for.
//!
//! Record columns are formatted by the decoder; the core only fills in the
//! row index, payload clean-up and the fixed text of annotation, corrupted
//! and logging-only rows.

use chrono::DateTime;

use crate::decode::DecodeOutcome;
use crate::types::{
    Annotation, Column, DecodedRecord, RawIndex, COMMENT_APP_ID, COMMENT_CONTEXT_ID,
};

/// Payload of a record that failed to decode.
pub const CORRUPTED_TEXT: &str = "!!CORRUPTED MESSAGE!!";

/// Payload of the single row shown in logging-only mode.
pub const LOGGING_ONLY_TEXT: &str = "Logging only Mode! Disable in Project Settings!";

/// Shown for argument columns past the record's last argument.
pub const MISSING_ARG_TEXT: &str = " - ";

/// Text of an annotation row.
pub fn annotation_text(annotation: &Annotation, column: Column) -> Option<String> {
    let text = match column {
        Column::Index | Column::Counter => String::new(),
        Column::Time => format_time(annotation.time_seconds, annotation.microseconds),
        Column::TimeStamp => format_timestamp(annotation.timestamp),
        Column::EcuId => annotation.ecu.clone(),
        Column::AppId => COMMENT_APP_ID.to_string(),
        Column::ContextId => COMMENT_CONTEXT_ID.to_string(),
        Column::SessionId => annotation.session_id.to_string(),
        Column::Type => "log".to_string(),
        Column::Subtype => "info".to_string(),
        Column::Mode => "verbose".to_string(),
        Column::ArgCount => "1".to_string(),
        Column::Payload => annotation.text.clone(),
        Column::MessageId | Column::Arg(_) => return None,
    };
    Some(text)
}

/// Text of a record row.
///
/// A corrupted record only shows its position and the corrupted marker.
pub fn record_text<R: DecodedRecord>(
    outcome: &DecodeOutcome<R>,
    column: Column,
    raw: RawIndex,
    payload_char_limit: usize,
) -> Option<String> {
    let record = match outcome {
        DecodeOutcome::Decoded(record) => record,
        DecodeOutcome::Failed => {
            return match column {
                Column::Index => Some(raw.to_string()),
                Column::Payload => Some(CORRUPTED_TEXT.to_string()),
                _ => None,
            };
        }
    };

    match column {
        Column::Index => Some(raw.to_string()),
        Column::Payload => record
            .field(Column::Payload)
            .map(|p| clean_payload(&p, payload_char_limit)),
        Column::Arg(_) => Some(
            record
                .field(column)
                .unwrap_or_else(|| MISSING_ARG_TEXT.to_string()),
        ),
        _ => record.field(column),
    }
}

/// Tooltip of a record row: the full cleaned payload.
pub fn record_tooltip<R: DecodedRecord>(outcome: &DecodeOutcome<R>) -> Option<String> {
    match outcome {
        DecodeOutcome::Decoded(record) => record
            .field(Column::Payload)
            .map(|p| clean_payload(&p, usize::MAX)),
        DecodeOutcome::Failed => Some(CORRUPTED_TEXT.to_string()),
    }
}

/// Strip NULs, collapse whitespace runs and cut to `limit` characters.
pub fn clean_payload(payload: &str, limit: usize) -> String {
    let without_nul = payload.replace('\0', "");
    without_nul
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(limit)
        .collect()
}

/// "yyyy/MM/dd hh:mm:ss.uuuuuu" in UTC.
pub(crate) fn format_time(seconds: u32, microseconds: u32) -> String {
    let date = DateTime::from_timestamp(i64::from(seconds), 0)
        .map(|dt| dt.format("%Y/%m/%d %H:%M:%S").to_string())
        .unwrap_or_default();
    format!("{date}.{microseconds:06}")
}

/// Timestamp ticks (0.1 ms) as "seconds.ticks".
pub(crate) fn format_timestamp(ticks: u32) -> String {
    format!("{}.{:04}", ticks / 10000, ticks % 10000)
}
