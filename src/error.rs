//! Structured error types for logview.
//!
//! Coordinate queries never fail (they return `None`), so the error surface is
//! limited to rejected rebuild input, misconfiguration and collaborator I/O.

/// All errors that can occur while configuring or rebuilding the row core.
#[derive(Debug, thiserror::Error)]
pub enum LogviewError {
    /// Rebuild was asked for a negative or unrepresentable number of filtered rows.
    #[error("Invalid filtered row count: {0}")]
    InvalidFilteredCount(i64),

    /// Filtered rows plus annotation rows do not fit the view row space.
    #[error("View row count {0} exceeds the addressable range")]
    TooManyRows(u64),

    /// Decode cache capacity of zero.
    #[error("Invalid decode cache capacity: {0}")]
    InvalidCacheCapacity(usize),

    /// Color setting is not a "#RRGGBB" value.
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Configuration document could not be parsed.
    #[error("Configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogviewError>;

impl From<String> for LogviewError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for LogviewError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<LogviewError> for wasm_bindgen::JsValue {
    fn from(e: LogviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

/// Failure reported by a record decoder.
///
/// Never propagated out of the decode cache: a failed decode is memoized as
/// [`crate::decode::DecodeOutcome::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The raw index is not (or no longer) known to the log.
    #[error("Raw index {0} is out of range")]
    OutOfRange(u64),

    /// The record bytes are present but malformed.
    #[error("Corrupted record at raw index {raw}: {reason}")]
    Corrupted { raw: u64, reason: String },
}
