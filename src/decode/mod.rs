//! Record decoding seam and its memo.
//!
//! Decoding is pluggable and may be arbitrarily expensive. The core only
//! memoizes outcomes keyed by filtered index; a failed decode is an outcome
//! like any other and is cached so permanently bad records are not retried on
//! every repaint.

mod cache;

pub use cache::{CacheStats, DecodeCache};

use crate::error::DecodeError;
use crate::types::{DecodedRecord, RawIndex};

/// Turns a raw record into its structured, displayable form.
pub trait RecordDecoder {
    type Record: DecodedRecord;

    fn decode(&self, raw: RawIndex) -> Result<Self::Record, DecodeError>;
}

impl<D: RecordDecoder + ?Sized> RecordDecoder for &D {
    type Record = D::Record;

    fn decode(&self, raw: RawIndex) -> Result<Self::Record, DecodeError> {
        (**self).decode(raw)
    }
}

/// Memoized result of decoding one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome<R> {
    Decoded(R),
    /// Decode was attempted and failed; the row renders as corrupted.
    Failed,
}

impl<R> DecodeOutcome<R> {
    pub fn record(&self) -> Option<&R> {
        match self {
            Self::Decoded(r) => Some(r),
            Self::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl<R, E> From<Result<R, E>> for DecodeOutcome<R> {
    fn from(result: Result<R, E>) -> Self {
        match result {
            Ok(r) => Self::Decoded(r),
            Err(_) => Self::Failed,
        }
    }
}
