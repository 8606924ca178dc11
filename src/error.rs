//! Error types for record resolution.

use std::fmt;
use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::id::RecordId;

pub type Result<T> = std::result::Result<T, RecordError>;

/// A special element this reader does not know how to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unsupported {
    /// Special code other than SPECIAL_COMP / SPECIAL_CHUNKED.
    ExtensionKind(u16),
    /// Compressed element whose codec is not deflate.
    Codec(u16),
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsupported::ExtensionKind(k) => write!(f, "unsupported extension type {}", k),
            Unsupported::Codec(c) => write!(f, "unsupported compression {}", c),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    /// Seek/read failure or truncated stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("record {0} not found in directory")]
    UnknownRecord(RecordId),

    #[error("record {id}: {what}")]
    Unsupported { id: RecordId, what: Unsupported },

    #[error("record {0} has not been loaded")]
    NotLoaded(RecordId),

    /// Fields were required but the record materialized as chunk metadata.
    #[error("record {0} is chunked and has no field data")]
    NotFieldData(RecordId),

    #[error("record {id}: reference nesting exceeds depth {depth}")]
    ResolveDepthExceeded { id: RecordId, depth: usize },

    #[error("record {id}: inflate failed: {source}")]
    Decompress {
        id: RecordId,
        #[source]
        source: io::Error,
    },

    #[error("record {id}: length {len} exceeds limit {limit}")]
    LimitExceeded { id: RecordId, len: u64, limit: u64 },

    #[error("record {id}: malformed: {reason}")]
    Malformed { id: RecordId, reason: String },
}

impl RecordError {
    /// True for stream-level failures, where retrying after the stream
    /// recovers can succeed.
    pub fn is_io(&self) -> bool {
        matches!(self, RecordError::Io(_))
    }
}
