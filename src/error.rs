//! Error types for hilite

use thiserror::Error;

/// Result type alias for hilite operations
pub type Result<T> = std::result::Result<T, HiliteError>;

/// Annotator error types
#[derive(Error, Debug)]
pub enum HiliteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("edit out of range: offset {offset}, len {len}, buffer length {buffer_len}")]
    OutOfRange {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    #[error("invalid rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },

    #[error("highlighting pass aborted: {0}")]
    PassAborted(String),
}
