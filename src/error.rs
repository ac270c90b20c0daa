use std::fmt::Debug;
use std::io;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum KdTreeError {
    /// A point, query or decoded token does not have the tree's dimension.
    #[error("Dimension mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The operation needs at least one stored point.
    #[error("The tree is empty")]
    EmptyTree,

    /// The token stream ended before the encoded tree was complete.
    #[error("Token stream truncated after {consumed} tokens")]
    TruncatedStream { consumed: usize },

    /// The line source is missing, unreadable or empty.
    #[error("Line source {name} is unavailable")]
    SourceUnavailable {
        name: String,
        #[source]
        source: Option<io::Error>,
    },

    /// The line sink could not be created or written.
    #[error("Line sink {name} is unavailable")]
    SinkUnavailable {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A token could not be decoded into a point.
    #[error("Malformed point token {token:?}: {reason}")]
    PointCodec { token: String, reason: String },
}

impl KdTreeError {
    pub(crate) fn dimension_mismatch(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}

pub type Result<T> = std::result::Result<T, KdTreeError>;
