//! Sink error types.

use crate::length::ParseLengthError;
use crate::style::StyleKind;

/// Error raised by a [`DocumentSink`](crate::DocumentSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Named style is not defined by the template. Recoverable: callers are
    /// expected to fall back to no style.
    #[error("{kind} style \"{name}\" not found in template")]
    StyleNotFound {
        /// Requested style name.
        name: String,
        /// Requested style category.
        kind: StyleKind,
    },

    /// Handle does not refer to an element of this sink.
    #[error("invalid {kind} handle {index}")]
    InvalidHandle {
        /// Element kind (e.g. "paragraph").
        kind: &'static str,
        /// Handle index.
        index: usize,
    },

    /// Cell range to merge is empty or outside the row.
    #[error("cannot merge cells {first}..={last} in a row of {len} cells")]
    CellRange {
        /// First grid position.
        first: usize,
        /// Last grid position (inclusive).
        last: usize,
        /// Number of grid positions in the row.
        len: usize,
    },

    /// Invalid length in a template.
    #[error("{0}")]
    Length(#[from] ParseLengthError),

    /// Template YAML could not be parsed.
    #[error("template parse error: {0}")]
    Template(#[from] serde_yaml::Error),

    /// Document could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
