//! Translation errors.

use dw_sink::SinkError;

/// Fatal error that aborts a translation.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Valid input the writer cannot express, such as row-spanning cells.
    #[error("unsupported structure: {0}")]
    UnsupportedStructure(String),

    /// Malformed input, such as a table entry outside a row.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// Cell scopes were not closed in order.
    #[error("unbalanced cell scopes: {enters} entered, {exits} exited")]
    UnbalancedScopes {
        /// Scopes entered.
        enters: usize,
        /// Scopes exited.
        exits: usize,
    },

    /// Sink operation failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
