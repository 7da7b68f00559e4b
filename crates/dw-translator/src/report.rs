//! Outcome of a successful translation.

use crate::state::ScopeCounts;

/// Subtree skipped during translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedNode {
    /// Element name of the skipped node.
    pub kind: String,
    /// Why it was skipped.
    pub reason: &'static str,
}

/// Recoverable problems and bookkeeping of one translation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslateReport {
    /// Recoverable problems: missing styles, ignored directives, bad sizes.
    pub warnings: Vec<String>,
    /// Unsupported or unknown subtrees that produced no output.
    pub skipped: Vec<SkippedNode>,
    /// Cell scopes entered and exited.
    pub scopes: ScopeCounts,
}
