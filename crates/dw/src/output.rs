//! Colored terminal output for conversion progress.

use console::{Style, Term};
use dw_sink::DocumentStats;

/// Writes progress lines to stderr.
pub(crate) struct Output {
    term: Term,
    success: Style,
    warning: Style,
    error: Style,
    heading: Style,
}

impl Output {
    /// Create an output bound to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            heading: Style::new().cyan().bold(),
        }
    }

    /// Print an unstyled line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a green line.
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.success, msg);
    }

    /// Print a yellow line.
    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.warning, msg);
    }

    /// Print a red line.
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.error, msg);
    }

    /// Print a bold cyan line.
    pub(crate) fn heading(&self, msg: &str) {
        self.styled(&self.heading, msg);
    }

    /// Print the block counts of a finished document.
    pub(crate) fn summary(&self, stats: DocumentStats, warnings: usize) {
        self.info(&format!(
            "{} paragraphs, {} tables, {} pictures, {warnings} warnings",
            stats.paragraphs, stats.tables, stats.pictures
        ));
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
