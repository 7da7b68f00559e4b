//! Render states, the state stack and cross-cutting toggles.
//!
//! A [`RenderState`] describes where new block content goes and carries the
//! table and figure bookkeeping that belongs to that container. Entering a
//! table cell pushes a fresh state; leaving it restores the enclosing one.

use std::collections::VecDeque;

use dw_sink::{Length, Location, RowId, TableId};

/// Rendering context of one container (document body or table cell).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderState {
    location: Location,
    pub(crate) table: Option<TableId>,
    pub(crate) column_widths: VecDeque<Length>,
    pub(crate) table_style: String,
    pub(crate) pending_span: usize,
    pub(crate) row: Option<RowId>,
    pub(crate) cell_cursor: usize,
    pub(crate) next_figure_number: usize,
    pub(crate) column_count: usize,
}

impl RenderState {
    /// Fresh state at `location` using `table_style` for the next table.
    #[must_use]
    pub fn new(location: Location, table_style: impl Into<String>) -> Self {
        Self {
            location,
            table: None,
            column_widths: VecDeque::new(),
            table_style: table_style.into(),
            pending_span: 0,
            row: None,
            cell_cursor: 0,
            next_figure_number: 1,
            column_count: 1,
        }
    }

    /// Container that new block content is appended to.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Table currently open at this location.
    #[must_use]
    pub fn table(&self) -> Option<TableId> {
        self.table
    }

    /// Style requested for the next table.
    #[must_use]
    pub fn table_style(&self) -> &str {
        &self.table_style
    }

    /// Number the next figure caption will get.
    #[must_use]
    pub fn next_figure_number(&self) -> usize {
        self.next_figure_number
    }

    /// Hand out the next figure number.
    pub(crate) fn take_figure_number(&mut self) -> usize {
        let number = self.next_figure_number;
        self.next_figure_number += 1;
        number
    }
}

/// Number of scope transitions performed by a [`StateStack`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopeCounts {
    /// Calls to [`StateStack::enter_scope`].
    pub enters: usize,
    /// Successful calls to [`StateStack::exit_scope`].
    pub exits: usize,
}

/// LIFO stack of render states with exactly one active state.
#[derive(Debug)]
pub struct StateStack {
    current: RenderState,
    saved: Vec<RenderState>,
    counts: ScopeCounts,
}

impl StateStack {
    /// Stack whose only state is `root`.
    #[must_use]
    pub fn new(root: RenderState) -> Self {
        Self {
            current: root,
            saved: Vec::new(),
            counts: ScopeCounts::default(),
        }
    }

    /// Active state.
    #[must_use]
    pub fn current(&self) -> &RenderState {
        &self.current
    }

    pub(crate) fn current_mut(&mut self) -> &mut RenderState {
        &mut self.current
    }

    /// Number of saved ancestor states.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Whether the active state is nested inside another one.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.saved.is_empty()
    }

    /// Save the active state and install a fresh one at `location`.
    pub fn enter_scope(&mut self, location: Location, table_style: &str) {
        let fresh = RenderState::new(location, table_style);
        self.saved.push(std::mem::replace(&mut self.current, fresh));
        self.counts.enters += 1;
    }

    /// Restore the previously saved state, returning the one that was active.
    ///
    /// Returns `None` (and changes nothing) when no state is saved.
    pub fn exit_scope(&mut self) -> Option<RenderState> {
        let previous = self.saved.pop()?;
        self.counts.exits += 1;
        Some(std::mem::replace(&mut self.current, previous))
    }

    /// Enter/exit counts so far.
    #[must_use]
    pub fn counts(&self) -> ScopeCounts {
        self.counts
    }

    /// Whether every entered scope has been exited.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.saved.is_empty() && self.counts.enters == self.counts.exits
    }
}

/// Formatting and context flags that nest with the tree.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Toggles {
    /// Runs are bold.
    pub bold: bool,
    /// Runs are italic.
    pub italic: bool,
    /// New paragraphs are centered.
    pub centered: bool,
    /// Text is kept verbatim.
    pub literal: bool,
    /// Inside a figure.
    pub in_figure: bool,
}

/// Toggles with the values to restore on leave.
#[derive(Debug, Default)]
pub struct ToggleStack {
    current: Toggles,
    saved: Vec<Toggles>,
}

impl ToggleStack {
    /// Active toggles.
    #[must_use]
    pub fn current(&self) -> Toggles {
        self.current
    }

    /// Save the active toggles, then apply `change`.
    pub fn push(&mut self, change: impl FnOnce(&mut Toggles)) {
        self.saved.push(self.current);
        change(&mut self.current);
    }

    /// Restore the toggles saved by the matching [`push`](Self::push).
    pub fn pop(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scopes_restore_previous_state() {
        let mut stack = StateStack::new(RenderState::new(Location::Body, "Table Grid"));
        stack.current_mut().take_figure_number();
        stack.current_mut().table_style = "Custom".to_owned();

        stack.enter_scope(Location::Body, "Table Grid");
        assert!(stack.is_nested());
        assert_eq!(stack.current().next_figure_number(), 1);
        assert_eq!(stack.current().table_style(), "Table Grid");

        stack.exit_scope().unwrap();
        assert_eq!(stack.current().next_figure_number(), 2);
        assert_eq!(stack.current().table_style(), "Custom");
        assert!(stack.is_balanced());
        assert_eq!(stack.counts(), ScopeCounts { enters: 1, exits: 1 });
    }

    #[test]
    fn test_exit_without_enter() {
        let mut stack = StateStack::new(RenderState::new(Location::Body, "Table Grid"));
        assert!(stack.exit_scope().is_none());
        assert_eq!(stack.counts().exits, 0);
        assert!(stack.is_balanced());
    }

    #[test]
    fn test_unbalanced_scopes() {
        let mut stack = StateStack::new(RenderState::new(Location::Body, "Table Grid"));
        stack.enter_scope(Location::Body, "Table Grid");
        stack.enter_scope(Location::Body, "Table Grid");
        stack.exit_scope();
        assert_eq!(stack.depth(), 1);
        assert!(!stack.is_balanced());
    }

    #[test]
    fn test_toggles_restore_prior_value() {
        let mut toggles = ToggleStack::default();
        toggles.push(|t| t.bold = true);
        toggles.push(|t| t.bold = true);
        toggles.pop();
        // Inner strong must not clear the outer one
        assert!(toggles.current().bold);
        toggles.pop();
        assert!(!toggles.current().bold);
    }
}
