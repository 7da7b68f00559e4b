//! The output sink contract.

use std::path::Path;

use serde::Serialize;

use crate::error::SinkError;
use crate::handle::{CellId, Location, ParagraphId, PictureTarget, RowId, RunId, TableId};
use crate::length::Length;
use crate::style::StyleKind;

/// Character formatting applied to a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunFormat {
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
}

impl RunFormat {
    /// Plain text, no formatting.
    pub const PLAIN: Self = Self {
        bold: false,
        italic: false,
    };
}

/// Horizontal paragraph alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Explicit picture dimensions. Unset dimensions are derived from the asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PictureSize {
    /// Display width.
    pub width: Option<Length>,
    /// Display height.
    pub height: Option<Length>,
}

/// Append-only, retained document that conversion output is written to.
///
/// Handles returned by one sink are only meaningful to that sink. Every
/// method taking a handle fails with [`SinkError::InvalidHandle`] for a
/// handle it did not issue.
pub trait DocumentSink {
    /// Check whether a named style exists.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::StyleNotFound`] if the template does not define it.
    fn check_style(&self, name: &str, kind: StyleKind) -> Result<(), SinkError>;

    /// Usable body width between the page margins.
    fn body_width(&self) -> Length;

    /// Append a paragraph at `location`.
    ///
    /// # Errors
    ///
    /// Fails for unknown styles or handles.
    fn add_paragraph(
        &mut self,
        location: Location,
        style: Option<&str>,
    ) -> Result<ParagraphId, SinkError>;

    /// Append a heading paragraph at `location`. Level 0 is the title.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn add_heading(&mut self, location: Location, level: usize) -> Result<ParagraphId, SinkError>;

    /// Replace the style of a paragraph.
    ///
    /// # Errors
    ///
    /// Fails for unknown styles or handles.
    fn set_paragraph_style(
        &mut self,
        paragraph: ParagraphId,
        style: Option<&str>,
    ) -> Result<(), SinkError>;

    /// Set the horizontal alignment of a paragraph.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn set_alignment(&mut self, paragraph: ParagraphId, alignment: Alignment)
    -> Result<(), SinkError>;

    /// Set the left indent of a paragraph.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn set_left_indent(&mut self, paragraph: ParagraphId, indent: Length)
    -> Result<(), SinkError>;

    /// Whether a paragraph has no text yet.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn paragraph_is_empty(&self, paragraph: ParagraphId) -> Result<bool, SinkError>;

    /// Append a text run to a paragraph.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn add_run(
        &mut self,
        paragraph: ParagraphId,
        text: &str,
        format: RunFormat,
    ) -> Result<RunId, SinkError>;

    /// Append a live field (e.g. `SEQ Figure \* ARABIC`) with a cached result
    /// shown by consumers that do not evaluate fields.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn add_field(
        &mut self,
        paragraph: ParagraphId,
        instruction: &str,
        result: &str,
    ) -> Result<(), SinkError>;

    /// Append an empty table at `location`. Columns and rows are added later.
    ///
    /// # Errors
    ///
    /// Fails for unknown styles or handles.
    fn add_table(&mut self, location: Location, style: Option<&str>)
    -> Result<TableId, SinkError>;

    /// Append a column. Existing rows gain a cell.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn add_column(&mut self, table: TableId, width: Option<Length>) -> Result<(), SinkError>;

    /// Append a row with one cell per column, each holding one empty paragraph.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn add_row(&mut self, table: TableId) -> Result<RowId, SinkError>;

    /// Cells of a row by grid position. A merged cell appears once per
    /// position it spans.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn row_cells(&self, row: RowId) -> Result<Vec<CellId>, SinkError>;

    /// Paragraphs directly inside a cell.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn cell_paragraphs(&self, cell: CellId) -> Result<Vec<ParagraphId>, SinkError>;

    /// Merge grid positions `first..=last` of a row into one cell.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles or an invalid range.
    fn merge_cells(&mut self, row: RowId, first: usize, last: usize)
    -> Result<CellId, SinkError>;

    /// Add a picture from `path`.
    ///
    /// # Errors
    ///
    /// Fails for unknown handles.
    fn add_picture(
        &mut self,
        target: PictureTarget,
        path: &Path,
        size: PictureSize,
    ) -> Result<(), SinkError>;

    /// Persist the assembled document to `path`.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be written.
    fn save(&self, path: &Path) -> Result<(), SinkError>;
}
