//! Nested, serializable view of a retained document.

use std::path::PathBuf;

use serde::Serialize;

use crate::length::Length;
use crate::sink::{Alignment, PictureSize};

/// Whole document: the body's blocks in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DocumentModel {
    /// Top-level blocks.
    pub blocks: Vec<Block>,
}

/// Block-level content of a container.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph.
    Paragraph(ParagraphModel),
    /// A table.
    Table(TableModel),
}

impl Block {
    /// The paragraph, if this block is one.
    #[must_use]
    pub fn as_paragraph(&self) -> Option<&ParagraphModel> {
        match self {
            Self::Paragraph(p) => Some(p),
            Self::Table(_) => None,
        }
    }

    /// The table, if this block is one.
    #[must_use]
    pub fn as_table(&self) -> Option<&TableModel> {
        match self {
            Self::Table(t) => Some(t),
            Self::Paragraph(_) => None,
        }
    }
}

/// A paragraph and its runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParagraphModel {
    /// Paragraph style name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Explicit alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Explicit left indent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_indent: Option<Length>,
    /// Runs in order.
    pub runs: Vec<RunModel>,
}

impl ParagraphModel {
    /// Visible text: run text plus cached field results.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(RunModel::text).collect()
    }

    /// Pictures placed in this paragraph.
    pub fn pictures(&self) -> impl Iterator<Item = &PictureModel> {
        self.runs
            .iter()
            .flat_map(|run| run.content.iter())
            .filter_map(|inline| match inline {
                Inline::Picture(picture) => Some(picture),
                Inline::Text(_) | Inline::Field { .. } => None,
            })
    }
}

/// A formatted run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunModel {
    /// Bold flag.
    pub bold: bool,
    /// Italic flag.
    pub italic: bool,
    /// Inline content in order.
    pub content: Vec<Inline>,
}

impl RunModel {
    /// Visible text of the run.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|inline| match inline {
                Inline::Text(text) => text.as_str(),
                Inline::Field { result, .. } => result.as_str(),
                Inline::Picture(_) => "",
            })
            .collect()
    }
}

/// Inline content of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    /// Literal text.
    Text(String),
    /// Live field with its cached result.
    Field {
        /// Field instruction, e.g. `SEQ Figure \* ARABIC`.
        instruction: String,
        /// Cached result.
        result: String,
    },
    /// Embedded picture.
    Picture(PictureModel),
}

/// A picture reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PictureModel {
    /// Source file.
    pub path: PathBuf,
    /// Explicit dimensions.
    pub size: PictureSize,
}

/// A table with its column grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TableModel {
    /// Table style name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Column widths; `None` lets the consumer decide.
    pub columns: Vec<Option<Length>>,
    /// Rows of distinct cells (a merged cell appears once).
    pub rows: Vec<Vec<CellModel>>,
}

/// A table cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellModel {
    /// Number of grid columns the cell covers.
    pub span: usize,
    /// Cell content.
    pub blocks: Vec<Block>,
}

impl CellModel {
    /// Paragraphs directly inside the cell.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphModel> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Concatenated text of the cell's direct paragraphs, one line each.
    #[must_use]
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(ParagraphModel::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
