//! Output sink for the DW docx writer.
//!
//! The translator never touches an office file format directly. It appends
//! content to a [`DocumentSink`]: paragraphs, runs, fields, tables and
//! pictures, addressed through opaque handles. Named styles are checked
//! against the sink's [`Template`] and an unknown style is reported as
//! [`SinkError::StyleNotFound`], leaving the fallback to the caller.
//!
//! [`MemoryDocument`] is the bundled implementation. It retains the document
//! in memory, exposes a nested [`DocumentModel`] for inspection and persists
//! that model as JSON.

mod error;
mod handle;
mod length;
mod memory;
mod model;
mod sink;
mod style;

pub use error::SinkError;
pub use handle::{CellId, Location, ParagraphId, PictureTarget, RowId, RunId, TableId};
pub use length::{Length, ParseLengthError};
pub use memory::{DocumentStats, MemoryDocument};
pub use model::{
    Block, CellModel, DocumentModel, Inline, ParagraphModel, PictureModel, RunModel, TableModel,
};
pub use sink::{Alignment, DocumentSink, PictureSize, RunFormat};
pub use style::{DEFAULT_TABLE_STYLE, MAX_HEADING_LEVEL, StyleKind, Template};
