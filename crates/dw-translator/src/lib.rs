//! Doctree to office document translation.
//!
//! A single depth-first pass over a [`dw_tree::Node`] tree drives a
//! [`dw_sink::DocumentSink`]. The input tree nests freely (lists inside table
//! cells, figures inside lists) while the output has stricter rules, so the
//! translator keeps a stack of [`RenderState`]s, one per open table cell,
//! plus a set of [`Toggles`] that are restored on leave.
//!
//! # Example
//!
//! ```
//! use dw_sink::MemoryDocument;
//! use dw_translator::{TranslatorOptions, translate};
//! use dw_tree::{Node, NodeKind};
//!
//! let tree = Node::new(NodeKind::Document).with_child(
//!     Node::new(NodeKind::Section)
//!         .with_child(Node::new(NodeKind::Title).with_child(Node::text("Intro"))),
//! );
//! let mut sink = MemoryDocument::new();
//! let report = translate(&tree, &mut sink, TranslatorOptions::default()).unwrap();
//!
//! let model = sink.snapshot();
//! let heading = model.blocks[1].as_paragraph().unwrap();
//! assert_eq!(heading.style.as_deref(), Some("Heading 1"));
//! assert!(report.warnings.is_empty());
//! ```

mod directive;
mod engine;
mod error;
mod policy;
mod report;
mod state;
mod text;
mod translator;
mod writer;

pub use directive::{DirectiveError, TABLE_STYLE_MARKER, column_widths, table_style};
pub use engine::{NodeVisitor, Visit, walk};
pub use error::TranslateError;
pub use policy::NodePolicy;
pub use report::{SkippedNode, TranslateReport};
pub use state::{RenderState, ScopeCounts, StateStack, ToggleStack, Toggles};
pub use text::normalize;
pub use translator::{
    CAPTION_STYLE, DocxTranslator, FIGURE_FIELD, LITERAL_STYLE, TranslatorOptions, list_style,
};
pub use writer::{Conversion, DocxWriter, translate};
