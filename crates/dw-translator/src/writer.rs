//! One-shot conversion of a doctree into a persisted document.

use std::path::Path;

use dw_sink::DocumentSink;
use dw_tree::Node;

use crate::engine::walk;
use crate::error::TranslateError;
use crate::report::TranslateReport;
use crate::translator::{DocxTranslator, TranslatorOptions};

/// Translate `tree` into `sink` without persisting it.
pub fn translate<S: DocumentSink + ?Sized>(
    tree: &Node,
    sink: &mut S,
    options: TranslatorOptions,
) -> Result<TranslateReport, TranslateError> {
    let mut translator = DocxTranslator::new(sink, options)?;
    walk(tree, &mut translator)?;
    translator.finish()
}

/// Finished conversion.
#[derive(Debug)]
pub struct Conversion<S> {
    /// The saved document.
    pub document: S,
    /// Recoverable problems found on the way.
    pub report: TranslateReport,
}

/// Owns a sink for exactly one conversion.
///
/// The document is saved only when the whole tree translated successfully,
/// so a fatal error never leaves a partial output file behind.
///
/// # Example
///
/// ```
/// use dw_sink::MemoryDocument;
/// use dw_translator::{DocxWriter, TranslatorOptions};
/// use dw_tree::{Node, NodeKind};
///
/// let tree = Node::new(NodeKind::Document)
///     .with_child(Node::new(NodeKind::Paragraph).with_child(Node::text("Hello")));
/// let dir = tempfile::tempdir().unwrap();
/// let output = dir.path().join("hello.json");
///
/// let conversion = DocxWriter::new(MemoryDocument::new(), TranslatorOptions::default())
///     .write(&tree, &output)
///     .unwrap();
/// assert!(output.exists());
/// assert!(conversion.report.warnings.is_empty());
/// ```
#[derive(Debug)]
pub struct DocxWriter<S> {
    sink: S,
    options: TranslatorOptions,
}

impl<S: DocumentSink> DocxWriter<S> {
    /// Create a writer around a fresh sink.
    #[must_use]
    pub fn new(sink: S, options: TranslatorOptions) -> Self {
        Self { sink, options }
    }

    /// Translate `tree` and save the document to `output`.
    pub fn write(self, tree: &Node, output: &Path) -> Result<Conversion<S>, TranslateError> {
        let Self { mut sink, options } = self;
        tracing::info!(output = %output.display(), "Converting document tree");

        let report = translate(tree, &mut sink, options)?;
        sink.save(output)?;

        tracing::info!(
            warnings = report.warnings.len(),
            skipped = report.skipped.len(),
            "Conversion finished"
        );
        Ok(Conversion {
            document: sink,
            report,
        })
    }
}
