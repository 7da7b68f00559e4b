//! Node handlers that write a doctree into a [`DocumentSink`].
//!
//! [`DocxTranslator`] is a [`NodeVisitor`]. Block handlers decide where a
//! paragraph goes (the active [`RenderState`]'s location), inline handlers
//! append runs to the current insertion point, and table handlers drive the
//! sink's table API while pushing a fresh render state for every cell.

use std::borrow::Cow;
use std::path::PathBuf;

use dw_sink::{
    Alignment, DEFAULT_TABLE_STYLE, DocumentSink, Length, Location, ParagraphId, PictureSize,
    PictureTarget, RunFormat, SinkError, StyleKind,
};
use dw_tree::{Node, NodeKind};

use crate::directive;
use crate::engine::{NodeVisitor, Visit};
use crate::error::TranslateError;
use crate::policy::NodePolicy;
use crate::report::{SkippedNode, TranslateReport};
use crate::state::{RenderState, StateStack, ToggleStack};
use crate::text;

/// Paragraph style of figure captions.
pub const CAPTION_STYLE: &str = "Caption";

/// Paragraph style of literal blocks.
pub const LITERAL_STYLE: &str = "Preformatted Text";

/// Field instruction numbering figures.
pub const FIGURE_FIELD: &str = r"SEQ Figure \* ARABIC";

/// Paragraph style for a list item at `depth`.
///
/// Enumerated lists use the bullet styles too.
#[must_use]
pub fn list_style(depth: usize) -> String {
    if depth < 2 {
        "List Bullet".to_owned()
    } else {
        format!("List Bullet {depth}")
    }
}

/// Translator settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Directory image URIs are resolved against.
    pub source_dir: PathBuf,
    /// Table style used unless a directive overrides it.
    pub table_style: String,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            table_style: DEFAULT_TABLE_STYLE.to_owned(),
        }
    }
}

impl TranslatorOptions {
    /// Resolve image URIs against `dir`.
    #[must_use]
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Use `style` as the default table style.
    #[must_use]
    pub fn with_table_style(mut self, style: impl Into<String>) -> Self {
        self.table_style = style.into();
        self
    }
}

/// Single-use visitor translating one doctree into a sink.
///
/// Creating the translator appends one empty paragraph to the document body;
/// it is the insertion point until the first block handler replaces it.
pub struct DocxTranslator<'s, S: DocumentSink + ?Sized> {
    sink: &'s mut S,
    options: TranslatorOptions,
    states: StateStack,
    toggles: ToggleStack,
    list_depth: usize,
    section_depth: usize,
    paragraph: ParagraphId,
    /// Insertion point was created for a list item.
    in_list_item: bool,
    report: TranslateReport,
}

impl<'s, S: DocumentSink + ?Sized> DocxTranslator<'s, S> {
    /// Create a translator writing into `sink`.
    pub fn new(sink: &'s mut S, options: TranslatorOptions) -> Result<Self, TranslateError> {
        let paragraph = sink.add_paragraph(Location::Body, None)?;
        let root = RenderState::new(Location::Body, options.table_style.clone());
        Ok(Self {
            sink,
            options,
            states: StateStack::new(root),
            toggles: ToggleStack::default(),
            list_depth: 0,
            section_depth: 0,
            paragraph,
            in_list_item: false,
            report: TranslateReport::default(),
        })
    }

    /// Active render state.
    pub fn state(&self) -> &RenderState {
        self.states.current()
    }

    /// Paragraph text runs are appended to.
    pub fn insertion_point(&self) -> ParagraphId {
        self.paragraph
    }

    /// Finish the translation and return its report.
    ///
    /// Fails if cell scopes were left open.
    pub fn finish(self) -> Result<TranslateReport, TranslateError> {
        let counts = self.states.counts();
        if !self.states.is_balanced() {
            return Err(TranslateError::UnbalancedScopes {
                enters: counts.enters,
                exits: counts.exits,
            });
        }
        let mut report = self.report;
        report.scopes = counts;
        Ok(report)
    }

    fn location(&self) -> Location {
        self.states.current().location()
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.report.warnings.push(message);
    }

    fn set_paragraph(&mut self, paragraph: ParagraphId) {
        self.paragraph = paragraph;
        self.in_list_item = false;
    }

    /// Look a style up, falling back to no style with a warning.
    fn resolve_style<'n>(
        &mut self,
        name: &'n str,
        kind: StyleKind,
    ) -> Result<Option<&'n str>, TranslateError> {
        match self.sink.check_style(name, kind) {
            Ok(()) => Ok(Some(name)),
            Err(SinkError::StyleNotFound { .. }) => {
                self.warn(format!("{kind} style \"{name}\" is missing, using no style"));
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Append a paragraph at the current location, centered if requested.
    fn add_paragraph(&mut self, style: Option<&str>) -> Result<ParagraphId, TranslateError> {
        let paragraph = self.sink.add_paragraph(self.location(), style)?;
        if self.toggles.current().centered {
            self.sink.set_alignment(paragraph, Alignment::Center)?;
        }
        Ok(paragraph)
    }

    /// The current cell's only paragraph, while it is still empty.
    fn untouched_cell_paragraph(&self) -> Result<Option<ParagraphId>, TranslateError> {
        let Some(cell) = self.location().cell() else {
            return Ok(None);
        };
        let paragraphs = self.sink.cell_paragraphs(cell)?;
        if let [only] = paragraphs.as_slice()
            && self.sink.paragraph_is_empty(*only)?
        {
            return Ok(Some(*only));
        }
        Ok(None)
    }

    fn visit_handled(&mut self, node: &Node) -> Result<Visit, TranslateError> {
        match node.kind() {
            NodeKind::StartOfFile => self.section_depth = 0,
            NodeKind::Section => self.section_depth += 1,
            NodeKind::Title => {
                let heading = self.sink.add_heading(self.location(), self.section_depth)?;
                self.set_paragraph(heading);
            }
            NodeKind::Paragraph => self.visit_paragraph()?,
            NodeKind::Text => {
                self.visit_text(node)?;
                return Ok(Visit::Skip);
            }
            NodeKind::Strong => self.toggles.push(|t| t.bold = true),
            NodeKind::Emphasis => self.toggles.push(|t| t.italic = true),
            NodeKind::BulletList | NodeKind::EnumeratedList => self.list_depth += 1,
            NodeKind::ListItem => self.visit_list_item()?,
            NodeKind::Table => self.visit_table()?,
            NodeKind::Tgroup => self.visit_tgroup(node)?,
            NodeKind::Colspec => {
                self.visit_colspec()?;
                return Ok(Visit::Skip);
            }
            NodeKind::Row => self.visit_row()?,
            NodeKind::Entry => self.visit_entry(node)?,
            NodeKind::Figure => {
                let centered = node.attr_str("align") == Some("center");
                self.toggles.push(|t| {
                    t.in_figure = true;
                    t.centered |= centered;
                });
            }
            NodeKind::Caption => self.visit_caption()?,
            NodeKind::Image => {
                self.visit_image(node)?;
                return Ok(Visit::Skip);
            }
            NodeKind::LiteralBlock => self.visit_literal_block()?,
            NodeKind::Comment => {
                self.visit_comment(node);
                return Ok(Visit::Skip);
            }
            NodeKind::TabularColSpec => {
                self.visit_tabular_col_spec(node);
                return Ok(Visit::Skip);
            }
            _ => {}
        }
        Ok(Visit::Descend)
    }

    fn visit_paragraph(&mut self) -> Result<(), TranslateError> {
        if self.in_list_item && self.sink.paragraph_is_empty(self.paragraph)? {
            // First paragraph of a list item goes into the item's paragraph.
            return Ok(());
        }
        if self.location().cell().is_some() {
            let paragraph = match self.untouched_cell_paragraph()? {
                Some(paragraph) => paragraph,
                None => self.add_paragraph(None)?,
            };
            self.sink.set_alignment(paragraph, Alignment::Left)?;
            self.sink.set_left_indent(paragraph, Length::new(0))?;
            self.set_paragraph(paragraph);
        } else {
            let paragraph = self.add_paragraph(None)?;
            self.set_paragraph(paragraph);
        }
        Ok(())
    }

    fn visit_text(&mut self, node: &Node) -> Result<(), TranslateError> {
        let toggles = self.toggles.current();
        let text = if toggles.literal {
            Cow::Borrowed(node.raw_text())
        } else {
            text::normalize(node.raw_text())
        };
        let format = RunFormat {
            bold: toggles.bold,
            italic: toggles.italic,
        };
        self.sink.add_run(self.paragraph, &text, format)?;
        Ok(())
    }

    fn visit_list_item(&mut self) -> Result<(), TranslateError> {
        let name = list_style(self.list_depth);
        let style = self.resolve_style(&name, StyleKind::Paragraph)?;
        let paragraph = if let Some(paragraph) = self.untouched_cell_paragraph()? {
            self.sink.set_paragraph_style(paragraph, style)?;
            paragraph
        } else {
            self.add_paragraph(style)?
        };
        self.set_paragraph(paragraph);
        self.in_list_item = true;
        Ok(())
    }

    fn visit_table(&mut self) -> Result<(), TranslateError> {
        if self.states.current().table.is_some() {
            return Err(TranslateError::InvalidStructure(
                "table directly inside another table".to_owned(),
            ));
        }
        let name = self.states.current().table_style().to_owned();
        let style = if self.states.is_nested() {
            tracing::debug!(style = %name, "Nested table created without style");
            None
        } else {
            self.resolve_style(&name, StyleKind::Table)?
        };
        let table = self.sink.add_table(self.location(), style)?;
        let state = self.states.current_mut();
        state.table = Some(table);
        state.row = None;
        state.cell_cursor = 0;
        Ok(())
    }

    fn depart_table(&mut self) -> Result<(), TranslateError> {
        let state = self.states.current_mut();
        state.table = None;
        state.row = None;
        state.cell_cursor = 0;
        state.column_widths.clear();
        state.table_style.clone_from(&self.options.table_style);
        // Keeps consecutive tables from being joined.
        let spacer = self.add_paragraph(None)?;
        self.set_paragraph(spacer);
        Ok(())
    }

    fn visit_tgroup(&mut self, node: &Node) -> Result<(), TranslateError> {
        let state = self.states.current_mut();
        if state.table.is_none() {
            return Err(invalid("tgroup outside a table"));
        }
        state.column_count = node
            .children()
            .iter()
            .filter(|child| *child.kind() == NodeKind::Colspec)
            .count();
        Ok(())
    }

    fn visit_colspec(&mut self) -> Result<(), TranslateError> {
        let body_width = self.sink.body_width();
        let state = self.states.current_mut();
        let table = state.table.ok_or_else(|| invalid("colspec outside a table"))?;
        let width = state
            .column_widths
            .pop_front()
            .unwrap_or_else(|| body_width.divide(state.column_count));
        self.sink.add_column(table, Some(width))?;
        Ok(())
    }

    fn visit_row(&mut self) -> Result<(), TranslateError> {
        let table = self
            .states
            .current()
            .table
            .ok_or_else(|| invalid("row outside a table"))?;
        let row = self.sink.add_row(table)?;
        let state = self.states.current_mut();
        state.row = Some(row);
        state.cell_cursor = 0;
        Ok(())
    }

    fn visit_entry(&mut self, node: &Node) -> Result<(), TranslateError> {
        if node.has_attr("morerows") {
            return Err(TranslateError::UnsupportedStructure(
                "row spanning cells (morerows) are not implemented".to_owned(),
            ));
        }
        let span = match node.attr("morecols") {
            None => 0,
            Some(value) => value
                .as_usize()
                .ok_or_else(|| invalid(format!("morecols must be a column count, got {value:?}")))?,
        };

        let state = self.states.current();
        let row = state.row.ok_or_else(|| invalid("entry outside a row"))?;
        let first = state.cell_cursor;
        let last = first
            .checked_add(span)
            .ok_or_else(|| invalid(format!("morecols {span} overflows the column index")))?;
        let cells = self.sink.row_cells(row)?;
        let Some(&cell) = cells.get(first).filter(|_| last < cells.len()) else {
            return Err(invalid(format!(
                "entry covering columns {first}..={last} does not fit a row of {} cells",
                cells.len()
            )));
        };
        let cell = if span > 0 {
            self.sink.merge_cells(row, first, last)?
        } else {
            cell
        };

        self.states.current_mut().pending_span = span;
        self.states
            .enter_scope(Location::Cell(cell), &self.options.table_style);
        let paragraph = self
            .sink
            .cell_paragraphs(cell)?
            .first()
            .copied()
            .ok_or_else(|| invalid("table cell without a paragraph"))?;
        self.set_paragraph(paragraph);
        Ok(())
    }

    fn depart_entry(&mut self) -> Result<(), TranslateError> {
        if self.states.exit_scope().is_none() {
            let counts = self.states.counts();
            return Err(TranslateError::UnbalancedScopes {
                enters: counts.enters,
                exits: counts.exits,
            });
        }
        let state = self.states.current_mut();
        state.cell_cursor += state.pending_span + 1;
        state.pending_span = 0;
        Ok(())
    }

    fn visit_caption(&mut self) -> Result<(), TranslateError> {
        let style = self.resolve_style(CAPTION_STYLE, StyleKind::Paragraph)?;
        let paragraph = self.add_paragraph(style)?;
        if self.toggles.current().in_figure {
            let number = self.states.current_mut().take_figure_number();
            self.sink.add_run(paragraph, "Figure ", RunFormat::PLAIN)?;
            self.sink
                .add_field(paragraph, FIGURE_FIELD, &number.to_string())?;
            self.sink.add_run(paragraph, ": ", RunFormat::PLAIN)?;
        } else {
            tracing::debug!("Caption outside a figure is not numbered");
        }
        self.set_paragraph(paragraph);
        Ok(())
    }

    fn visit_image(&mut self, node: &Node) -> Result<(), TranslateError> {
        let Some(uri) = node.attr_str("uri") else {
            self.warn("image without uri skipped".to_owned());
            return Ok(());
        };
        let path = self.options.source_dir.join(uri);
        let size = PictureSize {
            width: self.image_length(node, "width"),
            height: self.image_length(node, "height"),
        };
        tracing::debug!(path = %path.display(), ?size, "Adding picture");

        if self.toggles.current().in_figure {
            let paragraph = self.add_paragraph(None)?;
            self.set_paragraph(paragraph);
            let run = self.sink.add_run(paragraph, "", RunFormat::PLAIN)?;
            self.sink.add_picture(PictureTarget::Run(run), &path, size)?;
        } else {
            self.sink
                .add_picture(PictureTarget::Location(self.location()), &path, size)?;
        }
        Ok(())
    }

    /// Absolute image dimension; anything else is ignored with a warning.
    fn image_length(&mut self, node: &Node, name: &str) -> Option<Length> {
        let value = node.attr(name)?;
        let parsed = value
            .as_str()
            .map(str::parse::<Length>)
            .and_then(Result::ok);
        if parsed.is_none() {
            self.warn(format!("ignoring image {name} {value:?}: not an absolute length"));
        }
        parsed
    }

    fn visit_literal_block(&mut self) -> Result<(), TranslateError> {
        self.toggles.push(|t| t.literal = true);
        let style = self.resolve_style(LITERAL_STYLE, StyleKind::Paragraph)?;
        let paragraph = self.add_paragraph(style)?;
        self.sink.set_alignment(paragraph, Alignment::Left)?;
        self.set_paragraph(paragraph);
        Ok(())
    }

    fn visit_comment(&mut self, node: &Node) {
        let comment = node.astext();
        match directive::table_style(&comment) {
            Some(Ok(style)) => {
                tracing::debug!(style, "Table style directive");
                self.states.current_mut().table_style = style.to_owned();
            }
            Some(Err(err)) => self.warn(format!("ignoring directive: {err}")),
            None => {}
        }
    }

    fn visit_tabular_col_spec(&mut self, node: &Node) {
        let Some(spec) = node.attr_str("spec") else {
            self.warn("tabular_col_spec without spec ignored".to_owned());
            return;
        };
        match directive::column_widths(spec) {
            Ok(widths) => self.states.current_mut().column_widths = widths.into(),
            Err(err) => self.warn(format!("ignoring column widths: {err}")),
        }
    }
}

fn invalid(message: impl Into<String>) -> TranslateError {
    TranslateError::InvalidStructure(message.into())
}

impl<S: DocumentSink + ?Sized> NodeVisitor for DocxTranslator<'_, S> {
    type Error = TranslateError;

    fn visit(&mut self, node: &Node) -> Result<Visit, TranslateError> {
        tracing::debug!(kind = %node.kind(), "visit");
        match NodePolicy::of(node.kind()) {
            NodePolicy::Handled => self.visit_handled(node),
            NodePolicy::Transparent => Ok(Visit::Descend),
            NodePolicy::Unsupported(reason) => Ok(Visit::Unsupported(reason)),
            NodePolicy::Unknown => Ok(Visit::Unsupported("unknown node kind")),
        }
    }

    fn depart(&mut self, node: &Node) -> Result<(), TranslateError> {
        match node.kind() {
            NodeKind::Section => self.section_depth = self.section_depth.saturating_sub(1),
            NodeKind::Strong | NodeKind::Emphasis | NodeKind::Figure | NodeKind::LiteralBlock => {
                self.toggles.pop();
            }
            NodeKind::BulletList | NodeKind::EnumeratedList => {
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            NodeKind::Table => self.depart_table()?,
            NodeKind::Tgroup => self.states.current_mut().column_count = 1,
            NodeKind::Entry => self.depart_entry()?,
            NodeKind::Caption => {
                let paragraph = self.add_paragraph(None)?;
                self.set_paragraph(paragraph);
            }
            _ => {}
        }
        Ok(())
    }

    fn unsupported(&mut self, node: &Node, reason: &'static str) {
        if matches!(node.kind(), NodeKind::Other(_)) {
            tracing::warn!(kind = %node.kind(), "Skipped unknown node");
        } else {
            tracing::debug!(kind = %node.kind(), reason, "Skipped unsupported node");
        }
        self.report.skipped.push(SkippedNode {
            kind: node.kind().to_string(),
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use dw_sink::{Block, DocumentModel, Inline, MemoryDocument, ParagraphModel, Template};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ScopeCounts;
    use crate::engine::walk;

    fn el(kind: NodeKind, children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(kind).with_children(children)
    }

    fn doc(children: impl IntoIterator<Item = Node>) -> Node {
        el(NodeKind::Document, children)
    }

    fn para(text: &str) -> Node {
        el(NodeKind::Paragraph, [Node::text(text)])
    }

    fn caption(text: &str) -> Node {
        el(NodeKind::Caption, [Node::text(text)])
    }

    fn entry(children: impl IntoIterator<Item = Node>) -> Node {
        el(NodeKind::Entry, children)
    }

    fn table(columns: usize, rows: impl IntoIterator<Item = Vec<Node>>) -> Node {
        let colspecs = (0..columns).map(|_| Node::new(NodeKind::Colspec));
        let rows = rows.into_iter().map(|cells| el(NodeKind::Row, cells));
        let tgroup = el(NodeKind::Tgroup, colspecs).with_child(el(NodeKind::Tbody, rows));
        el(NodeKind::Table, [tgroup])
    }

    fn translate_with(tree: &Node, options: TranslatorOptions) -> (DocumentModel, TranslateReport) {
        let mut sink = MemoryDocument::new();
        let mut translator = DocxTranslator::new(&mut sink, options).unwrap();
        walk(tree, &mut translator).unwrap();
        let report = translator.finish().unwrap();
        (sink.snapshot(), report)
    }

    fn translate(tree: &Node) -> (DocumentModel, TranslateReport) {
        translate_with(tree, TranslatorOptions::default())
    }

    fn translate_err(tree: &Node) -> TranslateError {
        let mut sink = MemoryDocument::new();
        let mut translator = DocxTranslator::new(&mut sink, TranslatorOptions::default()).unwrap();
        walk(tree, &mut translator).unwrap_err()
    }

    fn paragraph(block: &Block) -> &ParagraphModel {
        block.as_paragraph().unwrap()
    }

    fn captions(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(Block::as_paragraph)
            .filter(|p| p.style.as_deref() == Some(CAPTION_STYLE))
            .map(ParagraphModel::text)
            .collect()
    }

    #[test]
    fn test_starts_with_empty_paragraph() {
        let (model, report) = translate(&doc([]));
        assert_eq!(model.blocks, vec![Block::Paragraph(ParagraphModel::default())]);
        assert_eq!(report, TranslateReport::default());
    }

    #[test]
    fn test_inline_formatting() {
        let tree = doc([el(
            NodeKind::Paragraph,
            [
                Node::text("plain "),
                el(NodeKind::Strong, [Node::text("bold")]),
                el(
                    NodeKind::Emphasis,
                    [el(NodeKind::Strong, [Node::text("both")]), Node::text(" it")],
                ),
            ],
        )]);

        let (model, _) = translate(&tree);

        let runs = &paragraph(&model.blocks[1]).runs;
        let formats: Vec<_> = runs.iter().map(|r| (r.text(), r.bold, r.italic)).collect();
        assert_eq!(
            formats,
            vec![
                ("plain ".to_owned(), false, false),
                ("bold".to_owned(), true, false),
                ("both".to_owned(), true, true),
                (" it".to_owned(), false, true),
            ]
        );
    }

    #[test]
    fn test_text_normalization() {
        let tree = doc([
            para("a\n\nb"),
            para("a\nb"),
            el(NodeKind::LiteralBlock, [Node::text("a\nb")]),
        ]);

        let (model, report) = translate(&tree);

        assert_eq!(paragraph(&model.blocks[1]).text(), "a\nb");
        assert_eq!(paragraph(&model.blocks[2]).text(), "a b");
        let literal = paragraph(&model.blocks[3]);
        assert_eq!(literal.text(), "a\nb");
        assert_eq!(literal.alignment, Some(Alignment::Left));
        // The default template has no "Preformatted Text" style
        assert_eq!(literal.style, None);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains(LITERAL_STYLE));
    }

    #[test]
    fn test_literal_block_style_from_template() {
        let template = Template::default().with_style(LITERAL_STYLE, StyleKind::Paragraph);
        let mut sink = MemoryDocument::with_template(template);
        let tree = doc([el(NodeKind::LiteralBlock, [Node::text("x = 1\n")])]);
        let mut translator = DocxTranslator::new(&mut sink, TranslatorOptions::default()).unwrap();
        walk(&tree, &mut translator).unwrap();
        let report = translator.finish().unwrap();

        let model = sink.snapshot();
        assert_eq!(paragraph(&model.blocks[1]).style.as_deref(), Some(LITERAL_STYLE));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_headings_follow_section_depth() {
        let title = |text: &str| el(NodeKind::Title, [Node::text(text)]);
        let tree = doc([
            title("Manual"),
            el(
                NodeKind::Section,
                [
                    title("One"),
                    el(NodeKind::Section, [title("Two")]),
                    el(
                        NodeKind::StartOfFile,
                        [el(NodeKind::Section, [title("Included")])],
                    ),
                ],
            ),
        ]);

        let (model, _) = translate(&tree);

        let headings: Vec<_> = model.blocks[1..]
            .iter()
            .map(|b| (paragraph(b).text(), paragraph(b).style.clone().unwrap()))
            .collect();
        assert_eq!(
            headings,
            vec![
                ("Manual".to_owned(), "Title".to_owned()),
                ("One".to_owned(), "Heading 1".to_owned()),
                ("Two".to_owned(), "Heading 2".to_owned()),
                ("Included".to_owned(), "Heading 1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_nested_bullet_list_styles() {
        let tree = doc([el(
            NodeKind::BulletList,
            [el(
                NodeKind::ListItem,
                [
                    para("one"),
                    el(
                        NodeKind::EnumeratedList,
                        [el(NodeKind::ListItem, [para("two")])],
                    ),
                ],
            )],
        )]);

        let (model, report) = translate(&tree);

        let items: Vec<_> = model.blocks[1..]
            .iter()
            .map(|b| (paragraph(b).text(), paragraph(b).style.clone()))
            .collect();
        assert_eq!(
            items,
            vec![
                ("one".to_owned(), Some("List Bullet".to_owned())),
                ("two".to_owned(), Some("List Bullet 2".to_owned())),
            ]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_list_item_second_paragraph_is_plain() {
        let tree = doc([el(
            NodeKind::BulletList,
            [el(NodeKind::ListItem, [para("first"), para("second")])],
        )]);

        let (model, _) = translate(&tree);

        assert_eq!(model.blocks.len(), 3);
        assert_eq!(paragraph(&model.blocks[2]).text(), "second");
        assert_eq!(paragraph(&model.blocks[2]).style, None);
    }

    #[test]
    fn test_missing_list_style_falls_back() {
        let template = Template::empty(Length::from_inches(6.0));
        let mut sink = MemoryDocument::with_template(template);
        let tree = doc([el(NodeKind::BulletList, [el(NodeKind::ListItem, [para("x")])])]);
        let mut translator = DocxTranslator::new(&mut sink, TranslatorOptions::default()).unwrap();
        walk(&tree, &mut translator).unwrap();
        let report = translator.finish().unwrap();

        let model = sink.snapshot();
        assert_eq!(model.blocks.len(), 2);
        assert_eq!(paragraph(&model.blocks[1]).style, None);
        assert_eq!(paragraph(&model.blocks[1]).text(), "x");
        assert!(report.warnings[0].contains("List Bullet"));
    }

    #[test]
    fn test_consecutive_tables_are_separated() {
        let tree = doc([
            table(1, [vec![entry([para("a")])]]),
            table(1, [vec![entry([para("b")])]]),
        ]);

        let (model, _) = translate(&tree);

        let kinds: Vec<_> = model
            .blocks
            .iter()
            .map(|b| if b.as_table().is_some() { "table" } else { "paragraph" })
            .collect();
        assert_eq!(
            kinds,
            vec!["paragraph", "table", "paragraph", "table", "paragraph"]
        );
        assert_eq!(
            model.blocks[1].as_table().unwrap().style.as_deref(),
            Some(DEFAULT_TABLE_STYLE)
        );
    }

    #[test]
    fn test_cells_reuse_first_paragraph() {
        let tree = doc([table(2, [vec![entry([para("x")]), entry([para("y"), para("z")])]])]);

        let (model, report) = translate(&tree);

        let row = &model.blocks[1].as_table().unwrap().rows[0];
        let first: Vec<_> = row[0].paragraphs().collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text(), "x");
        assert_eq!(first[0].alignment, Some(Alignment::Left));
        assert_eq!(first[0].left_indent, Some(Length::new(0)));
        assert_eq!(row[1].text(), "y\nz");
        assert_eq!(report.scopes, ScopeCounts { enters: 2, exits: 2 });
    }

    #[test]
    fn test_list_in_cell_reuses_paragraph() {
        let tree = doc([table(
            1,
            [vec![entry([el(
                NodeKind::BulletList,
                [el(NodeKind::ListItem, [para("item")])],
            )])]],
        )]);

        let (model, _) = translate(&tree);

        let cell = &model.blocks[1].as_table().unwrap().rows[0][0];
        let paragraphs: Vec<_> = cell.paragraphs().collect();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].style.as_deref(), Some("List Bullet"));
        assert_eq!(paragraphs[0].text(), "item");
    }

    #[test]
    fn test_column_span_merges_cells() {
        let wide = entry([para("wide")]).with_attr("morecols", 1_i64);
        let tree = doc([table(
            3,
            [
                vec![wide, entry([para("c")])],
                vec![entry([para("1")]), entry([para("2")]), entry([para("3")])],
            ],
        )]);

        let (model, report) = translate(&tree);

        let table = model.blocks[1].as_table().unwrap();
        let spans: Vec<Vec<_>> = table
            .rows
            .iter()
            .map(|row| row.iter().map(|c| (c.span, c.text())).collect())
            .collect();
        assert_eq!(
            spans,
            vec![
                vec![(2, "wide".to_owned()), (1, "c".to_owned())],
                vec![(1, "1".to_owned()), (1, "2".to_owned()), (1, "3".to_owned())],
            ]
        );
        assert_eq!(report.scopes, ScopeCounts { enters: 5, exits: 5 });
    }

    #[test]
    fn test_morecols_from_xml_string() {
        let wide = entry([para("wide")]).with_attr("morecols", "2");
        let (model, _) = translate(&doc([table(3, [vec![wide]])]));
        assert_eq!(model.blocks[1].as_table().unwrap().rows[0][0].span, 3);
    }

    #[test]
    fn test_row_span_is_unsupported() {
        let tall = entry([para("tall")]).with_attr("morerows", 1_i64);
        let err = translate_err(&doc([table(1, [vec![tall]])]));
        assert!(matches!(err, TranslateError::UnsupportedStructure(_)));
    }

    #[test]
    fn test_entry_beyond_row_is_invalid() {
        let tree = doc([table(1, [vec![entry([para("a")]), entry([para("b")])]])]);
        assert!(matches!(translate_err(&tree), TranslateError::InvalidStructure(_)));

        let wide = entry([para("a")]).with_attr("morecols", 1_i64);
        assert!(matches!(
            translate_err(&doc([table(1, [vec![wide]])])),
            TranslateError::InvalidStructure(_)
        ));
    }

    #[test]
    fn test_huge_morecols_is_invalid() {
        let huge = entry([para("b")]).with_attr("morecols", "18446744073709551615");
        let tree = doc([table(2, [vec![entry([para("a")]), huge]])]);
        assert!(matches!(translate_err(&tree), TranslateError::InvalidStructure(_)));
    }

    #[test]
    fn test_table_parts_outside_table_are_invalid() {
        let loose_entry = doc([entry([para("a")])]);
        assert!(matches!(translate_err(&loose_entry), TranslateError::InvalidStructure(_)));

        let loose_row = doc([el(NodeKind::Row, [])]);
        assert!(matches!(translate_err(&loose_row), TranslateError::InvalidStructure(_)));

        let loose_colspec = doc([Node::new(NodeKind::Colspec)]);
        assert!(matches!(
            translate_err(&loose_colspec),
            TranslateError::InvalidStructure(_)
        ));
    }

    #[test]
    fn test_missing_table_style_warns() {
        let comment = el(NodeKind::Comment, [Node::text("DocxTableStyle NoSuchStyle")]);
        let tree = doc([
            comment,
            table(1, [vec![entry([])]]),
            table(1, [vec![entry([])]]),
        ]);

        let (model, report) = translate(&tree);

        assert_eq!(model.blocks[1].as_table().unwrap().style, None);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("NoSuchStyle"));
        // The default style is back for the next table
        assert_eq!(
            model.blocks[3].as_table().unwrap().style.as_deref(),
            Some(DEFAULT_TABLE_STYLE)
        );
    }

    #[test]
    fn test_table_style_directive() {
        let tree = doc([
            el(NodeKind::Comment, [Node::text("DocxTableStyle Light Grid Accent 1")]),
            table(1, [vec![entry([])]]),
        ]);

        let (model, _) = translate(&tree);

        assert_eq!(
            model.blocks[1].as_table().unwrap().style.as_deref(),
            Some("Light Grid Accent 1")
        );
    }

    #[test]
    fn test_malformed_directive_keeps_style() {
        let tree = doc([
            el(NodeKind::Comment, [Node::text("DocxTableStyle")]),
            table(1, [vec![entry([])]]),
        ]);

        let (model, report) = translate(&tree);

        assert_eq!(
            model.blocks[1].as_table().unwrap().style.as_deref(),
            Some(DEFAULT_TABLE_STYLE)
        );
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_configured_default_table_style() {
        let options = TranslatorOptions::default().with_table_style("Table Grid");
        let (model, _) = translate_with(&doc([table(1, [vec![entry([])]])]), options);
        assert_eq!(
            model.blocks[1].as_table().unwrap().style.as_deref(),
            Some("Table Grid")
        );
    }

    #[test]
    fn test_nested_table_is_unstyled() {
        let inner = table(1, [vec![entry([para("inner")])]]);
        let tree = doc([table(1, [vec![entry([inner])]])]);

        let (model, report) = translate(&tree);

        let outer = model.blocks[1].as_table().unwrap();
        assert_eq!(outer.style.as_deref(), Some(DEFAULT_TABLE_STYLE));
        let cell = &outer.rows[0][0];
        let inner = cell.blocks.iter().find_map(Block::as_table).unwrap();
        assert_eq!(inner.style, None);
        assert_eq!(inner.rows[0][0].text(), "inner");
        assert!(report.warnings.is_empty());
        assert_eq!(report.scopes, ScopeCounts { enters: 2, exits: 2 });
    }

    #[test]
    fn test_column_widths() {
        let spec = Node::new(NodeKind::TabularColSpec).with_attr("spec", "|p{3cm}|p{5cm}|");
        let tree = doc([
            spec,
            table(2, [vec![entry([]), entry([])]]),
            table(2, [vec![entry([]), entry([])]]),
        ]);

        let (model, _) = translate(&tree);

        assert_eq!(
            model.blocks[1].as_table().unwrap().columns,
            vec![Some(Length::from_cm(3.0)), Some(Length::from_cm(5.0))]
        );
        // Without a spec the body width is shared equally
        assert_eq!(
            model.blocks[3].as_table().unwrap().columns,
            vec![Some(Length::from_inches(3.0)), Some(Length::from_inches(3.0))]
        );
    }

    #[test]
    fn test_bad_column_width_spec_is_ignored() {
        let spec = Node::new(NodeKind::TabularColSpec).with_attr("spec", "|p{wide}|");
        let (model, report) = translate(&doc([spec, table(1, [vec![entry([])]])]));

        assert_eq!(
            model.blocks[1].as_table().unwrap().columns,
            vec![Some(Length::from_inches(6.0))]
        );
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_figure_numbering_per_scope() {
        let figure = |text: &str| el(NodeKind::Figure, [caption(text)]);
        let tree = doc([
            figure("A"),
            table(1, [vec![entry([figure("B"), figure("C")])]]),
            figure("D"),
        ]);

        let (model, _) = translate(&tree);

        assert_eq!(captions(&model.blocks), vec!["Figure 1: A", "Figure 2: D"]);
        let cell = &model.blocks[3].as_table().unwrap().rows[0][0];
        assert_eq!(captions(&cell.blocks), vec!["Figure 1: B", "Figure 2: C"]);

        let field = paragraph(&model.blocks[1]).runs[1].content[0].clone();
        assert_eq!(
            field,
            Inline::Field {
                instruction: FIGURE_FIELD.to_owned(),
                result: "1".to_owned(),
            }
        );
    }

    #[test]
    fn test_centered_figure_with_image() {
        let image = Node::new(NodeKind::Image)
            .with_attr("uri", "img/a.png")
            .with_attr("width", "2in");
        let tree = doc([
            el(NodeKind::Figure, [image, caption("Cap")]).with_attr("align", "center"),
            para("after"),
        ]);
        let options = TranslatorOptions::default().with_source_dir("/docs");

        let (model, _) = translate_with(&tree, options);

        let picture_paragraph = paragraph(&model.blocks[1]);
        assert_eq!(picture_paragraph.alignment, Some(Alignment::Center));
        let pictures: Vec<_> = picture_paragraph.pictures().collect();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].path, Path::new("/docs/img/a.png"));
        assert_eq!(pictures[0].size.width, Some(Length::from_inches(2.0)));
        assert_eq!(pictures[0].size.height, None);

        let caption = paragraph(&model.blocks[2]);
        assert_eq!(caption.text(), "Figure 1: Cap");
        assert_eq!(caption.alignment, Some(Alignment::Center));

        let after = paragraph(&model.blocks[4]);
        assert_eq!(after.text(), "after");
        assert_eq!(after.alignment, None);
    }

    #[test]
    fn test_image_outside_figure() {
        let image = Node::new(NodeKind::Image)
            .with_attr("uri", "logo.png")
            .with_attr("width", "50%")
            .with_attr("height", "3cm");

        let (model, report) = translate(&doc([image]));

        let pictures: Vec<_> = paragraph(&model.blocks[1]).pictures().collect();
        assert_eq!(pictures[0].path, Path::new("./logo.png"));
        assert_eq!(pictures[0].size.width, None);
        assert_eq!(pictures[0].size.height, Some(Length::from_cm(3.0)));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("50%"));
    }

    #[test]
    fn test_caption_outside_figure() {
        let (model, _) = translate(&doc([caption("Loose")]));

        let caption = paragraph(&model.blocks[1]);
        assert_eq!(caption.style.as_deref(), Some(CAPTION_STYLE));
        assert_eq!(caption.text(), "Loose");
    }

    #[test]
    fn test_unknown_and_unsupported_nodes_are_skipped() {
        let tree = doc([
            el(NodeKind::from_tag("mermaid"), [Node::text("graph")]),
            el(NodeKind::Note, [para("hidden")]),
            el(NodeKind::BlockQuote, [para("shown")]),
        ]);

        let (model, report) = translate(&tree);

        let texts: Vec<_> = model.blocks.iter().map(|b| paragraph(b).text()).collect();
        assert_eq!(texts, vec!["", "shown"]);
        let skipped: Vec<_> = report.skipped.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(skipped, vec!["mermaid", "note"]);
    }

    #[test]
    fn test_messages_and_footnotes_produce_no_text() {
        let tree = doc([
            para("body"),
            el(NodeKind::SystemMessage, [para("Unknown directive type \"foo\".")]),
            el(
                NodeKind::Footnote,
                [el(NodeKind::Label, [Node::text("1")]), para("footnote body")],
            ),
            el(
                NodeKind::Paragraph,
                [
                    Node::text("x"),
                    el(NodeKind::FootnoteReference, [Node::text("[1]")]),
                ],
            ),
        ]);

        let (model, report) = translate(&tree);

        let texts: Vec<_> = model.blocks.iter().map(|b| paragraph(b).text()).collect();
        assert_eq!(texts, vec!["", "body", "x"]);
        let skipped: Vec<_> = report.skipped.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(skipped, vec!["system_message", "footnote", "footnote_reference"]);
    }

    #[test]
    fn test_text_before_any_block_uses_initial_paragraph() {
        let (model, _) = translate(&doc([Node::text("loose")]));
        assert_eq!(model.blocks.len(), 1);
        assert_eq!(paragraph(&model.blocks[0]).text(), "loose");
    }
}
