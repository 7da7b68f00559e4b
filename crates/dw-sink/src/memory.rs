//! Retained in-memory document.
//!
//! Provides [`MemoryDocument`], the bundled [`DocumentSink`]. It keeps the
//! document as arenas indexed by handles and persists a nested
//! [`DocumentModel`] as JSON.

use std::path::Path;

use crate::error::SinkError;
use crate::handle::{CellId, Location, ParagraphId, PictureTarget, RowId, RunId, TableId};
use crate::length::Length;
use crate::model::{
    Block, CellModel, DocumentModel, Inline, ParagraphModel, PictureModel, RunModel, TableModel,
};
use crate::sink::{Alignment, DocumentSink, PictureSize, RunFormat};
use crate::style::{StyleKind, Template};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockRef {
    Paragraph(ParagraphId),
    Table(TableId),
}

#[derive(Debug, Default)]
struct ParagraphData {
    style: Option<String>,
    alignment: Option<Alignment>,
    left_indent: Option<Length>,
    runs: Vec<RunId>,
}

#[derive(Debug)]
struct RunData {
    format: RunFormat,
    content: Vec<Inline>,
}

#[derive(Debug, Default)]
struct TableData {
    style: Option<String>,
    columns: Vec<Option<Length>>,
    rows: Vec<RowId>,
}

#[derive(Debug)]
struct RowData {
    cells: Vec<CellId>,
}

#[derive(Debug, Default)]
struct CellData {
    blocks: Vec<BlockRef>,
}

/// Document statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Paragraphs anywhere in the document.
    pub paragraphs: usize,
    /// Tables anywhere in the document.
    pub tables: usize,
    /// Pictures anywhere in the document.
    pub pictures: usize,
}

/// In-memory [`DocumentSink`] backed by a [`Template`].
///
/// # Example
///
/// ```
/// use dw_sink::{DocumentSink, Location, MemoryDocument, RunFormat};
///
/// let mut doc = MemoryDocument::new();
/// let p = doc.add_paragraph(Location::Body, None).unwrap();
/// doc.add_run(p, "Hello", RunFormat::PLAIN).unwrap();
/// assert_eq!(doc.snapshot().blocks.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryDocument {
    template: Template,
    body: Vec<BlockRef>,
    paragraphs: Vec<ParagraphData>,
    runs: Vec<RunData>,
    tables: Vec<TableData>,
    rows: Vec<RowData>,
    cells: Vec<CellData>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::with_template(Template::default())
    }
}

impl MemoryDocument {
    /// Create an empty document using the default template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document using `template`'s styles and geometry.
    #[must_use]
    pub fn with_template(template: Template) -> Self {
        Self {
            template,
            body: Vec::new(),
            paragraphs: Vec::new(),
            runs: Vec::new(),
            tables: Vec::new(),
            rows: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Template the document was created with.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Element counts.
    #[must_use]
    pub fn stats(&self) -> DocumentStats {
        let pictures = self
            .runs
            .iter()
            .flat_map(|run| run.content.iter())
            .filter(|inline| matches!(inline, Inline::Picture(_)))
            .count();
        DocumentStats {
            paragraphs: self.paragraphs.len(),
            tables: self.tables.len(),
            pictures,
        }
    }

    /// Nested view of the whole document.
    #[must_use]
    pub fn snapshot(&self) -> DocumentModel {
        DocumentModel {
            blocks: self.blocks_model(&self.body),
        }
    }

    fn blocks_model(&self, blocks: &[BlockRef]) -> Vec<Block> {
        blocks
            .iter()
            .map(|block| match *block {
                BlockRef::Paragraph(id) => Block::Paragraph(self.paragraph_model(id)),
                BlockRef::Table(id) => Block::Table(self.table_model(id)),
            })
            .collect()
    }

    fn paragraph_model(&self, id: ParagraphId) -> ParagraphModel {
        let data = &self.paragraphs[id.0];
        ParagraphModel {
            style: data.style.clone(),
            alignment: data.alignment,
            left_indent: data.left_indent,
            runs: data
                .runs
                .iter()
                .map(|run| {
                    let run = &self.runs[run.0];
                    RunModel {
                        bold: run.format.bold,
                        italic: run.format.italic,
                        content: run.content.clone(),
                    }
                })
                .collect(),
        }
    }

    fn table_model(&self, id: TableId) -> TableModel {
        let data = &self.tables[id.0];
        let rows = data
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<CellModel> = Vec::new();
                let mut previous: Option<CellId> = None;
                for &cell in &self.rows[row.0].cells {
                    if previous == Some(cell) {
                        if let Some(last) = cells.last_mut() {
                            last.span += 1;
                        }
                        continue;
                    }
                    previous = Some(cell);
                    cells.push(CellModel {
                        span: 1,
                        blocks: self.blocks_model(&self.cells[cell.0].blocks),
                    });
                }
                cells
            })
            .collect();
        TableModel {
            style: data.style.clone(),
            columns: data.columns.clone(),
            rows,
        }
    }

    fn check_optional_style(&self, style: Option<&str>, kind: StyleKind) -> Result<(), SinkError> {
        style.map_or(Ok(()), |name| self.template.check(name, kind))
    }

    fn container_mut(&mut self, location: Location) -> Result<&mut Vec<BlockRef>, SinkError> {
        match location {
            Location::Body => Ok(&mut self.body),
            Location::Cell(cell) => self
                .cells
                .get_mut(cell.0)
                .map(|data| &mut data.blocks)
                .ok_or(invalid("cell", cell.0)),
        }
    }

    fn paragraph_mut(&mut self, id: ParagraphId) -> Result<&mut ParagraphData, SinkError> {
        self.paragraphs.get_mut(id.0).ok_or(invalid("paragraph", id.0))
    }

    fn table_mut(&mut self, id: TableId) -> Result<&mut TableData, SinkError> {
        self.tables.get_mut(id.0).ok_or(invalid("table", id.0))
    }

    fn push_paragraph(
        &mut self,
        location: Location,
        style: Option<String>,
    ) -> Result<ParagraphId, SinkError> {
        let id = ParagraphId(self.paragraphs.len());
        self.container_mut(location)?.push(BlockRef::Paragraph(id));
        self.paragraphs.push(ParagraphData {
            style,
            ..ParagraphData::default()
        });
        Ok(id)
    }

    fn push_run(
        &mut self,
        paragraph: ParagraphId,
        format: RunFormat,
        content: Vec<Inline>,
    ) -> Result<RunId, SinkError> {
        let id = RunId(self.runs.len());
        self.paragraph_mut(paragraph)?.runs.push(id);
        self.runs.push(RunData { format, content });
        Ok(id)
    }

    /// New cell holding one empty paragraph.
    fn new_cell(&mut self) -> CellId {
        let cell = CellId(self.cells.len());
        let paragraph = ParagraphId(self.paragraphs.len());
        self.paragraphs.push(ParagraphData::default());
        self.cells.push(CellData {
            blocks: vec![BlockRef::Paragraph(paragraph)],
        });
        cell
    }

    fn cell_is_blank(&self, cell: CellId) -> bool {
        self.cells[cell.0].blocks.iter().all(|block| match *block {
            BlockRef::Paragraph(p) => self.paragraph_is_blank(p),
            BlockRef::Table(_) => false,
        })
    }

    fn paragraph_is_blank(&self, id: ParagraphId) -> bool {
        self.paragraphs[id.0]
            .runs
            .iter()
            .all(|run| self.runs[run.0].content.iter().all(inline_is_blank))
    }
}

fn inline_is_blank(inline: &Inline) -> bool {
    match inline {
        Inline::Text(text) => text.is_empty(),
        Inline::Field { .. } | Inline::Picture(_) => false,
    }
}

fn invalid(kind: &'static str, index: usize) -> SinkError {
    SinkError::InvalidHandle { kind, index }
}

impl DocumentSink for MemoryDocument {
    fn check_style(&self, name: &str, kind: StyleKind) -> Result<(), SinkError> {
        self.template.check(name, kind)
    }

    fn body_width(&self) -> Length {
        self.template.body_width()
    }

    fn add_paragraph(
        &mut self,
        location: Location,
        style: Option<&str>,
    ) -> Result<ParagraphId, SinkError> {
        self.check_optional_style(style, StyleKind::Paragraph)?;
        self.push_paragraph(location, style.map(str::to_owned))
    }

    fn add_heading(&mut self, location: Location, level: usize) -> Result<ParagraphId, SinkError> {
        let style = self.template.heading_style(level);
        if style.is_none() {
            tracing::warn!(level, "no heading style defined for level, using no style");
        }
        self.push_paragraph(location, style)
    }

    fn set_paragraph_style(
        &mut self,
        paragraph: ParagraphId,
        style: Option<&str>,
    ) -> Result<(), SinkError> {
        self.check_optional_style(style, StyleKind::Paragraph)?;
        self.paragraph_mut(paragraph)?.style = style.map(str::to_owned);
        Ok(())
    }

    fn set_alignment(
        &mut self,
        paragraph: ParagraphId,
        alignment: Alignment,
    ) -> Result<(), SinkError> {
        self.paragraph_mut(paragraph)?.alignment = Some(alignment);
        Ok(())
    }

    fn set_left_indent(&mut self, paragraph: ParagraphId, indent: Length) -> Result<(), SinkError> {
        self.paragraph_mut(paragraph)?.left_indent = Some(indent);
        Ok(())
    }

    fn paragraph_is_empty(&self, paragraph: ParagraphId) -> Result<bool, SinkError> {
        let data = self
            .paragraphs
            .get(paragraph.0)
            .ok_or(invalid("paragraph", paragraph.0))?;
        Ok(data.runs.iter().all(|run| {
            self.runs[run.0].content.iter().all(|inline| match inline {
                Inline::Text(text) => text.is_empty(),
                Inline::Field { result, .. } => result.is_empty(),
                Inline::Picture(_) => false,
            })
        }))
    }

    fn add_run(
        &mut self,
        paragraph: ParagraphId,
        text: &str,
        format: RunFormat,
    ) -> Result<RunId, SinkError> {
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Inline::Text(text.to_owned())]
        };
        self.push_run(paragraph, format, content)
    }

    fn add_field(
        &mut self,
        paragraph: ParagraphId,
        instruction: &str,
        result: &str,
    ) -> Result<(), SinkError> {
        let field = Inline::Field {
            instruction: instruction.to_owned(),
            result: result.to_owned(),
        };
        self.push_run(paragraph, RunFormat::PLAIN, vec![field])?;
        Ok(())
    }

    fn add_table(&mut self, location: Location, style: Option<&str>) -> Result<TableId, SinkError> {
        self.check_optional_style(style, StyleKind::Table)?;
        let id = TableId(self.tables.len());
        self.container_mut(location)?.push(BlockRef::Table(id));
        self.tables.push(TableData {
            style: style.map(str::to_owned),
            ..TableData::default()
        });
        Ok(id)
    }

    fn add_column(&mut self, table: TableId, width: Option<Length>) -> Result<(), SinkError> {
        let rows = self.table_mut(table)?.rows.clone();
        for row in rows {
            let cell = self.new_cell();
            self.rows[row.0].cells.push(cell);
        }
        self.table_mut(table)?.columns.push(width);
        Ok(())
    }

    fn add_row(&mut self, table: TableId) -> Result<RowId, SinkError> {
        let columns = self.table_mut(table)?.columns.len();
        let cells = (0..columns).map(|_| self.new_cell()).collect();
        let row = RowId(self.rows.len());
        self.rows.push(RowData { cells });
        self.tables[table.0].rows.push(row);
        Ok(row)
    }

    fn row_cells(&self, row: RowId) -> Result<Vec<CellId>, SinkError> {
        self.rows
            .get(row.0)
            .map(|data| data.cells.clone())
            .ok_or(invalid("row", row.0))
    }

    fn cell_paragraphs(&self, cell: CellId) -> Result<Vec<ParagraphId>, SinkError> {
        let data = self.cells.get(cell.0).ok_or(invalid("cell", cell.0))?;
        Ok(data
            .blocks
            .iter()
            .filter_map(|block| match *block {
                BlockRef::Paragraph(p) => Some(p),
                BlockRef::Table(_) => None,
            })
            .collect())
    }

    fn merge_cells(&mut self, row: RowId, first: usize, last: usize) -> Result<CellId, SinkError> {
        let cells = self.row_cells(row)?;
        if first > last || last >= cells.len() {
            return Err(SinkError::CellRange {
                first,
                last,
                len: cells.len(),
            });
        }

        let target = cells[first];
        let mut previous = target;
        for &other in &cells[first + 1..=last] {
            if other == target || other == previous {
                continue;
            }
            previous = other;
            // Blank merged cells contribute nothing; real content moves over.
            if !self.cell_is_blank(other) {
                let moved = std::mem::take(&mut self.cells[other.0].blocks);
                self.cells[target.0].blocks.extend(moved);
            }
        }
        for position in &mut self.rows[row.0].cells[first..=last] {
            *position = target;
        }
        Ok(target)
    }

    fn add_picture(
        &mut self,
        target: PictureTarget,
        path: &Path,
        size: PictureSize,
    ) -> Result<(), SinkError> {
        let picture = Inline::Picture(PictureModel {
            path: path.to_path_buf(),
            size,
        });
        match target {
            PictureTarget::Location(location) => {
                let paragraph = self.push_paragraph(location, None)?;
                self.push_run(paragraph, RunFormat::PLAIN, vec![picture])?;
            }
            PictureTarget::Run(run) => {
                self.runs
                    .get_mut(run.0)
                    .ok_or(invalid("run", run.0))?
                    .content
                    .push(picture);
            }
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<(), SinkError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Saved document");
        Ok(())
    }
}
