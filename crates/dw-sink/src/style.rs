//! Style catalog of the destination template.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::length::Length;

/// Category a named style belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    /// Paragraph style.
    Paragraph,
    /// Table style.
    Table,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph => f.write_str("paragraph"),
            Self::Table => f.write_str("table"),
        }
    }
}

/// Paragraph styles of the default Word template.
const DEFAULT_PARAGRAPH_STYLES: &[&str] = &[
    "Normal",
    "Header",
    "Footer",
    "Title",
    "Subtitle",
    "Heading 1",
    "Heading 2",
    "Heading 3",
    "Heading 4",
    "Heading 5",
    "Heading 6",
    "Heading 7",
    "Heading 8",
    "Heading 9",
    "No Spacing",
    "Body Text",
    "Body Text 2",
    "Body Text 3",
    "List",
    "List 2",
    "List 3",
    "List Paragraph",
    "List Bullet",
    "List Bullet 2",
    "List Bullet 3",
    "List Number",
    "List Number 2",
    "List Number 3",
    "List Continue",
    "List Continue 2",
    "List Continue 3",
    "Quote",
    "Intense Quote",
    "Caption",
    "TOC Heading",
    "macro",
];

/// Table style applied when nothing else is configured.
pub const DEFAULT_TABLE_STYLE: &str = "Medium Grid 1 Accent 1";

/// Table styles of the default Word template.
const DEFAULT_TABLE_STYLES: &[&str] = &[
    "Normal Table",
    "Table Grid",
    "Light Shading",
    "Light Shading Accent 1",
    "Light List",
    "Light List Accent 1",
    "Light Grid",
    "Light Grid Accent 1",
    "Medium Shading 1",
    "Medium Shading 1 Accent 1",
    "Medium Shading 2",
    "Medium Shading 2 Accent 1",
    "Medium List 1",
    "Medium List 1 Accent 1",
    "Medium List 2",
    "Medium Grid 1",
    DEFAULT_TABLE_STYLE,
    "Medium Grid 2",
    "Medium Grid 3",
    "Dark List",
    "Colorful Shading",
    "Colorful List",
    "Colorful Grid",
];

/// Deepest heading level a template can define.
pub const MAX_HEADING_LEVEL: usize = 9;

/// Named styles and page geometry of the destination template.
///
/// A template file lists every style it defines; there is no merging with
/// the built-in catalog.
///
/// ```yaml
/// body_width: 6in
/// paragraph_styles: [Normal, Heading 1, Caption, List Bullet]
/// table_styles: [Table Grid]
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    paragraph_styles: BTreeSet<String>,
    table_styles: BTreeSet<String>,
    body_width: Length,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            paragraph_styles: DEFAULT_PARAGRAPH_STYLES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            table_styles: DEFAULT_TABLE_STYLES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            // Letter page (8.5in) minus 1.25in margins on each side.
            body_width: Length::from_inches(6.0),
        }
    }
}

/// Template file shape.
#[derive(Debug, Deserialize)]
struct TemplateRaw {
    body_width: Option<String>,
    #[serde(default)]
    paragraph_styles: Vec<String>,
    #[serde(default)]
    table_styles: Vec<String>,
}

impl Template {
    /// Empty catalog with the given usable body width.
    #[must_use]
    pub fn empty(body_width: Length) -> Self {
        Self {
            paragraph_styles: BTreeSet::new(),
            table_styles: BTreeSet::new(),
            body_width,
        }
    }

    /// Add a style to the catalog.
    #[must_use]
    pub fn with_style(mut self, name: impl Into<String>, kind: StyleKind) -> Self {
        self.styles_mut(kind).insert(name.into());
        self
    }

    /// Parse a YAML template description.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or `body_width` is not a length.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SinkError> {
        let raw: TemplateRaw = serde_yaml::from_str(yaml)?;
        let body_width = match raw.body_width {
            Some(width) => width.parse()?,
            None => Self::default().body_width,
        };
        Ok(Self {
            paragraph_styles: raw.paragraph_styles.into_iter().collect(),
            table_styles: raw.table_styles.into_iter().collect(),
            body_width,
        })
    }

    /// Load a YAML template description from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SinkError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Usable width between the page margins.
    #[must_use]
    pub fn body_width(&self) -> Length {
        self.body_width
    }

    /// Whether a style of the given kind is defined.
    #[must_use]
    pub fn contains(&self, name: &str, kind: StyleKind) -> bool {
        self.styles(kind).contains(name)
    }

    /// Look up a style.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::StyleNotFound`] if the style is not defined.
    pub fn check(&self, name: &str, kind: StyleKind) -> Result<(), SinkError> {
        if self.contains(name, kind) {
            Ok(())
        } else {
            Err(SinkError::StyleNotFound {
                name: name.to_owned(),
                kind,
            })
        }
    }

    /// Style used for a heading at `level`.
    ///
    /// Level 0 is the document title. Levels deeper than the deepest defined
    /// heading style reuse the deepest one.
    #[must_use]
    pub fn heading_style(&self, level: usize) -> Option<String> {
        if level == 0 {
            return self
                .contains("Title", StyleKind::Paragraph)
                .then(|| "Title".to_owned());
        }
        (1..=level.min(MAX_HEADING_LEVEL))
            .rev()
            .map(|n| format!("Heading {n}"))
            .find(|name| self.contains(name, StyleKind::Paragraph))
    }

    /// Style names of a kind, sorted.
    pub fn styles(&self, kind: StyleKind) -> &BTreeSet<String> {
        match kind {
            StyleKind::Paragraph => &self.paragraph_styles,
            StyleKind::Table => &self.table_styles,
        }
    }

    fn styles_mut(&mut self, kind: StyleKind) -> &mut BTreeSet<String> {
        match kind {
            StyleKind::Paragraph => &mut self.paragraph_styles,
            StyleKind::Table => &mut self.table_styles,
        }
    }
}
