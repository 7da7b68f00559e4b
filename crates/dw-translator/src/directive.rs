//! In-document directives: table style comments and column width specs.

use std::sync::LazyLock;

use dw_sink::Length;
use regex::Regex;

/// Marker that turns a comment into a table style directive.
pub const TABLE_STYLE_MARKER: &str = "DocxTableStyle";

/// Leading `<number>cm` of a column width segment.
static CM_WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*cm").expect("invalid column width regex")
});

/// Directive that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// Table style marker without a style name.
    #[error("table style directive has no style name")]
    EmptyTableStyle,

    /// Column width spec segment without a `<number>cm` width.
    #[error("invalid column width {segment:?} in {spec:?}")]
    ColumnWidth {
        /// Full spec.
        spec: String,
        /// Offending segment.
        segment: String,
    },

    /// Column width spec without any `{` segment.
    #[error("column width spec {0:?} declares no widths")]
    NoColumnWidths(String),
}

/// Style name requested by a comment, if the comment is a directive.
///
/// The name is the trimmed text after the last marker.
pub fn table_style(comment: &str) -> Option<Result<&str, DirectiveError>> {
    let (_, name) = comment.rsplit_once(TABLE_STYLE_MARKER)?;
    let name = name.trim();
    Some(if name.is_empty() {
        Err(DirectiveError::EmptyTableStyle)
    } else {
        Ok(name)
    })
}

/// Explicit column widths from a spec like `|p{3cm}|p{5.5cm}|`.
///
/// Every `{` opens one column whose width must start with `<number>cm`.
pub fn column_widths(spec: &str) -> Result<Vec<Length>, DirectiveError> {
    let mut segments = spec.split('{');
    segments.next();
    let widths = segments
        .map(|segment| {
            CM_WIDTH
                .captures(segment)
                .and_then(|caps| caps[1].parse::<f64>().ok())
                .map(Length::from_cm)
                .ok_or_else(|| DirectiveError::ColumnWidth {
                    spec: spec.to_owned(),
                    segment: segment.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if widths.is_empty() {
        return Err(DirectiveError::NoColumnWidths(spec.to_owned()));
    }
    Ok(widths)
}
