//! Document tree model for the DW docx writer.
//!
//! The tree is produced upstream by a documentation toolchain (docutils or
//! Sphinx) and handed to the writer fully built. This crate provides:
//!
//! - [`Node`] and [`NodeKind`]: the immutable tree and its closed set of kinds
//! - Loaders for serialized trees: JSON ([`from_json_str`]) and docutils XML
//!   ([`from_xml_str`]), with [`load`] picking the format from the file name
//!
//! # Example
//!
//! ```
//! use dw_tree::{Node, NodeKind};
//!
//! let tree = Node::new(NodeKind::Document).with_child(
//!     Node::new(NodeKind::Paragraph).with_child(Node::text("Hello")),
//! );
//! assert_eq!(tree.astext(), "Hello");
//! ```

mod error;
mod kind;
mod node;
mod xml;

use std::path::Path;
use std::str::FromStr;

pub use error::TreeError;
pub use kind::{NodeKind, TEXT_TAG};
pub use node::{AttrValue, Node};
pub use xml::from_xml_str;

/// Serialized tree format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeFormat {
    /// JSON `{"tag", "attributes", "children", "text"}` nodes.
    Json,
    /// Docutils XML.
    Xml,
}

impl TreeFormat {
    /// Guess the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for TreeFormat {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(TreeError::UnsupportedFormat(other.to_owned())),
        }
    }
}

/// Parse a JSON document tree.
///
/// # Errors
///
/// Returns an error if the input is not a valid JSON node.
pub fn from_json_str(json: &str) -> Result<Node, TreeError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a document tree from a file.
///
/// When `format` is `None` it is derived from the file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the format is unknown, or
/// parsing fails.
pub fn load(path: &Path, format: Option<TreeFormat>) -> Result<Node, TreeError> {
    let format = format
        .or_else(|| TreeFormat::from_path(path))
        .ok_or_else(|| TreeError::UnsupportedFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path)?;
    match format {
        TreeFormat::Json => from_json_str(&content),
        TreeFormat::Xml => from_xml_str(&content),
    }
}
