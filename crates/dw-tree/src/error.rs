//! Tree loading errors.

/// Error while loading a serialized document tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// I/O error reading the tree file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON tree could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML tree could not be parsed.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute could not be parsed.
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Text could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Input contained no root element.
    #[error("document tree has no root element")]
    Empty,

    /// Format could not be determined or is not supported.
    #[error("unsupported tree format: {0}")]
    UnsupportedFormat(String),
}
