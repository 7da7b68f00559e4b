//! Closed set of doctree node kinds.

/// Tag used for text nodes in serialized trees.
pub const TEXT_TAG: &str = "#text";

macro_rules! node_kinds {
    ($($variant:ident => $tag:literal,)*) => {
        /// Kind tag of a [`Node`](crate::Node).
        ///
        /// Recognized kinds map one-to-one to docutils/Sphinx element names.
        /// Anything else is kept as [`NodeKind::Other`] so the traversal can
        /// report and skip it.
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $(
                #[doc = concat!("`", $tag, "`")]
                $variant,
            )*
            /// Character data.
            Text,
            /// Element name not in the recognized set.
            Other(String),
        }

        impl NodeKind {
            /// Map an element name to its kind.
            #[must_use]
            pub fn from_tag(tag: &str) -> Self {
                match tag {
                    $($tag => Self::$variant,)*
                    TEXT_TAG => Self::Text,
                    other => Self::Other(other.to_owned()),
                }
            }

            /// Element name of this kind.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $tag,)*
                    Self::Text => TEXT_TAG,
                    Self::Other(tag) => tag,
                }
            }
        }
    };
}

node_kinds! {
    Document => "document",
    StartOfFile => "start_of_file",
    Section => "section",
    Title => "title",
    Subtitle => "subtitle",
    Paragraph => "paragraph",
    Strong => "strong",
    Emphasis => "emphasis",
    BulletList => "bullet_list",
    EnumeratedList => "enumerated_list",
    ListItem => "list_item",
    Table => "table",
    Tgroup => "tgroup",
    Colspec => "colspec",
    Thead => "thead",
    Tbody => "tbody",
    Row => "row",
    Entry => "entry",
    Figure => "figure",
    Caption => "caption",
    Legend => "legend",
    Image => "image",
    LiteralBlock => "literal_block",
    Comment => "comment",
    TabularColSpec => "tabular_col_spec",
    Compound => "compound",
    Container => "container",
    BlockQuote => "block_quote",
    Reference => "reference",
    PendingXref => "pending_xref",
    DownloadReference => "download_reference",
    Inline => "inline",
    Literal => "literal",
    LiteralEmphasis => "literal_emphasis",
    TitleReference => "title_reference",
    Abbreviation => "abbreviation",
    Subscript => "subscript",
    Superscript => "superscript",
    Footnote => "footnote",
    Citation => "citation",
    Label => "label",
    FootnoteReference => "footnote_reference",
    CitationReference => "citation_reference",
    Generated => "generated",
    CompactParagraph => "compact_paragraph",
    Line => "line",
    Glossary => "glossary",
    Desc => "desc",
    DescName => "desc_name",
    DescAddname => "desc_addname",
    DescType => "desc_type",
    DescAnnotation => "desc_annotation",
    Refcount => "refcount",
    Seealso => "seealso",
    OptionList => "option_list",
    OptionListItem => "option_list_item",
    OptionGroup => "option_group",
    CommandOption => "option",
    OptionString => "option_string",
    OptionArgument => "option_argument",
    Description => "description",
    DefinitionList => "definition_list",
    DefinitionListItem => "definition_list_item",
    Term => "term",
    Classifier => "classifier",
    Definition => "definition",
    FieldList => "field_list",
    Field => "field",
    FieldName => "field_name",
    FieldBody => "field_body",
    Centered => "centered",
    Hlist => "hlist",
    Hlistcol => "hlistcol",
    Productionlist => "productionlist",
    Acks => "acks",
    Transition => "transition",
    Problematic => "problematic",
    SystemMessage => "system_message",
    Meta => "meta",
    Admonition => "admonition",
    Attention => "attention",
    Caution => "caution",
    Danger => "danger",
    Error => "error",
    Hint => "hint",
    Important => "important",
    Note => "note",
    Tip => "tip",
    Warning => "warning",
    Topic => "topic",
    Sidebar => "sidebar",
    Rubric => "rubric",
    Attribution => "attribution",
    Highlightlang => "highlightlang",
    DescSignature => "desc_signature",
    DescReturns => "desc_returns",
    DescParameterlist => "desc_parameterlist",
    DescParameter => "desc_parameter",
    DescOptional => "desc_optional",
    DescContent => "desc_content",
    Versionmodified => "versionmodified",
    DoctestBlock => "doctest_block",
    LineBlock => "line_block",
    Target => "target",
    Index => "index",
    SubstitutionDefinition => "substitution_definition",
    Raw => "raw",
}

impl NodeKind {
    /// Whether character data under this kind must be kept byte for byte.
    #[must_use]
    pub fn preserves_whitespace(&self) -> bool {
        matches!(self, Self::LiteralBlock | Self::DoctestBlock)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known() {
        assert_eq!(NodeKind::from_tag("bullet_list"), NodeKind::BulletList);
        assert_eq!(NodeKind::from_tag("option"), NodeKind::CommandOption);
        assert_eq!(NodeKind::from_tag("#text"), NodeKind::Text);
    }

    #[test]
    fn test_from_tag_unknown_is_preserved() {
        let kind = NodeKind::from_tag("math_block");
        assert_eq!(kind, NodeKind::Other("math_block".to_owned()));
        assert_eq!(kind.as_str(), "math_block");
    }

    #[test]
    fn test_as_str_matches_tag() {
        for tag in ["entry", "tabular_col_spec", "literal_block", "start_of_file"] {
            assert_eq!(NodeKind::from_tag(tag).as_str(), tag);
        }
    }

    #[test]
    fn test_preserves_whitespace() {
        assert!(NodeKind::LiteralBlock.preserves_whitespace());
        assert!(!NodeKind::Paragraph.preserves_whitespace());
    }
}
