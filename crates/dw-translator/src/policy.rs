//! How each node kind is treated by the translator.

use dw_tree::NodeKind;

/// Treatment of a node kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodePolicy {
    /// Has its own handler.
    Handled,
    /// Produces no output itself; its children are translated.
    Transparent,
    /// Skipped together with its subtree, with a reason.
    Unsupported(&'static str),
    /// Not a recognized kind; skipped with a diagnostic.
    Unknown,
}

impl NodePolicy {
    /// Policy for `kind`.
    #[must_use]
    pub fn of(kind: &NodeKind) -> Self {
        use NodeKind as K;

        match kind {
            K::Document
            | K::StartOfFile
            | K::Section
            | K::Title
            | K::Paragraph
            | K::Text
            | K::Strong
            | K::Emphasis
            | K::BulletList
            | K::EnumeratedList
            | K::ListItem
            | K::Table
            | K::Tgroup
            | K::Colspec
            | K::Row
            | K::Entry
            | K::Figure
            | K::Caption
            | K::Image
            | K::LiteralBlock
            | K::Comment
            | K::TabularColSpec => Self::Handled,

            K::Thead
            | K::Tbody
            | K::Compound
            | K::Container
            | K::BlockQuote
            | K::Reference
            | K::PendingXref
            | K::DownloadReference
            | K::Inline
            | K::Literal
            | K::LiteralEmphasis
            | K::TitleReference
            | K::Abbreviation
            | K::Generated
            | K::CompactParagraph
            | K::Line
            | K::Subtitle
            | K::Glossary
            | K::Desc
            | K::DescName
            | K::DescAddname
            | K::DescType
            | K::DescAnnotation
            | K::Refcount
            | K::Seealso
            | K::OptionList
            | K::OptionString
            | K::Description
            | K::FieldList
            | K::Field
            | K::Centered
            | K::Hlist
            | K::Hlistcol => Self::Transparent,

            K::Footnote
            | K::Citation
            | K::Label
            | K::FootnoteReference
            | K::CitationReference => Self::Unsupported("notes and citations are not rendered"),
            K::Subscript | K::Superscript => Self::Unsupported("script offsets are not rendered"),
            K::SystemMessage | K::Problematic => {
                Self::Unsupported("processing messages are not rendered")
            }
            K::OptionGroup | K::CommandOption | K::OptionArgument => {
                Self::Unsupported("option syntax is not rendered")
            }
            K::DefinitionList | K::Productionlist => {
                Self::Unsupported("list is not rendered")
            }
            K::Legend | K::Acks | K::Transition | K::Meta => {
                Self::Unsupported("node has no rendered form")
            }

            K::Admonition
            | K::Attention
            | K::Caution
            | K::Danger
            | K::Error
            | K::Hint
            | K::Important
            | K::Note
            | K::Tip
            | K::Warning => Self::Unsupported("admonitions are not rendered"),
            K::Topic | K::Sidebar => Self::Unsupported("topics and sidebars are not rendered"),
            K::Rubric | K::Attribution => Self::Unsupported("decorative text is not rendered"),
            K::Highlightlang => Self::Unsupported("highlighting settings have no output"),
            K::DescSignature
            | K::DescReturns
            | K::DescParameterlist
            | K::DescParameter
            | K::DescOptional
            | K::DescContent
            | K::Versionmodified => Self::Unsupported("API description details are not rendered"),
            K::OptionListItem
            | K::DefinitionListItem
            | K::Term
            | K::Definition
            | K::Classifier
            | K::FieldName
            | K::FieldBody => Self::Unsupported("list item body is not rendered"),
            K::DoctestBlock | K::LineBlock => Self::Unsupported("block is not rendered"),
            K::Target | K::Index | K::SubstitutionDefinition => {
                Self::Unsupported("node has no visible output")
            }
            K::Raw => Self::Unsupported("raw content is format specific"),

            K::Other(_) => Self::Unknown,
        }
    }
}
