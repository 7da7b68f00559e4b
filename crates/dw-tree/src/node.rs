//! Immutable document tree nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kind::NodeKind;

/// Attribute value attached to a node.
///
/// Docutils attributes are strings, integers, booleans or lists of strings.
/// XML input always yields strings, so numeric accessors also parse strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value (e.g. `morecols`).
    Int(i64),
    /// Plain string.
    Str(String),
    /// List of strings (e.g. `ids`, `classes`).
    List(Vec<String>),
}

impl AttrValue {
    /// String view of a `Str` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Non-negative integer view; accepts integers and numeric strings.
    #[must_use]
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Self::Int(n) => usize::try_from(*n).ok(),
            Self::Str(s) => s.trim().parse().ok(),
            Self::Bool(_) | Self::List(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One element of the document tree.
///
/// Built once by a loader (or by hand in tests) and only read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct Node {
    kind: NodeKind,
    attributes: BTreeMap<String, AttrValue>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    /// Create an element node without attributes or children.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(NodeKind::Text)
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn set_attr(&mut self, name: String, value: AttrValue) {
        self.attributes.insert(name, value);
    }

    /// Append character data, merging with a trailing text child.
    pub(crate) fn push_text(&mut self, text: &str) {
        if let Some(last) = self.children.last_mut()
            && last.kind == NodeKind::Text
        {
            last.text.push_str(text);
            return;
        }
        self.children.push(Self::text(text));
    }

    /// Node kind.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// All attributes.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, AttrValue> {
        &self.attributes
    }

    /// Attribute by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// String attribute by name.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(AttrValue::as_str)
    }

    /// Whether the attribute is present at all.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Character data of a text node (empty for elements).
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.text
    }

    /// Concatenated character data of this node and all descendants.
    #[must_use]
    pub fn astext(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.kind == NodeKind::Text {
            out.push_str(&self.text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Serialized node shape: `{"tag", "attributes", "children", "text"}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawNode {
    tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, AttrValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        Self {
            kind: NodeKind::from_tag(&raw.tag),
            attributes: raw.attributes,
            children: raw.children.into_iter().map(Node::from).collect(),
            text: raw.text.unwrap_or_default(),
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let text = (node.kind == NodeKind::Text).then_some(node.text);
        Self {
            tag: node.kind.as_str().to_owned(),
            attributes: node.attributes,
            children: node.children.into_iter().map(RawNode::from).collect(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_astext_concatenates_descendants() {
        let node = Node::new(NodeKind::Paragraph)
            .with_child(Node::text("Hello "))
            .with_child(Node::new(NodeKind::Strong).with_child(Node::text("bold")))
            .with_child(Node::text(" world"));
        assert_eq!(node.astext(), "Hello bold world");
    }

    #[test]
    fn test_push_text_merges_adjacent() {
        let mut node = Node::new(NodeKind::Paragraph);
        node.push_text("a");
        node.push_text("b");
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].raw_text(), "ab");
    }

    #[test]
    fn test_attr_value_as_usize() {
        assert_eq!(AttrValue::Int(2).as_usize(), Some(2));
        assert_eq!(AttrValue::from("3").as_usize(), Some(3));
        assert_eq!(AttrValue::Int(-1).as_usize(), None);
        assert_eq!(AttrValue::List(vec![]).as_usize(), None);
    }

    #[test]
    fn test_deserialize_attribute_shapes() {
        let json = r#"{
            "tag": "entry",
            "attributes": {"morecols": 1, "classes": ["wide"], "align": "center", "stub": true}
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind(), &NodeKind::Entry);
        assert_eq!(node.attr("morecols"), Some(&AttrValue::Int(1)));
        assert_eq!(
            node.attr("classes"),
            Some(&AttrValue::List(vec!["wide".to_owned()]))
        );
        assert_eq!(node.attr_str("align"), Some("center"));
        assert_eq!(node.attr("stub"), Some(&AttrValue::Bool(true)));
    }

    #[test]
    fn test_serialize_text_node() {
        let json = serde_json::to_string(&Node::text("hi")).unwrap();
        assert_eq!(json, r##"{"tag":"#text","text":"hi"}"##);
    }
}
