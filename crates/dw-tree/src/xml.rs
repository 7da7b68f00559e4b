//! Docutils XML doctree loader.
//!
//! Reads the output of `docutils --writer=xml` (or the Sphinx `xml` builder)
//! into a [`Node`] tree. Element names become node kinds, attributes are kept
//! as strings and character data becomes text nodes.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::TreeError;
use crate::kind::NodeKind;
use crate::node::{AttrValue, Node};

/// Parse a docutils XML document.
///
/// # Errors
///
/// Returns an error if the input is not well-formed XML or has no root element.
pub fn from_xml_str(xml: &str) -> Result<Node, TreeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut root = start_node(&reader, &e)?;
                let name = root.kind().as_str().to_owned();
                parse_children(&mut reader, &mut root, &name, false)?;
                return Ok(root);
            }
            Event::Empty(e) => return start_node(&reader, &e),
            Event::Eof => return Err(TreeError::Empty),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_children<R: BufRead>(
    reader: &mut Reader<R>,
    node: &mut Node,
    tag: &str,
    preserve: bool,
) -> Result<(), TreeError> {
    let preserve = preserve || node.kind().preserves_whitespace();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut child = start_node(reader, &e)?;
                let child_tag = decode_name(reader, e.name().as_ref());
                parse_children(reader, &mut child, &child_tag, preserve)?;
                node.push_child(child);
            }
            Event::Empty(e) => {
                node.push_child(start_node(reader, &e)?);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                push_text(node, &text, preserve);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                node.push_text(&decode_entity(&entity));
            }
            Event::CData(e) => {
                node.push_text(&String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                if decode_name(reader, e.name().as_ref()) == tag {
                    return Ok(());
                }
            }
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Whitespace-only runs containing a newline are pretty-printing, not content.
fn push_text(node: &mut Node, text: &str, preserve: bool) {
    if !preserve && text.trim().is_empty() && text.contains('\n') {
        return;
    }
    node.push_text(text);
}

fn start_node<R>(reader: &Reader<R>, e: &BytesStart<'_>) -> Result<Node, TreeError> {
    let mut node = Node::new(NodeKind::from_tag(&decode_name(reader, e.name().as_ref())));
    for attr in e.attributes() {
        let attr = attr?;
        let key = decode_name(reader, attr.key.as_ref());
        if key.starts_with("xmlns") {
            continue;
        }
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        node.set_attr(key, AttrValue::Str(value));
    }
    Ok(node)
}

fn decode_name<R>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

/// Decode an XML entity reference to its character value.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_docutils_document() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE document PUBLIC "+//IDN docutils.sourceforge.net//DTD Docutils Generic//EN//XML"
    "http://docutils.sourceforge.net/docs/ref/docutils.dtd">
<document source="index.rst">
    <section ids="intro" names="intro">
        <title>Intro</title>
        <paragraph>Some <strong>bold</strong> text.</paragraph>
    </section>
</document>
"#;
        let root = from_xml_str(xml).unwrap();
        assert_eq!(root.kind(), &NodeKind::Document);
        assert_eq!(root.attr_str("source"), Some("index.rst"));
        assert_eq!(root.children().len(), 1);

        let section = &root.children()[0];
        assert_eq!(section.kind(), &NodeKind::Section);
        assert_eq!(section.children().len(), 2);
        assert_eq!(section.children()[0].astext(), "Intro");

        let paragraph = &section.children()[1];
        let kinds: Vec<_> = paragraph.children().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![&NodeKind::Text, &NodeKind::Strong, &NodeKind::Text]
        );
        assert_eq!(paragraph.astext(), "Some bold text.");
    }

    #[test]
    fn test_entities_are_decoded() {
        let root = from_xml_str("<paragraph>a &lt; b &amp;&#65;</paragraph>").unwrap();
        assert_eq!(root.astext(), "a < b &A");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_literal_block_keeps_whitespace() {
        let xml = concat!(
            "<document>\n",
            "  <literal_block xml:space=\"preserve\">\n  \n</literal_block>\n",
            "</document>",
        );
        let root = from_xml_str(xml).unwrap();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].astext(), "\n  \n");
    }

    #[test]
    fn test_empty_elements_and_attributes() {
        let xml = r#"<tgroup cols="2"><colspec colwidth="10"/><colspec colwidth="20"/></tgroup>"#;
        let root = from_xml_str(xml).unwrap();
        assert_eq!(root.attr("cols").and_then(AttrValue::as_usize), Some(2));
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[1].attr_str("colwidth"), Some("20"));
    }

    #[test]
    fn test_empty_input_is_error() {
        let err = from_xml_str("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(matches!(err, TreeError::Empty));
    }
}
