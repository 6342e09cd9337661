//! Serialization of an [`XmlTree`] to an XML string.

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::tree::{NodeId, NodeRef, XmlTree};
use crate::error::{LdmlError, Result};

const INDENT_SIZE: usize = 2;

/// Serialize the tree reachable from the root, with declaration and indentation.
///
/// Namespace declarations are written before ordinary attributes; both
/// groups are sorted by name so output is deterministic.
pub fn to_xml_string(tree: &XmlTree) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_node(&mut writer, tree, tree.root())?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| LdmlError::Structural(format!("serialized XML is not UTF-8: {e}")))
}

fn write_node(writer: &mut Writer<Vec<u8>>, tree: &XmlTree, id: NodeId) -> Result<()> {
    match tree.node(id) {
        Some(NodeRef::Text(text)) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        Some(NodeRef::Element { name, attributes }) => {
            let mut start = BytesStart::new(name.as_str());
            let (declarations, plain): (Vec<_>, Vec<_>) = attributes
                .iter()
                .partition(|(key, _)| is_namespace_declaration(key));
            for (key, value) in declarations.into_iter().chain(plain) {
                let value = escape_attribute(value);
                start.push_attribute((key.as_bytes(), value.as_bytes()));
            }

            let children = tree.children(id);
            if children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for child in children {
                    write_node(writer, tree, *child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
        }
        None => {
            return Err(LdmlError::Structural(format!(
                "dangling node {id:?} while serializing"
            )))
        }
    }
    Ok(())
}

/// Escape markup characters plus line breaks and tabs, which attribute
/// value normalization would otherwise turn into spaces on re-read.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

fn is_namespace_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::tree::ElementTemplate;

    #[test]
    fn test_serialize_nested_with_text() {
        let mut tree = XmlTree::with_default_order(
            ElementTemplate::new("akn:akomaNtoso")
                .with_attribute("xmlns:akn", "http://example.com/akn"),
        )
        .unwrap();
        let root = tree.root();
        let doc = tree
            .insert_ordered(root, ElementTemplate::new("akn:doc").with_attribute("name", "x"))
            .unwrap();
        tree.append_text(doc, "a < b & c").unwrap();

        let xml = to_xml_string(&tree).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<akn:akomaNtoso xmlns:akn=\"http://example.com/akn\">"));
        assert!(xml.contains("<akn:doc name=\"x\">a &lt; b &amp; c</akn:doc>"));
    }

    #[test]
    fn test_attribute_whitespace_survives_reparse() {
        let tree = XmlTree::with_default_order(
            ElementTemplate::new("root").with_attribute("value", "zwei\nZeilen\tund \"Tab\""),
        )
        .unwrap();
        let xml = to_xml_string(&tree).unwrap();
        assert!(xml.contains(r#"value="zwei&#10;Zeilen&#9;und &quot;Tab&quot;""#));

        let document = roxmltree::Document::parse(&xml).unwrap();
        assert_eq!(
            document.root_element().attribute("value"),
            Some("zwei\nZeilen\tund \"Tab\"")
        );
    }

    #[test]
    fn test_serialize_empty_element() {
        let tree = XmlTree::with_default_order(ElementTemplate::new("root")).unwrap();
        let xml = to_xml_string(&tree).unwrap();
        assert!(xml.ends_with("<root/>"));
    }

    #[test]
    fn test_namespace_declarations_first() {
        let tree = XmlTree::with_default_order(
            ElementTemplate::new("root")
                .with_attribute("a", "1")
                .with_attribute("xmlns:z", "urn:z"),
        )
        .unwrap();
        let xml = to_xml_string(&tree).unwrap();
        assert!(xml.contains("<root xmlns:z=\"urn:z\" a=\"1\"/>"));
    }

    #[test]
    fn test_detached_nodes_are_not_serialized() {
        let mut tree = XmlTree::with_default_order(ElementTemplate::new("root")).unwrap();
        let root = tree.root();
        let gone = tree.insert_ordered(root, ElementTemplate::new("gone")).unwrap();
        tree.insert_ordered(root, ElementTemplate::new("kept")).unwrap();
        tree.detach(gone).unwrap();

        let xml = to_xml_string(&tree).unwrap();
        assert!(!xml.contains("gone"));
        assert!(xml.contains("<kept/>"));
    }
}
