//! Parsing persisted XML into an [`XmlTree`] for incremental editing.

use std::sync::Arc;

use roxmltree::{Document, Node};

use super::order::CanonicalOrderTable;
use super::tree::{ElementTemplate, NodeId, XmlTree};
use crate::error::Result;

const XML_PREFIX: &str = "xml";

/// Parse `xml` into a mutable tree.
///
/// Element order is kept exactly as found. Whitespace-only text,
/// comments and processing instructions are dropped. Namespace
/// declarations are kept on the element that introduces them.
pub fn parse_tree(xml: &str, order: Arc<CanonicalOrderTable>) -> Result<XmlTree> {
    let doc = Document::parse(xml)?;
    let source_root = doc.root_element();

    let mut tree = XmlTree::new(element_template(source_root), order)?;
    let root = tree.root();
    copy_children(&mut tree, root, source_root)?;
    Ok(tree)
}

fn copy_children(tree: &mut XmlTree, target: NodeId, source: Node<'_, '_>) -> Result<()> {
    for child in source.children() {
        if child.is_element() {
            let id = tree.append_element(target, element_template(child))?;
            copy_children(tree, id, child)?;
        } else if child.is_text() {
            if let Some(text) = child.text().filter(|t| !t.trim().is_empty()) {
                tree.append_text(target, text)?;
            }
        }
    }
    Ok(())
}

fn element_template(node: Node<'_, '_>) -> ElementTemplate {
    let mut template = ElementTemplate::new(qualified_name(
        node,
        node.tag_name().namespace(),
        node.tag_name().name(),
    ));

    for ns in node.namespaces() {
        if ns.name() == Some(XML_PREFIX) || is_inherited(node, ns.name(), ns.uri()) {
            continue;
        }
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        template = template.with_attribute(key, ns.uri());
    }

    for attr in node.attributes() {
        let key = qualified_name(node, attr.namespace(), attr.name());
        template = template.with_attribute(key, attr.value());
    }

    template
}

fn is_inherited(node: Node<'_, '_>, prefix: Option<&str>, uri: &str) -> bool {
    node.parent_element().is_some_and(|parent| {
        parent
            .namespaces()
            .any(|ns| ns.name() == prefix && ns.uri() == uri)
    })
}

fn qualified_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LdmlError;
    use crate::xml::serialize::to_xml_string;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<akn:akomaNtoso xmlns:akn="http://docs.oasis-open.org/legaldocml/ns/akn/3.0" xmlns:ris="http://ldml.neuris.de/metadata/">
  <!-- comment -->
  <akn:doc name="offene-struktur">
    <akn:meta>
      <akn:proprietary source="x"><ris:meta><ris:dokumentTyp category="VR">Zusatz</ris:dokumentTyp></ris:meta></akn:proprietary>
    </akn:meta>
  </akn:doc>
</akn:akomaNtoso>"#;

    #[test]
    fn test_parse_keeps_prefixes_and_attributes() {
        let tree = parse_tree(SAMPLE, CanonicalOrderTable::default_table()).unwrap();
        let root = tree.root();

        assert!(tree.has_tag(root, "akn:akomaNtoso"));
        assert_eq!(
            tree.attribute(root, "xmlns:ris"),
            Some("http://ldml.neuris.de/metadata/")
        );

        let typ = tree
            .find_by_path(root, "akn:doc/akn:meta/akn:proprietary/ris:meta/ris:dokumentTyp")
            .unwrap();
        assert_eq!(tree.attribute(typ, "category"), Some("VR"));
        assert_eq!(tree.text(typ).as_deref(), Some("Zusatz"));
    }

    #[test]
    fn test_parse_drops_whitespace_and_comments() {
        let tree = parse_tree(SAMPLE, CanonicalOrderTable::default_table()).unwrap();
        let root = tree.root();
        assert_eq!(tree.children(root).len(), 1);
    }

    #[test]
    fn test_namespaces_declared_once() {
        let tree = parse_tree(SAMPLE, CanonicalOrderTable::default_table()).unwrap();
        let doc = tree.find_child(tree.root(), "akn:doc").unwrap();
        assert_eq!(tree.attribute(doc, "xmlns:akn"), None);
    }

    #[test]
    fn test_parse_serialize_parse_is_stable() {
        let tree = parse_tree(SAMPLE, CanonicalOrderTable::default_table()).unwrap();
        let once = to_xml_string(&tree).unwrap();
        let again = to_xml_string(
            &parse_tree(&once, CanonicalOrderTable::default_table()).unwrap(),
        )
        .unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_tree("<akn:doc>", CanonicalOrderTable::default_table());
        assert!(matches!(result, Err(LdmlError::MalformedDocument(_))));
    }
}
