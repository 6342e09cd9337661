//! Read helpers for navigating parsed LDML (roxmltree) documents.
//!
//! All lookups match on local names, so `akn:meta` and `ris:meta` are both
//! found as `meta`; paths disambiguate by position.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ris_ldml::xml::get_tag_name;
///
/// let xml = r#"<akn:doc xmlns:akn="urn:akn"><akn:meta/></akn:doc>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "doc");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given local name.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given local name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find a descendant element matching a slash-separated path of local names.
///
/// Any missing intermediate element yields `None`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ris_ldml::xml::find_by_path;
///
/// let xml = r#"<doc><meta><proprietary><x>1</x></proprietary></meta></doc>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert!(find_by_path(doc.root_element(), "meta/proprietary/x").is_some());
/// assert!(find_by_path(doc.root_element(), "meta/analysis/x").is_none());
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    path.split('/')
        .try_fold(node, |current, part| find_child(current, part))
}

/// Get the text content of a node, trimmed.
///
/// Returns an empty string if there is no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get the trimmed text content, or `None` when blank.
pub fn non_blank_text(node: Node<'_, '_>) -> Option<String> {
    Some(get_text(node)).filter(|s| !s.is_empty())
}

/// Get an attribute value, or `None` when absent or blank.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|v| !v.trim().is_empty())
}

/// Check if a node is an element with the given local name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Find the first child with the given local name and attribute value.
pub fn find_child_with_attribute<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    attribute: &str,
    value: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| has_tag(*child, tag) && child.attribute(attribute) == Some(value))
}
