//! Arena-backed mutable XML tree with schema-ordered insertion.
//!
//! Nodes live in a `Vec` owned by the tree and are addressed by [`NodeId`].
//! Every child inserted through [`XmlTree::insert_ordered`] lands at the
//! position mandated by the tree's [`CanonicalOrderTable`]; children with
//! tags unknown to the table stay after all known tags, in insertion order.
//!
//! Detaching a node only unlinks it from its parent. The slot stays in the
//! arena but is unreachable from the root, so it is never serialized.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::order::CanonicalOrderTable;
use crate::config::validate_qualified_name;
use crate::error::{LdmlError, Result};

/// Handle to a node inside one [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Qualified element or attribute name (`prefix:local` or `local`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    qualified: String,
    colon: Option<usize>,
}

impl QName {
    /// Parse and validate a qualified name.
    pub fn parse(name: &str) -> Result<Self> {
        validate_qualified_name(name)?;
        Ok(Self {
            qualified: name.to_string(),
            colon: name.find(':'),
        })
    }

    /// Full qualified form, as used by the canonical order table.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.qualified
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.colon.map(|i| &self.qualified[..i])
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        match self.colon {
            Some(i) => &self.qualified[i + 1..],
            None => &self.qualified,
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

/// Description of an element to insert: tag plus attributes.
///
/// Attribute order is irrelevant; keys are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTemplate {
    name: String,
    attributes: BTreeMap<String, String>,
}

impl ElementTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add an attribute only when `value` is present and not blank.
    #[must_use]
    pub fn with_optional_attribute(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.with_attribute(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

/// Borrowed view of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Element {
        name: &'a QName,
        attributes: &'a BTreeMap<String, String>,
    },
    Text(&'a str),
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        name: QName,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Mutable XML document owned by a single conversion.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<NodeData>,
    root: NodeId,
    order: Arc<CanonicalOrderTable>,
}

impl XmlTree {
    /// Create a tree whose root element is built from `root`.
    pub fn new(root: ElementTemplate, order: Arc<CanonicalOrderTable>) -> Result<Self> {
        let data = Self::element_data(root)?;
        Ok(Self {
            nodes: vec![data],
            root: NodeId(0),
            order,
        })
    }

    /// Create a tree using the built-in canonical order table.
    pub fn with_default_order(root: ElementTemplate) -> Result<Self> {
        Self::new(root, CanonicalOrderTable::default_table())
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn order(&self) -> &CanonicalOrderTable {
        &self.order
    }

    /// Shared handle to the order table, for building sibling trees.
    #[must_use]
    pub fn order_handle(&self) -> Arc<CanonicalOrderTable> {
        Arc::clone(&self.order)
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    /// Borrowed view of a node, or `None` for a foreign id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.get(id.0).map(|data| match &data.kind {
            NodeKind::Element { name, attributes } => NodeRef::Element { name, attributes },
            NodeKind::Text(text) => NodeRef::Text(text),
        })
    }

    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id), Some(NodeRef::Element { .. }))
    }

    /// Qualified name of an element node.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&QName> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    /// Whether `id` is an element with qualified name `name`.
    #[must_use]
    pub fn has_tag(&self, id: NodeId, name: &str) -> bool {
        self.name(id).is_some_and(|n| n.as_str() == name)
    }

    #[must_use]
    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attributes(id)?.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn attributes(&self, id: NodeId) -> Option<&BTreeMap<String, String>> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|data| data.children.as_slice())
            .unwrap_or_default()
    }

    /// Element children of `id`, skipping text.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.is_element(*child))
    }

    /// First child element with qualified name `name`.
    #[must_use]
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.element_children(id).find(|child| self.has_tag(*child, name))
    }

    /// All child elements with qualified name `name`.
    #[must_use]
    pub fn find_children(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.element_children(id)
            .filter(|child| self.has_tag(*child, name))
            .collect()
    }

    /// First child matching `template` by tag and exact attribute set.
    #[must_use]
    pub fn find_matching_child(&self, id: NodeId, template: &ElementTemplate) -> Option<NodeId> {
        self.element_children(id).find(|child| {
            self.has_tag(*child, template.name())
                && self.attributes(*child) == Some(template.attributes())
        })
    }

    /// Follow a slash-separated path of qualified names (e.g. "akn:meta/akn:analysis").
    #[must_use]
    pub fn find_by_path(&self, id: NodeId, path: &str) -> Option<NodeId> {
        path.split('/')
            .try_fold(id, |current, part| self.find_child(current, part))
    }

    /// Concatenated direct text content, or `None` when there is none.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<String> {
        let text: String = self
            .children(id)
            .iter()
            .filter_map(|child| match self.node(*child) {
                Some(NodeRef::Text(text)) => Some(text),
                _ => None,
            })
            .collect();
        (!text.is_empty()).then_some(text)
    }

    // ------------------------------------------------------------------
    // Write side
    // ------------------------------------------------------------------

    /// Insert a new element under `parent` at its canonical position.
    ///
    /// The element goes immediately before the first existing child whose
    /// rank is strictly greater (unknown tags and text count as +∞), so
    /// same-tag siblings keep their insertion order. Unknown parent or
    /// child tags fall back to appending.
    pub fn insert_ordered(&mut self, parent: NodeId, template: ElementTemplate) -> Result<NodeId> {
        self.ensure_element(parent)?;
        let data = Self::element_data(template)?;
        let index = self.insertion_index(parent, &data);

        let id = self.push(data, parent);
        self.children_mut(parent)?.insert(index, id);
        trace!(parent = ?parent, index, "inserted element");
        Ok(id)
    }

    /// Insert `template` under `parent` unless an equal child already exists.
    ///
    /// A child is equal when it has the same tag and the same attribute set
    /// (same keys, same values). Returns the existing child in that case.
    pub fn insert_once(&mut self, parent: NodeId, template: ElementTemplate) -> Result<NodeId> {
        self.ensure_element(parent)?;
        if let Some(existing) = self.find_matching_child(parent, &template) {
            return Ok(existing);
        }
        self.insert_ordered(parent, template)
    }

    /// Append an element as last child, ignoring the order table.
    ///
    /// Used when copying an existing document whose order must be kept as is.
    pub fn append_element(&mut self, parent: NodeId, template: ElementTemplate) -> Result<NodeId> {
        self.ensure_element(parent)?;
        let data = Self::element_data(template)?;
        let id = self.push(data, parent);
        self.children_mut(parent)?.push(id);
        Ok(id)
    }

    /// Append a text node as last child.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId> {
        self.ensure_element(parent)?;
        let data = NodeData {
            kind: NodeKind::Text(text.into()),
            parent: None,
            children: Vec::new(),
        };
        let id = self.push(data, parent);
        self.children_mut(parent)?.push(id);
        Ok(id)
    }

    /// Replace all text children of `parent` with `text`.
    pub fn set_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId> {
        self.ensure_element(parent)?;
        self.retain_children(parent, |tree, child| tree.is_element(child))?;
        self.append_text(parent, text)
    }

    /// Create a child element carrying only text, at its canonical position.
    pub fn insert_text_element(
        &mut self,
        parent: NodeId,
        template: ElementTemplate,
        text: impl Into<String>,
    ) -> Result<NodeId> {
        let id = self.insert_ordered(parent, template)?;
        self.append_text(id, text)?;
        Ok(id)
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let key = key.into();
        validate_qualified_name(&key)?;
        match self.nodes.get_mut(id.0).map(|data| &mut data.kind) {
            Some(NodeKind::Element { attributes, .. }) => {
                attributes.insert(key, value.into());
                Ok(())
            }
            _ => Err(Self::not_an_element(id)),
        }
    }

    /// Unlink `id` from its parent. The root cannot be detached.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(LdmlError::Structural("cannot detach the root element".into()));
        }
        let parent = self
            .nodes
            .get(id.0)
            .ok_or_else(|| Self::not_an_element(id))?
            .parent;
        if let Some(parent) = parent {
            self.children_mut(parent)?.retain(|child| *child != id);
        }
        if let Some(data) = self.nodes.get_mut(id.0) {
            data.parent = None;
        }
        Ok(())
    }

    /// Keep only the children of `parent` for which `keep` returns true.
    pub fn retain_children(
        &mut self,
        parent: NodeId,
        mut keep: impl FnMut(&XmlTree, NodeId) -> bool,
    ) -> Result<()> {
        self.ensure_element(parent)?;
        let (kept, dropped): (Vec<NodeId>, Vec<NodeId>) = self
            .children(parent)
            .iter()
            .copied()
            .partition(|child| keep(self, *child));

        for child in dropped {
            if let Some(data) = self.nodes.get_mut(child.0) {
                data.parent = None;
            }
        }
        *self.children_mut(parent)? = kept;
        Ok(())
    }

    /// Remove all children of `parent`.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<()> {
        self.retain_children(parent, |_, _| false)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn element_data(template: ElementTemplate) -> Result<NodeData> {
        let name = QName::parse(&template.name)?;
        for key in template.attributes.keys() {
            validate_qualified_name(key)?;
        }
        Ok(NodeData {
            kind: NodeKind::Element {
                name,
                attributes: template.attributes,
            },
            parent: None,
            children: Vec::new(),
        })
    }

    fn push(&mut self, mut data: NodeData, parent: NodeId) -> NodeId {
        data.parent = Some(parent);
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    fn insertion_index(&self, parent: NodeId, data: &NodeData) -> usize {
        let siblings = self.children(parent);
        let (Some(parent_name), NodeKind::Element { name, .. }) = (self.name(parent), &data.kind)
        else {
            return siblings.len();
        };
        let Some(rank) = self.order.rank(parent_name.as_str(), name.as_str()) else {
            return siblings.len();
        };

        siblings
            .iter()
            .position(|sibling| match self.name(*sibling) {
                Some(sibling_name) => self
                    .order
                    .rank(parent_name.as_str(), sibling_name.as_str())
                    .map_or(true, |sibling_rank| sibling_rank > rank),
                None => true,
            })
            .unwrap_or(siblings.len())
    }

    fn ensure_element(&self, id: NodeId) -> Result<()> {
        if self.is_element(id) {
            Ok(())
        } else {
            Err(Self::not_an_element(id))
        }
    }

    fn children_mut(&mut self, id: NodeId) -> Result<&mut Vec<NodeId>> {
        self.nodes
            .get_mut(id.0)
            .map(|data| &mut data.children)
            .ok_or_else(|| Self::not_an_element(id))
    }

    fn not_an_element(id: NodeId) -> LdmlError {
        LdmlError::Structural(format!("node {} is not an element of this tree", id.0))
    }
}
