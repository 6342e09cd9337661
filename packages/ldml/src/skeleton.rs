//! Minimal valid LDML document shell per document category.
//!
//! ```text
//! akn:akomaNtoso (xmlns:akn, xmlns:ris)
//! └── akn:doc name="offene-struktur"
//!     ├── akn:meta
//!     │   ├── akn:analysis        (get-or-create, seeded with one akn:otherReferences)
//!     │   └── akn:proprietary     (get-or-create, wraps ris:meta)
//!     ├── akn:preface
//!     └── akn:mainBody
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::config::{
    AKN_NAMESPACE, AKN_PREFIX, ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT, DOC_NAME, RIS_PREFIX,
};
use crate::error::{LdmlError, Result};
use crate::model::DocumentCategory;
use crate::xml::{parse_tree, to_xml_string, CanonicalOrderTable, ElementTemplate, NodeId, XmlTree};

pub(crate) const AKOMA_NTOSO: &str = "akn:akomaNtoso";
pub(crate) const DOC: &str = "akn:doc";
pub(crate) const META: &str = "akn:meta";
pub(crate) const PREFACE: &str = "akn:preface";
pub(crate) const MAIN_BODY: &str = "akn:mainBody";
pub(crate) const PROPRIETARY: &str = "akn:proprietary";
pub(crate) const RIS_META: &str = "ris:meta";
pub(crate) const ANALYSIS: &str = "akn:analysis";
pub(crate) const OTHER_REFERENCES: &str = "akn:otherReferences";

/// Containers under `akn:meta` that are meaningless without children.
const PRUNABLE_META_CONTAINERS: [&str; 3] = ["akn:classification", "akn:lifecycle", "akn:notes"];

/// An LDML document under construction, with handles to its fixed parts.
#[derive(Debug, Clone)]
pub struct LdmlDocument {
    tree: XmlTree,
    category: DocumentCategory,
    doc: NodeId,
    meta: NodeId,
    preface: NodeId,
    main_body: NodeId,
}

impl LdmlDocument {
    /// Build an empty shell for `category`.
    pub fn new(category: DocumentCategory, order: Arc<CanonicalOrderTable>) -> Result<Self> {
        let root = ElementTemplate::new(AKOMA_NTOSO)
            .with_attribute(format!("xmlns:{AKN_PREFIX}"), AKN_NAMESPACE)
            .with_attribute(format!("xmlns:{RIS_PREFIX}"), category.proprietary_namespace());
        let mut tree = XmlTree::new(root, order)?;

        let doc = tree.insert_ordered(
            tree.root(),
            ElementTemplate::new(DOC).with_attribute("name", DOC_NAME),
        )?;
        let meta = tree.insert_ordered(doc, ElementTemplate::new(META))?;
        let preface = tree.insert_ordered(doc, ElementTemplate::new(PREFACE))?;
        let main_body = tree.insert_ordered(doc, ElementTemplate::new(MAIN_BODY))?;

        debug!(category = %category, "created LDML skeleton");
        Ok(Self {
            tree,
            category,
            doc,
            meta,
            preface,
            main_body,
        })
    }

    /// Parse a previously produced document of `category` for re-editing.
    ///
    /// Missing structural parts are created; everything else is kept as found.
    pub fn parse(
        xml: &str,
        category: DocumentCategory,
        order: Arc<CanonicalOrderTable>,
    ) -> Result<Self> {
        let mut tree = parse_tree(xml, order)?;
        let root = tree.root();

        if !tree.has_tag(root, AKOMA_NTOSO) {
            return Err(LdmlError::Structural(format!(
                "expected root <{AKOMA_NTOSO}>, found <{}>",
                tree.name(root).map(ToString::to_string).unwrap_or_default()
            )));
        }

        let namespace = tree
            .attribute(root, &format!("xmlns:{RIS_PREFIX}"))
            .unwrap_or_default()
            .to_string();
        match DocumentCategory::from_proprietary_namespace(&namespace) {
            Some(found) if found == category => {}
            Some(found) => {
                return Err(LdmlError::Structural(format!(
                    "previous version is a {found} document, not {category}"
                )))
            }
            None => return Err(LdmlError::UnknownDocumentCategory(namespace)),
        }

        let doc = find_or_insert(
            &mut tree,
            root,
            ElementTemplate::new(DOC).with_attribute("name", DOC_NAME),
        )?;
        let meta = find_or_insert(&mut tree, doc, ElementTemplate::new(META))?;
        let preface = find_or_insert(&mut tree, doc, ElementTemplate::new(PREFACE))?;
        let main_body = find_or_insert(&mut tree, doc, ElementTemplate::new(MAIN_BODY))?;

        debug!(category = %category, "parsed previous LDML version");
        Ok(Self {
            tree,
            category,
            doc,
            meta,
            preface,
            main_body,
        })
    }

    #[must_use]
    pub fn category(&self) -> DocumentCategory {
        self.category
    }

    #[must_use]
    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut XmlTree {
        &mut self.tree
    }

    #[must_use]
    pub fn doc(&self) -> NodeId {
        self.doc
    }

    #[must_use]
    pub fn meta(&self) -> NodeId {
        self.meta
    }

    #[must_use]
    pub fn preface(&self) -> NodeId {
        self.preface
    }

    #[must_use]
    pub fn main_body(&self) -> NodeId {
        self.main_body
    }

    /// The `ris:meta` extension container, if it exists.
    #[must_use]
    pub fn proprietary(&self) -> Option<NodeId> {
        let proprietary = self.tree.find_child(self.meta, PROPRIETARY)?;
        self.tree.find_child(proprietary, RIS_META)
    }

    /// The `ris:meta` extension container, created on first use.
    pub fn proprietary_or_create(&mut self) -> Result<NodeId> {
        let proprietary = match self.tree.find_child(self.meta, PROPRIETARY) {
            Some(existing) => existing,
            None => self.tree.insert_once(
                self.meta,
                ElementTemplate::new(PROPRIETARY)
                    .with_attribute("source", ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT),
            )?,
        };
        self.tree
            .insert_once(proprietary, ElementTemplate::new(RIS_META))
    }

    /// The `akn:analysis` container, if it exists.
    #[must_use]
    pub fn analysis(&self) -> Option<NodeId> {
        self.tree.find_child(self.meta, ANALYSIS)
    }

    /// The `akn:analysis` container, created with one empty reference group.
    pub fn analysis_or_create(&mut self) -> Result<NodeId> {
        if let Some(existing) = self.analysis() {
            return Ok(existing);
        }
        let analysis = self.tree.insert_once(
            self.meta,
            ElementTemplate::new(ANALYSIS)
                .with_attribute("source", ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT),
        )?;
        self.tree.insert_once(analysis, other_references_template())?;
        Ok(analysis)
    }

    /// The shared reference group, if it exists.
    #[must_use]
    pub fn other_references(&self) -> Option<NodeId> {
        let analysis = self.analysis()?;
        self.tree.find_child(analysis, OTHER_REFERENCES)
    }

    /// The shared reference group, created on first use.
    pub fn other_references_or_create(&mut self) -> Result<NodeId> {
        let analysis = self.analysis_or_create()?;
        match self.tree.find_child(analysis, OTHER_REFERENCES) {
            Some(existing) => Ok(existing),
            None => self.tree.insert_once(analysis, other_references_template()),
        }
    }

    /// Remove containers left without children.
    pub fn prune_empty_containers(&mut self) -> Result<()> {
        if let Some(analysis) = self.analysis() {
            for group in self.tree.find_children(analysis, OTHER_REFERENCES) {
                self.detach_if_empty(group)?;
            }
            self.detach_if_empty(analysis)?;
        }

        if let Some(proprietary) = self.tree.find_child(self.meta, PROPRIETARY) {
            if let Some(ris_meta) = self.tree.find_child(proprietary, RIS_META) {
                self.detach_if_empty(ris_meta)?;
            }
            self.detach_if_empty(proprietary)?;
        }

        for tag in PRUNABLE_META_CONTAINERS {
            for container in self.tree.find_children(self.meta, tag) {
                self.detach_if_empty(container)?;
            }
        }
        Ok(())
    }

    /// Serialize the document.
    pub fn to_xml_string(&self) -> Result<String> {
        to_xml_string(&self.tree)
    }

    fn detach_if_empty(&mut self, id: NodeId) -> Result<()> {
        if self.tree.children(id).is_empty() {
            self.tree.detach(id)?;
        }
        Ok(())
    }
}

fn other_references_template() -> ElementTemplate {
    ElementTemplate::new(OTHER_REFERENCES)
        .with_attribute("source", ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT)
}

fn find_or_insert(tree: &mut XmlTree, parent: NodeId, template: ElementTemplate) -> Result<NodeId> {
    match tree.find_child(parent, template.name()) {
        Some(existing) => Ok(existing),
        None => tree.insert_ordered(parent, template),
    }
}
