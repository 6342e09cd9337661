//! LDML to business model conversion.
//!
//! The reverse pass is a set of independent transformers, each reading one
//! business field out of a parsed document. Only unparsable XML and an
//! unknown document category are errors.

mod adm;
mod common;
mod literature;

pub use adm::{
    transform_active_citations, transform_active_references, transform_ausserkrafttretedatum,
    transform_dokumenttyp, transform_dokumenttyp_zusatz, transform_fields_of_law,
    transform_gliederung, transform_inkrafttretedatum, transform_normgeber, transform_zitierdaten,
};
pub use common::{
    transform_document_number, transform_fundstellen, transform_id, transform_kurzreferat,
    transform_long_title, transform_norm_references,
};
pub use literature::{
    transform_dokumenttypen, transform_herausgeber, transform_verfasser,
    transform_veroeffentlichungsjahre,
};

use roxmltree::Document;
use tracing::debug;

use crate::error::{LdmlError, Result};
use crate::lookup::DocumentTypeLookup;
use crate::model::{DocumentCategory, DocumentationUnit};

/// Reconstructs documentation units from persisted LDML.
pub struct LdmlToBusinessConverter<'a> {
    lookup: &'a dyn DocumentTypeLookup,
}

impl<'a> LdmlToBusinessConverter<'a> {
    pub fn new(lookup: &'a dyn DocumentTypeLookup) -> Self {
        Self { lookup }
    }

    /// Parse `xml` and read every business field.
    pub fn convert(&self, xml: &str) -> Result<DocumentationUnit> {
        let document = Document::parse(xml)?;
        let category = detect_category(&document)?;

        let unit = match category {
            DocumentCategory::Verwaltungsvorschrift => {
                DocumentationUnit::Verwaltungsvorschrift(adm::read(&document, self.lookup))
            }
            DocumentCategory::LiteraturUnselbstaendig => DocumentationUnit::LiteraturUnselbstaendig(
                literature::read_uli(&document, self.lookup),
            ),
            DocumentCategory::LiteraturSelbstaendig => DocumentationUnit::LiteraturSelbstaendig(
                literature::read_sli(&document, self.lookup),
            ),
        };
        debug!(category = %category, "read documentation unit from LDML");
        Ok(unit)
    }
}

/// Category of a parsed document, from the proprietary namespace bound on its root.
pub fn detect_category(document: &Document<'_>) -> Result<DocumentCategory> {
    let bound: Vec<&str> = document
        .root_element()
        .namespaces()
        .map(|ns| ns.uri())
        .collect();

    bound
        .iter()
        .find_map(|uri| DocumentCategory::from_proprietary_namespace(uri))
        .ok_or_else(|| LdmlError::UnknownDocumentCategory(bound.join(", ")))
}
