//! Document type resolution against lookup tables.
//!
//! The XML only stores a document type code. Readers resolve the code to a
//! full [`DocumentType`] through a [`DocumentTypeLookup`]; an unresolved
//! code means the field is absent.
//!
//! # Example
//!
//! ```
//! use ris_ldml::lookup::{DocumentTypeLookup, InMemoryDocumentTypeLookup};
//! use ris_ldml::model::{DocumentCategory, DocumentType};
//!
//! let mut lookup = InMemoryDocumentTypeLookup::new();
//! lookup.insert(
//!     DocumentCategory::Verwaltungsvorschrift,
//!     DocumentType::new("VR", "Verwaltungsregelung"),
//! );
//!
//! let resolved = lookup.resolve_document_type("VR", DocumentCategory::Verwaltungsvorschrift);
//! assert_eq!(resolved.map(|t| t.name), Some("Verwaltungsregelung".to_string()));
//! assert!(lookup
//!     .resolve_document_type("VR", DocumentCategory::LiteraturSelbstaendig)
//!     .is_none());
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::model::{DocumentCategory, DocumentType};

/// Query interface to the document type lookup table.
pub trait DocumentTypeLookup: Send + Sync {
    /// Resolve `code` within `category`, or `None` when unknown.
    fn resolve_document_type(&self, code: &str, category: DocumentCategory) -> Option<DocumentType>;
}

/// One row of a document type table file.
#[derive(Debug, Deserialize)]
struct DocumentTypeRow {
    category: DocumentCategory,
    abbreviation: String,
    name: String,
}

/// Document types held in memory, keyed by category and code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentTypeLookup {
    types: HashMap<(DocumentCategory, String), DocumentType>,
}

impl InMemoryDocumentTypeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from JSON: a list of `{category, abbreviation, name}` rows.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rows: Vec<DocumentTypeRow> = serde_json::from_str(json)?;
        let mut lookup = Self::new();
        for row in rows {
            lookup.insert(row.category, DocumentType::new(row.abbreviation, row.name));
        }
        debug!(count = lookup.len(), "loaded document types");
        Ok(lookup)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Add or replace a document type for `category`.
    pub fn insert(&mut self, category: DocumentCategory, document_type: DocumentType) {
        self.types
            .insert((category, document_type.abbreviation.clone()), document_type);
    }

    #[must_use]
    pub fn with(mut self, category: DocumentCategory, document_type: DocumentType) -> Self {
        self.insert(category, document_type);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl DocumentTypeLookup for InMemoryDocumentTypeLookup {
    fn resolve_document_type(
        &self,
        code: &str,
        category: DocumentCategory,
    ) -> Option<DocumentType> {
        self.types.get(&(category, code.trim().to_string())).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = r#"[
        {"category": "VERWALTUNGSVORSCHRIFT", "abbreviation": "VR", "name": "Verwaltungsregelung"},
        {"category": "LITERATUR_SELBSTAENDIG", "abbreviation": "Bib", "name": "Bibliographie"},
        {"category": "LITERATUR_UNSELBSTAENDIG", "abbreviation": "Ebs", "name": "Entscheidungsbesprechung"}
    ]"#;

    #[test]
    fn test_from_json_str() {
        let lookup = InMemoryDocumentTypeLookup::from_json_str(TABLE).unwrap();
        assert_eq!(lookup.len(), 3);
        assert_eq!(
            lookup.resolve_document_type("Ebs", DocumentCategory::LiteraturUnselbstaendig),
            Some(DocumentType::new("Ebs", "Entscheidungsbesprechung"))
        );
    }

    #[test]
    fn test_resolution_is_per_category() {
        let lookup = InMemoryDocumentTypeLookup::from_json_str(TABLE).unwrap();
        assert!(lookup
            .resolve_document_type("Bib", DocumentCategory::LiteraturUnselbstaendig)
            .is_none());
        assert!(lookup
            .resolve_document_type("unknown", DocumentCategory::Verwaltungsvorschrift)
            .is_none());
    }

    #[test]
    fn test_invalid_json() {
        assert!(InMemoryDocumentTypeLookup::from_json_str("{").is_err());
        assert!(InMemoryDocumentTypeLookup::from_json_str(
            r#"[{"category": "UNKNOWN", "abbreviation": "X", "name": "Y"}]"#
        )
        .is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let lookup = InMemoryDocumentTypeLookup::from_path(file.path()).unwrap();
        assert!(!lookup.is_empty());
    }
}
