//! Business model of documentation units.
//!
//! A documentation unit is one of a closed set of variants sharing an
//! identity (document number, internal id). The JSON shape matches what
//! the editing UI sends: camelCase fields, tagged by `category`.

mod adm;
mod category;
mod literature;
mod references;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use adm::AdmDocumentationUnitContent;
pub use category::DocumentCategory;
pub use literature::{LiteratureContent, SliDocumentationUnitContent, UliDocumentationUnitContent};
pub use references::{
    ActiveCitation, ActiveReference, Court, DocumentType, FieldOfLaw, Fundstelle, Institution,
    InstitutionType, NormReference, Normgeber, Region, SingleNorm,
};

/// Capabilities shared by every documentation unit variant.
pub trait DocumentationUnitContent {
    /// Category this content belongs to.
    fn category(&self) -> DocumentCategory;

    /// Document number, if already assigned.
    fn document_number(&self) -> Option<&str>;

    /// Internal id, if already assigned.
    fn id(&self) -> Option<Uuid>;
}

/// A documentation unit of any category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentationUnit {
    Verwaltungsvorschrift(AdmDocumentationUnitContent),
    LiteraturUnselbstaendig(UliDocumentationUnitContent),
    LiteraturSelbstaendig(SliDocumentationUnitContent),
}

impl DocumentationUnit {
    fn content(&self) -> &dyn DocumentationUnitContent {
        match self {
            Self::Verwaltungsvorschrift(content) => content,
            Self::LiteraturUnselbstaendig(content) => content,
            Self::LiteraturSelbstaendig(content) => content,
        }
    }
}

impl DocumentationUnitContent for DocumentationUnit {
    fn category(&self) -> DocumentCategory {
        self.content().category()
    }

    fn document_number(&self) -> Option<&str> {
        self.content().document_number()
    }

    fn id(&self) -> Option<Uuid> {
        self.content().id()
    }
}

impl From<AdmDocumentationUnitContent> for DocumentationUnit {
    fn from(content: AdmDocumentationUnitContent) -> Self {
        Self::Verwaltungsvorschrift(content)
    }
}

impl From<UliDocumentationUnitContent> for DocumentationUnit {
    fn from(content: UliDocumentationUnitContent) -> Self {
        Self::LiteraturUnselbstaendig(content)
    }
}

impl From<SliDocumentationUnitContent> for DocumentationUnit {
    fn from(content: SliDocumentationUnitContent) -> Self {
        Self::LiteraturSelbstaendig(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_adm() {
        let json = r#"{
            "category": "VERWALTUNGSVORSCHRIFT",
            "documentNumber": "KSNR2025000001",
            "langueberschrift": "Verwaltungsvorschrift zum Test",
            "keywords": ["Steuer", "Abgabe"],
            "zitierdaten": ["2024-05-01"]
        }"#;

        let unit: DocumentationUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.category(), DocumentCategory::Verwaltungsvorschrift);
        assert_eq!(unit.document_number(), Some("KSNR2025000001"));

        let DocumentationUnit::Verwaltungsvorschrift(content) = unit else {
            panic!("expected administrative regulation");
        };
        assert_eq!(content.keywords, vec!["Steuer", "Abgabe"]);
        assert_eq!(content.zitierdaten.len(), 1);
    }

    #[test]
    fn test_deserialize_tagged_literature_flattened() {
        let json = r#"{
            "category": "LITERATUR_SELBSTAENDIG",
            "documentNumber": "KALS2025000003",
            "hauptsachtitel": "Kommentar zum BGB",
            "herausgeber": ["Palandt"]
        }"#;

        let unit: DocumentationUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.category(), DocumentCategory::LiteraturSelbstaendig);

        let DocumentationUnit::LiteraturSelbstaendig(content) = unit else {
            panic!("expected selbständige Literatur");
        };
        assert_eq!(
            content.literature.hauptsachtitel.as_deref(),
            Some("Kommentar zum BGB")
        );
        assert_eq!(content.herausgeber, vec!["Palandt"]);
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let unit = DocumentationUnit::from(AdmDocumentationUnitContent {
            document_number: Some("KSNR2025000001".to_string()),
            ..AdmDocumentationUnitContent::default()
        });
        assert_eq!(
            serde_json::to_string(&unit).unwrap(),
            r#"{"category":"VERWALTUNGSVORSCHRIFT","documentNumber":"KSNR2025000001"}"#
        );
    }
}
