//! Business model of literature records (selbständige and unselbständige Literatur).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::references::{DocumentType, Fundstelle, NormReference};
use super::{DocumentCategory, DocumentationUnitContent};

/// Fields shared by both literature categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiteratureContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Publication years, kept textual ("2024", "2023-2024").
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub veroeffentlichungsjahre: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dokumenttypen: Vec<DocumentType>,

    /// Main title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hauptsachtitel: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hauptsachtitel_zusatz: Option<String>,

    /// Title assigned by documentation when no main title exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dokumentarischer_titel: Option<String>,

    /// Authors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verfasser: Vec<String>,

    /// Overall footnotes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gesamtfussnoten: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kurzreferat: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub norm_references: Vec<NormReference>,
}

/// Content of an unselbständige Literatur documentation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UliDocumentationUnitContent {
    #[serde(flatten)]
    pub literature: LiteratureContent,

    /// Periodicals the record appeared in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fundstellen: Vec<Fundstelle>,
}

/// Content of a selbständige Literatur documentation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliDocumentationUnitContent {
    #[serde(flatten)]
    pub literature: LiteratureContent,

    /// Editors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub herausgeber: Vec<String>,
}

impl DocumentationUnitContent for UliDocumentationUnitContent {
    fn category(&self) -> DocumentCategory {
        DocumentCategory::LiteraturUnselbstaendig
    }

    fn document_number(&self) -> Option<&str> {
        self.literature.document_number.as_deref()
    }

    fn id(&self) -> Option<Uuid> {
        self.literature.id
    }
}

impl DocumentationUnitContent for SliDocumentationUnitContent {
    fn category(&self) -> DocumentCategory {
        DocumentCategory::LiteraturSelbstaendig
    }

    fn document_number(&self) -> Option<&str> {
        self.literature.document_number.as_deref()
    }

    fn id(&self) -> Option<Uuid> {
        self.literature.id
    }
}
