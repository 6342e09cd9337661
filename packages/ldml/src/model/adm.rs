//! Business model of an administrative regulation (Verwaltungsvorschrift).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::references::{
    ActiveCitation, ActiveReference, DocumentType, FieldOfLaw, Fundstelle, NormReference,
    Normgeber,
};
use super::{DocumentCategory, DocumentationUnitContent};

/// Content of an administrative regulation documentation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmDocumentationUnitContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Long title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub langueberschrift: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dokumenttyp: Option<DocumentType>,

    /// Free-text addition to the document type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dokumenttyp_zusatz: Option<String>,

    /// Citation dates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zitierdaten: Vec<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inkrafttretedatum: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ausserkrafttretedatum: Option<NaiveDate>,

    /// Outline, one line per entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gliederung: Option<String>,

    /// Abstract, one line per paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kurzreferat: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields_of_law: Vec<FieldOfLaw>,

    /// File numbers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aktenzeichen: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fundstellen: Vec<Fundstelle>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub norm_references: Vec<NormReference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_references: Vec<ActiveReference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_citations: Vec<ActiveCitation>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub normgeber_list: Vec<Normgeber>,

    /// Professions the regulation addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub berufsbilder: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub titelaspekte: Vec<String>,

    /// Terms defined by the regulation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub definitionen: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DocumentationUnitContent for AdmDocumentationUnitContent {
    fn category(&self) -> DocumentCategory {
        DocumentCategory::Verwaltungsvorschrift
    }

    fn document_number(&self) -> Option<&str> {
        self.document_number.as_deref()
    }

    fn id(&self) -> Option<Uuid> {
        self.id
    }
}
