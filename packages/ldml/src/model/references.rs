//! Reference value objects shared by the documentation unit variants.
//!
//! All of these are immutable records: they are created fresh from API
//! input at publish time or reconstructed from XML at read time, and lists
//! of them are always replaced as a whole.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A document type resolved from the lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentType {
    /// Short code stored in the XML (e.g. "VR", "Ebs").
    pub abbreviation: String,

    /// Human readable name.
    pub name: String,
}

impl DocumentType {
    #[must_use]
    pub fn new(abbreviation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            name: name.into(),
        }
    }
}

/// A field of law (Sachgebiet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOfLaw {
    /// Identifier in the field-of-law tree (e.g. "PR-05-01").
    pub identifier: String,

    /// Descriptive text.
    pub text: String,
}

/// A citation of a legal periodical (Fundstelle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fundstelle {
    /// Abbreviation of the periodical (e.g. "BAnz").
    pub periodikum: String,

    /// Location inside the periodical (e.g. "2024, 12").
    pub zitatstelle: String,
}

impl Fundstelle {
    /// Display form, e.g. "BAnz 2024, 12".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.periodikum, self.zitatstelle)
    }
}

/// A single norm inside a norm reference (e.g. "§ 1 Abs 2").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleNorm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_norm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_version: Option<NaiveDate>,

    /// Year of relevance, kept textual as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_relevance: Option<String>,
}

impl SingleNorm {
    #[must_use]
    pub fn new(single_norm: impl Into<String>) -> Self {
        Self {
            single_norm: Some(single_norm.into()),
            ..Self::default()
        }
    }

    /// Whether no sub-field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.single_norm.is_none()
            && self.date_of_version.is_none()
            && self.date_of_relevance.is_none()
    }
}

/// A reference to a norm with zero or more single norms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormReference {
    /// Abbreviation of the referenced norm (e.g. "BGB").
    pub norm_abbreviation: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub single_norms: Vec<SingleNorm>,
}

impl NormReference {
    #[must_use]
    pub fn new(norm_abbreviation: impl Into<String>) -> Self {
        Self {
            norm_abbreviation: norm_abbreviation.into(),
            single_norms: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_single_norms(mut self, single_norms: Vec<SingleNorm>) -> Self {
        self.single_norms = single_norms;
        self
    }
}

/// A typed reference (Verweis) from this document to a norm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveReference {
    /// Reference type code (Verweistyp, e.g. "anwendung").
    pub reference_type: String,

    pub norm_abbreviation: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub single_norms: Vec<SingleNorm>,
}

/// A court, identified by type and optional location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    /// Court type (e.g. "BGH", "AG").
    #[serde(rename = "type")]
    pub court_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Court {
    /// Display form, e.g. "AG Berlin".
    #[must_use]
    pub fn label(&self) -> String {
        match &self.location {
            Some(location) => format!("{} {}", self.court_type, location),
            None => self.court_type.clone(),
        }
    }
}

/// A citation of a court decision (Aktivzitierung Rechtsprechung).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCitation {
    /// Citation type (Zitierart, e.g. "Ablehnung").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<Court>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
}

impl ActiveCitation {
    /// The court, unless its type is blank.
    #[must_use]
    pub fn typed_court(&self) -> Option<&Court> {
        self.court
            .as_ref()
            .filter(|court| !court.court_type.trim().is_empty())
    }

    /// Display form joining the present parts with commas.
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(citation_type) = &self.citation_type {
            parts.push(citation_type.clone());
        }
        if let Some(court) = self.typed_court() {
            parts.push(court.label());
        }
        if let Some(date) = &self.decision_date {
            parts.push(date.format("%d.%m.%Y").to_string());
        }
        if let Some(file_number) = &self.file_number {
            parts.push(file_number.clone());
        }
        parts.join(", ")
    }
}

/// Whether a Normgeber is an institution or a legal entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstitutionType {
    Institution,
    LegalEntity,
}

impl InstitutionType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Institution => "institution",
            Self::LegalEntity => "legal-entity",
        }
    }

    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "institution" => Some(Self::Institution),
            "legal-entity" => Some(Self::LegalEntity),
            _ => None,
        }
    }
}

/// Issuing institution of a regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,

    #[serde(rename = "type")]
    pub institution_type: InstitutionType,
}

/// A region (e.g. federal state) a Normgeber acts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Region code (e.g. "NW").
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_text: Option<String>,
}

/// Issuing authority: exactly one institution and zero or more regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normgeber {
    pub institution: Institution,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,
}
