//! Error types for LDML conversion and document numbering.
//!
//! `LdmlError` is the single error type surfaced to callers. Lower-level
//! failures (tree operations, serialization, lookups) are wrapped exactly
//! once at the conversion boundary into [`LdmlError::ConversionFailed`],
//! carrying the document number and category for diagnosis.

use thiserror::Error;

use crate::model::DocumentCategory;

/// Main error type for the ldml library.
#[derive(Debug, Error)]
pub enum LdmlError {
    /// Malformed tree operation (programming or data defect).
    #[error("Structural error: {0}")]
    Structural(String),

    /// The business model could not be rendered to LDML.
    #[error(
        "Conversion of {}{} failed: {source}",
        .category.as_str(),
        .document_number.as_ref().map(|n| format!(" {n}")).unwrap_or_default()
    )]
    ConversionFailed {
        document_number: Option<String>,
        category: DocumentCategory,
        #[source]
        source: Box<LdmlError>,
    },

    /// Prefix/year mismatch or malformed latest document number.
    #[error("Invalid document number: {0}")]
    InvalidDocumentNumber(String),

    /// Persisted XML could not be parsed.
    #[error("Malformed LDML document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),

    /// A required business field is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The proprietary namespace of a document matches no known category.
    #[error("Unknown document category for namespace '{0}'")]
    UnknownDocumentCategory(String),

    /// Canonical order table could not be loaded.
    #[error("Invalid canonical order table: {0}")]
    OrderTable(String),

    /// Schema validation rejected the serialized document.
    #[error("Schema validation failed: {0}")]
    Validation(String),

    /// The publish sink rejected the document.
    #[error("Publishing failed: {0}")]
    Publish(String),

    /// XML writer failure.
    #[error("XML serialization failed: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LdmlError {
    /// Wrap `source` as a conversion failure, unless it already is one.
    #[must_use]
    pub fn conversion_failed(
        document_number: Option<&str>,
        category: DocumentCategory,
        source: LdmlError,
    ) -> Self {
        match source {
            already @ LdmlError::ConversionFailed { .. } => already,
            source => LdmlError::ConversionFailed {
                document_number: document_number.map(str::to_string),
                category,
                source: Box::new(source),
            },
        }
    }

    /// Whether an external caller may retry the operation.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LdmlError::ConversionFailed { .. } | LdmlError::Publish(_)
        )
    }

    /// HTTP status class to report to external callers.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            LdmlError::ConversionFailed { .. } | LdmlError::Publish(_) => 503,
            LdmlError::MalformedDocument(_)
            | LdmlError::UnknownDocumentCategory(_)
            | LdmlError::MissingField(_)
            | LdmlError::Validation(_)
            | LdmlError::Json(_) => 422,
            _ => 500,
        }
    }
}

/// Result type alias for ldml operations.
pub type Result<T> = std::result::Result<T, LdmlError>;
