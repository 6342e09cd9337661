//! Publishing: convert, validate and hand off to storage.
//!
//! Schema validation and storage are external collaborators behind the
//! [`SchemaValidator`] and [`PublishSink`] traits. The [`Publisher`] runs
//! them in order after conversion, so the core itself never does I/O.

use tracing::{info, warn};

use crate::convert::BusinessToLdmlConverter;
use crate::error::{LdmlError, Result};
use crate::model::{DocumentationUnit, DocumentationUnitContent};

/// Validates a serialized LDML document against the target schema.
pub trait SchemaValidator: Send + Sync {
    /// Return [`LdmlError::Validation`] when the document is rejected.
    fn validate(&self, xml: &str) -> Result<()>;
}

/// Stores a published LDML document.
pub trait PublishSink: Send + Sync {
    /// Return [`LdmlError::Publish`] when the document cannot be stored.
    fn publish(&self, document_number: &str, xml: &str, bucket_key: &str) -> Result<()>;
}

/// Validator that only checks well-formedness and the Akoma Ntoso root.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellFormednessValidator;

impl SchemaValidator for WellFormednessValidator {
    fn validate(&self, xml: &str) -> Result<()> {
        let document =
            roxmltree::Document::parse(xml).map_err(|e| LdmlError::Validation(e.to_string()))?;
        let root = document.root_element();
        if root.tag_name().name() != "akomaNtoso" {
            return Err(LdmlError::Validation(format!(
                "unexpected root element <{}>",
                root.tag_name().name()
            )));
        }
        Ok(())
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedDocument {
    pub document_number: String,
    pub bucket_key: String,
    pub xml: String,
}

/// Storage key of a published document.
#[must_use]
pub fn bucket_key(document_number: &str) -> String {
    format!("{document_number}.akn.xml")
}

/// Runs convert, validate and publish for one documentation unit.
pub struct Publisher {
    converter: BusinessToLdmlConverter,
    validator: Box<dyn SchemaValidator>,
    sink: Box<dyn PublishSink>,
}

impl Publisher {
    pub fn new(
        converter: BusinessToLdmlConverter,
        validator: Box<dyn SchemaValidator>,
        sink: Box<dyn PublishSink>,
    ) -> Self {
        Self {
            converter,
            validator,
            sink,
        }
    }

    /// Publish `unit`, editing the previously published XML when given.
    ///
    /// Conversion failures surface as [`LdmlError::ConversionFailed`],
    /// validation failures as [`LdmlError::Validation`] and storage
    /// failures as [`LdmlError::Publish`].
    pub fn publish(
        &self,
        unit: &DocumentationUnit,
        previous: Option<&str>,
    ) -> Result<PublishedDocument> {
        let xml = self.converter.convert_onto(unit, previous)?;
        let document_number = unit
            .document_number()
            .map(str::trim)
            .ok_or(LdmlError::MissingField("documentNumber"))?
            .to_string();

        if let Err(e) = self.validator.validate(&xml) {
            warn!(
                document_number = %document_number,
                error = %e,
                "schema validation rejected document"
            );
            return Err(match e {
                LdmlError::Validation(_) => e,
                other => LdmlError::Validation(other.to_string()),
            });
        }

        let bucket_key = bucket_key(&document_number);
        self.sink
            .publish(&document_number, &xml, &bucket_key)
            .map_err(|e| match e {
                LdmlError::Publish(_) => e,
                other => LdmlError::Publish(other.to_string()),
            })?;

        info!(
            document_number = %document_number,
            bucket_key = %bucket_key,
            "published documentation unit"
        );
        Ok(PublishedDocument {
            document_number,
            bucket_key,
            xml,
        })
    }
}
