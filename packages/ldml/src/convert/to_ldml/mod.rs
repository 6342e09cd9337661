//! Business model to LDML conversion.
//!
//! A conversion either starts from a fresh skeleton or from the previously
//! published XML of the same document. In the second case every container
//! the converter owns is rewritten and everything else (for example passive
//! citations written by the reference sync) stays where it is.

mod adm;
mod common;
mod literature;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::error::{LdmlError, Result};
use crate::model::{DocumentationUnit, DocumentationUnitContent};
use crate::skeleton::LdmlDocument;
use crate::xml::CanonicalOrderTable;

/// Renders documentation units as LDML documents.
#[derive(Debug, Clone)]
pub struct BusinessToLdmlConverter {
    order: Arc<CanonicalOrderTable>,
    erfassungsdatum: Option<NaiveDate>,
}

impl Default for BusinessToLdmlConverter {
    fn default() -> Self {
        Self::new(CanonicalOrderTable::default_table())
    }
}

impl BusinessToLdmlConverter {
    pub fn new(order: Arc<CanonicalOrderTable>) -> Self {
        Self {
            order,
            erfassungsdatum: None,
        }
    }

    /// Fix the capture date written to the FRBR identification.
    ///
    /// Defaults to the local date at conversion time.
    #[must_use]
    pub fn with_erfassungsdatum(mut self, date: NaiveDate) -> Self {
        self.erfassungsdatum = Some(date);
        self
    }

    /// Convert `unit` into a fresh LDML document string.
    pub fn convert(&self, unit: &DocumentationUnit) -> Result<String> {
        self.convert_onto(unit, None)
    }

    /// Convert `unit`, editing `previous` in place when given.
    ///
    /// Any failure is reported as [`LdmlError::ConversionFailed`] carrying
    /// the document number and category.
    pub fn convert_onto(&self, unit: &DocumentationUnit, previous: Option<&str>) -> Result<String> {
        let category = unit.category();
        let document_number = unit.document_number();

        self.build(unit, previous)
            .and_then(|document| document.to_xml_string())
            .map(|xml| {
                info!(
                    category = %category,
                    document_number = document_number.unwrap_or_default(),
                    incremental = previous.is_some(),
                    "converted documentation unit to LDML"
                );
                xml
            })
            .map_err(|e| LdmlError::conversion_failed(document_number, category, e))
    }

    /// Build the document tree without serializing it.
    pub fn build(&self, unit: &DocumentationUnit, previous: Option<&str>) -> Result<LdmlDocument> {
        let category = unit.category();
        let document_number = unit
            .document_number()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(LdmlError::MissingField("documentNumber"))?;

        let mut document = match previous {
            Some(xml) => {
                let document = LdmlDocument::parse(xml, category, Arc::clone(&self.order))?;
                if let Some(previous_number) = common::identified_document_number(&document) {
                    if previous_number != document_number {
                        return Err(LdmlError::Structural(format!(
                            "previous document is {previous_number}, not {document_number}"
                        )));
                    }
                }
                document
            }
            None => LdmlDocument::new(category, Arc::clone(&self.order))?,
        };

        let erfassungsdatum = self
            .erfassungsdatum
            .unwrap_or_else(|| Local::now().date_naive());
        common::write_identification(&mut document, document_number, unit.id(), erfassungsdatum)?;

        match unit {
            DocumentationUnit::Verwaltungsvorschrift(content) => {
                adm::write(&mut document, content)?;
            }
            DocumentationUnit::LiteraturUnselbstaendig(content) => {
                literature::write_uli(&mut document, content)?;
            }
            DocumentationUnit::LiteraturSelbstaendig(content) => {
                literature::write_sli(&mut document, content)?;
            }
        }

        document.prune_empty_containers()?;
        debug!(document_number, "built LDML tree");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdmDocumentationUnitContent, DocumentCategory};

    fn converter() -> BusinessToLdmlConverter {
        BusinessToLdmlConverter::default()
            .with_erfassungsdatum(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
    }

    fn adm(document_number: Option<&str>) -> DocumentationUnit {
        AdmDocumentationUnitContent {
            document_number: document_number.map(str::to_string),
            langueberschrift: Some("Verwaltungsvorschrift zum Test".to_string()),
            keywords: vec!["Test".to_string()],
            ..AdmDocumentationUnitContent::default()
        }
        .into()
    }

    #[test]
    fn test_missing_document_number_fails() {
        let err = converter().convert(&adm(None)).unwrap_err();
        let LdmlError::ConversionFailed {
            document_number,
            category,
            source,
        } = err
        else {
            panic!("expected ConversionFailed");
        };
        assert_eq!(document_number, None);
        assert_eq!(category, DocumentCategory::Verwaltungsvorschrift);
        assert!(matches!(*source, LdmlError::MissingField("documentNumber")));
    }

    #[test]
    fn test_blank_document_number_fails() {
        let err = converter().convert(&adm(Some("  "))).unwrap_err();
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_convert_writes_identification() {
        let xml = converter().convert(&adm(Some("KSNR2025000001"))).unwrap();
        assert!(xml.contains(r#"<akn:FRBRthis value="KSNR2025000001"/>"#));
        assert!(xml.contains(r#"<akn:FRBRthis value="KSNR2025000001/dokument"/>"#));
        assert!(xml.contains(r#"date="2025-01-02""#));
    }

    #[test]
    fn test_convert_is_idempotent_on_previous_output() {
        let converter = converter();
        let unit = adm(Some("KSNR2025000001"));
        let first = converter.convert(&unit).unwrap();
        let second = converter.convert_onto(&unit, Some(&first)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_previous_of_other_document_fails() {
        let converter = converter();
        let previous = converter.convert(&adm(Some("KSNR2025000001"))).unwrap();

        let err = converter
            .convert_onto(&adm(Some("KSNR2025000002")), Some(&previous))
            .unwrap_err();
        let LdmlError::ConversionFailed { source, .. } = err else {
            panic!("expected ConversionFailed");
        };
        assert!(matches!(*source, LdmlError::Structural(_)));
    }

    #[test]
    fn test_previous_of_other_category_fails() {
        let converter = converter();
        let literature: DocumentationUnit = crate::model::UliDocumentationUnitContent {
            literature: crate::model::LiteratureContent {
                document_number: Some("KALU2025000001".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
        .into();
        let previous = converter.convert(&literature).unwrap();

        let err = converter
            .convert_onto(&adm(Some("KSNR2025000001")), Some(&previous))
            .unwrap_err();
        assert!(matches!(err, LdmlError::ConversionFailed { .. }));
    }
}
