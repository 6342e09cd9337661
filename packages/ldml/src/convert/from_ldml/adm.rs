//! Transformers for administrative regulations.

use chrono::NaiveDate;
use roxmltree::Document;
use tracing::warn;

use super::common::{
    classification_values, meta, note_texts, paragraphs, parse_date, proprietary_meta,
    reference_payloads, ris_list, single_norms_of, transform_document_number,
    transform_fundstellen, transform_id, transform_kurzreferat, transform_long_title,
    transform_norm_references,
};
use crate::convert::vocabulary::*;
use crate::lookup::DocumentTypeLookup;
use crate::model::{
    ActiveCitation, ActiveReference, AdmDocumentationUnitContent, Court, DocumentCategory,
    DocumentType, FieldOfLaw, Institution, InstitutionType, Normgeber, Region,
};
use crate::xml::{
    find_by_path, find_child, find_child_with_attribute, find_children, get_attribute,
    non_blank_text,
};

/// Read an administrative regulation.
pub(crate) fn read(
    document: &Document<'_>,
    lookup: &dyn DocumentTypeLookup,
) -> AdmDocumentationUnitContent {
    AdmDocumentationUnitContent {
        id: transform_id(document),
        document_number: transform_document_number(document),
        langueberschrift: transform_long_title(document),
        dokumenttyp: transform_dokumenttyp(document, lookup),
        dokumenttyp_zusatz: transform_dokumenttyp_zusatz(document),
        zitierdaten: transform_zitierdaten(document),
        inkrafttretedatum: transform_inkrafttretedatum(document),
        ausserkrafttretedatum: transform_ausserkrafttretedatum(document),
        gliederung: transform_gliederung(document),
        kurzreferat: transform_kurzreferat(document),
        keywords: classification_values(document, SOURCE_SCHLAGWORT),
        fields_of_law: transform_fields_of_law(document),
        aktenzeichen: ris_list(document, AKTENZEICHEN_LISTE, AKTENZEICHEN),
        fundstellen: transform_fundstellen(document),
        norm_references: transform_norm_references(document),
        active_references: transform_active_references(document),
        active_citations: transform_active_citations(document),
        normgeber_list: transform_normgeber(document),
        berufsbilder: ris_list(document, BERUFSBILDER, BERUFSBILD),
        titelaspekte: ris_list(document, TITELASPEKTE, TITELASPEKT),
        definitionen: ris_list(document, DEFINITIONEN, DEFINITION),
        note: note_texts(document, SOURCE_NOTIZ).into_iter().next(),
    }
}

/// Document type, resolved through the lookup table.
pub fn transform_dokumenttyp(
    document: &Document<'_>,
    lookup: &dyn DocumentTypeLookup,
) -> Option<DocumentType> {
    let node = find_child(proprietary_meta(document)?, local(DOKUMENT_TYP))?;
    let code = get_attribute(node, "category")?;
    let resolved = lookup.resolve_document_type(code, DocumentCategory::Verwaltungsvorschrift);
    if resolved.is_none() {
        warn!(code, "unknown document type");
    }
    resolved
}

pub fn transform_dokumenttyp_zusatz(document: &Document<'_>) -> Option<String> {
    non_blank_text(find_child(proprietary_meta(document)?, local(DOKUMENT_TYP))?)
}

pub fn transform_zitierdaten(document: &Document<'_>) -> Vec<NaiveDate> {
    ris_list(document, ZITIERDATEN, ZITIERDATUM)
        .iter()
        .filter_map(|value| parse_date(value))
        .collect()
}

fn lifecycle_date(document: &Document<'_>, refers_to: &str) -> Option<NaiveDate> {
    let lifecycle = find_child(meta(document)?, local(LIFECYCLE))?;
    let event = find_child_with_attribute(lifecycle, local(EVENT_REF), "refersTo", refers_to)?;
    parse_date(get_attribute(event, "date")?)
}

pub fn transform_inkrafttretedatum(document: &Document<'_>) -> Option<NaiveDate> {
    lifecycle_date(document, EVENT_INKRAFTTRETEN)
}

pub fn transform_ausserkrafttretedatum(document: &Document<'_>) -> Option<NaiveDate> {
    lifecycle_date(document, EVENT_AUSSERKRAFTTRETEN)
}

/// Table of contents from the `gliederung` container of the preface.
pub fn transform_gliederung(document: &Document<'_>) -> Option<String> {
    let preface = find_by_path(document.root_element(), "doc/preface")?;
    let container = find_child_with_attribute(preface, local(CONTAINER), "name", NAME_GLIEDERUNG)?;
    paragraphs(container)
}

pub fn transform_fields_of_law(document: &Document<'_>) -> Vec<FieldOfLaw> {
    let Some(list) = proprietary_meta(document).and_then(|m| find_child(m, local(SACHGEBIETE)))
    else {
        return Vec::new();
    };
    find_children(list, local(SACHGEBIET))
        .filter_map(|node| {
            Some(FieldOfLaw {
                identifier: get_attribute(node, "notation")?.to_string(),
                text: non_blank_text(node).unwrap_or_default(),
            })
        })
        .collect()
}

/// Active references, one per reference entry.
pub fn transform_active_references(document: &Document<'_>) -> Vec<ActiveReference> {
    reference_payloads(document, ACTIVE_REFERENCE)
        .into_iter()
        .filter_map(|payload| {
            let (Some(reference_type), Some(abbreviation)) = (
                get_attribute(payload, "referenceType"),
                get_attribute(payload, "normAbbreviation"),
            ) else {
                warn!("skipping incomplete active reference");
                return None;
            };
            Some(ActiveReference {
                reference_type: reference_type.to_string(),
                norm_abbreviation: abbreviation.to_string(),
                single_norms: single_norms_of(payload),
            })
        })
        .collect()
}

pub fn transform_active_citations(document: &Document<'_>) -> Vec<ActiveCitation> {
    reference_payloads(document, CASELAW_REFERENCE)
        .into_iter()
        .map(|payload| ActiveCitation {
            citation_type: get_attribute(payload, "citationType").map(str::to_string),
            court: get_attribute(payload, "courtType").map(|court_type| Court {
                court_type: court_type.to_string(),
                location: get_attribute(payload, "courtLocation").map(str::to_string),
            }),
            decision_date: get_attribute(payload, "date").and_then(parse_date),
            file_number: get_attribute(payload, "fileNumber").map(str::to_string),
            document_number: get_attribute(payload, "documentNumber").map(str::to_string),
        })
        .collect()
}

pub fn transform_normgeber(document: &Document<'_>) -> Vec<Normgeber> {
    let Some(list) = proprietary_meta(document).and_then(|m| find_child(m, local(NORMGEBER_LISTE)))
    else {
        return Vec::new();
    };
    find_children(list, local(NORMGEBER))
        .filter_map(|node| {
            let name = get_attribute(node, "institution")?;
            let Some(institution_type) =
                get_attribute(node, "type").and_then(InstitutionType::from_attribute)
            else {
                warn!(institution = name, "skipping normgeber without valid type");
                return None;
            };
            let regions = find_children(node, local(REGION))
                .filter_map(|region| {
                    Some(Region {
                        code: get_attribute(region, "code")?.to_string(),
                        long_text: get_attribute(region, "longText").map(str::to_string),
                    })
                })
                .collect();
            Some(Normgeber {
                institution: Institution {
                    name: name.to_string(),
                    official_name: get_attribute(node, "officialName").map(str::to_string),
                    institution_type,
                },
                regions,
            })
        })
        .collect()
}
