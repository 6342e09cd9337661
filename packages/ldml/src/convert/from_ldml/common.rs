//! Transformers shared by all documentation unit categories.
//!
//! Every transformer navigates a fixed path of optional containers. A
//! missing container yields `None` or an empty list, never an error.

use chrono::NaiveDate;
use roxmltree::{Document, Node};
use tracing::warn;
use uuid::Uuid;

use crate::convert::vocabulary::*;
use crate::model::{Fundstelle, NormReference, SingleNorm};
use crate::skeleton::{ANALYSIS, OTHER_REFERENCES};
use crate::xml::{
    element_children, find_by_path, find_child, find_child_with_attribute, find_children,
    get_attribute, has_tag, non_blank_text,
};

/// `akn:meta` of the document.
pub(crate) fn meta<'a, 'input>(document: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    find_by_path(document.root_element(), "doc/meta")
}

/// `ris:meta` inside `akn:proprietary`.
pub(crate) fn proprietary_meta<'a, 'input>(
    document: &'a Document<'input>,
) -> Option<Node<'a, 'input>> {
    find_by_path(meta(document)?, "proprietary/meta")
}

/// Parse an ISO date attribute or text, logging values that do not parse.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(value, "ignoring malformed date");
            None
        }
    }
}

/// Text of a single element directly under `ris:meta`.
pub(crate) fn ris_text(document: &Document<'_>, tag: &str) -> Option<String> {
    non_blank_text(find_child(proprietary_meta(document)?, local(tag))?)
}

/// Text items of a list container directly under `ris:meta`.
pub(crate) fn ris_list(
    document: &Document<'_>,
    container: &str,
    item: &'static str,
) -> Vec<String> {
    proprietary_meta(document)
        .and_then(|ris_meta| find_child(ris_meta, local(container)))
        .map(|list| {
            find_children(list, local(item))
                .filter_map(non_blank_text)
                .collect()
        })
        .unwrap_or_default()
}

/// Text of `akn:p` children joined by newlines, `None` when all are blank.
///
/// Lines are kept untrimmed; a whitespace-only paragraph reads as an empty line.
pub(crate) fn paragraphs(container: Node<'_, '_>) -> Option<String> {
    let lines: Vec<&str> = find_children(container, local(P))
        .map(|p| p.text().filter(|t| !t.trim().is_empty()).unwrap_or_default())
        .collect();
    if lines.iter().all(|line| line.is_empty()) {
        return None;
    }
    Some(lines.join("\n"))
}

/// `akn:keyword` values of the classification discriminated by `source`.
pub(crate) fn classification_values(document: &Document<'_>, source: &str) -> Vec<String> {
    meta(document)
        .and_then(|meta| find_child_with_attribute(meta, local(CLASSIFICATION), "source", source))
        .map(|classification| {
            find_children(classification, local(KEYWORD))
                .filter_map(|keyword| get_attribute(keyword, "value"))
                .map(|value| value.trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Texts of the notes discriminated by `source`, one per `akn:note`.
pub(crate) fn note_texts(document: &Document<'_>, source: &str) -> Vec<String> {
    meta(document)
        .and_then(|meta| find_child_with_attribute(meta, local(NOTES), "source", source))
        .map(|notes| {
            find_children(notes, local(NOTE))
                .filter_map(paragraphs)
                .collect()
        })
        .unwrap_or_default()
}

/// Payload elements of all reference entries of one kind, in document order.
pub(crate) fn reference_payloads<'a, 'input>(
    document: &'a Document<'input>,
    kind: &str,
) -> Vec<Node<'a, 'input>> {
    let Some(analysis) = meta(document).and_then(|meta| find_child(meta, local(ANALYSIS))) else {
        return Vec::new();
    };
    let kind = local(kind);

    find_children(analysis, local(OTHER_REFERENCES))
        .flat_map(|group| find_children(group, local(IMPLICIT_REFERENCE)))
        .filter_map(|reference| element_children(reference).next())
        .filter(|payload| has_tag(*payload, kind))
        .collect()
}

/// `ris:singleNorm` children of a reference payload, skipping empty ones.
pub(crate) fn single_norms_of(payload: Node<'_, '_>) -> Vec<SingleNorm> {
    find_children(payload, local(SINGLE_NORM))
        .map(|node| SingleNorm {
            single_norm: get_attribute(node, "singleNorm").map(str::to_string),
            date_of_version: get_attribute(node, "dateOfVersion").and_then(parse_date),
            date_of_relevance: get_attribute(node, "dateOfRelevance").map(str::to_string),
        })
        .filter(|single_norm| !single_norm.is_empty())
        .collect()
}

/// Document number from `FRBRWork/FRBRthis`.
pub fn transform_document_number(document: &Document<'_>) -> Option<String> {
    let this = find_by_path(meta(document)?, "identification/FRBRWork/FRBRthis")?;
    get_attribute(this, "value").map(str::to_string)
}

/// Internal id from the `uebergreifende-id` FRBR alias.
pub fn transform_id(document: &Document<'_>) -> Option<Uuid> {
    let work = find_by_path(meta(document)?, "identification/FRBRWork")?;
    let alias =
        find_child_with_attribute(work, local(FRBR_ALIAS), "name", ALIAS_UEBERGREIFENDE_ID)?;
    let value = get_attribute(alias, "value")?;
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            warn!(value, "ignoring malformed uebergreifende-id");
            None
        }
    }
}

/// Main title from `akn:preface/akn:longTitle`.
pub fn transform_long_title(document: &Document<'_>) -> Option<String> {
    let long_title = find_by_path(document.root_element(), "doc/preface/longTitle")?;
    paragraphs(long_title)
}

/// Abstract from the `kurzreferat` container of the main body.
pub fn transform_kurzreferat(document: &Document<'_>) -> Option<String> {
    let main_body = find_by_path(document.root_element(), "doc/mainBody")?;
    let container =
        find_child_with_attribute(main_body, local(HCONTAINER), "name", NAME_KURZREFERAT)?;
    paragraphs(container)
}

/// Periodical citations.
pub fn transform_fundstellen(document: &Document<'_>) -> Vec<Fundstelle> {
    reference_payloads(document, FUNDSTELLE)
        .into_iter()
        .filter_map(|payload| {
            Some(Fundstelle {
                periodikum: get_attribute(payload, "periodikum")?.to_string(),
                zitatstelle: get_attribute(payload, "zitatstelle")
                    .unwrap_or_default()
                    .to_string(),
            })
        })
        .collect()
}

/// Norm references, one per reference entry.
pub fn transform_norm_references(document: &Document<'_>) -> Vec<NormReference> {
    reference_payloads(document, NORM_REFERENCE)
        .into_iter()
        .filter_map(|payload| {
            let Some(abbreviation) = get_attribute(payload, "normAbbreviation") else {
                warn!("skipping norm reference without abbreviation");
                return None;
            };
            Some(NormReference::new(abbreviation).with_single_norms(single_norms_of(payload)))
        })
        .collect()
}
