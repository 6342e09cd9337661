//! Field writers shared by all documentation unit categories.
//!
//! Every writer has replace semantics: it removes what a previous pass
//! wrote for the same field, then writes the new value. Empty values leave
//! no container behind.

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT;
use crate::convert::vocabulary::*;
use crate::error::Result;
use crate::model::{Fundstelle, NormReference, SingleNorm};
use crate::skeleton::LdmlDocument;
use crate::xml::{ElementTemplate, NodeId, XmlTree};

const FRBR_AUTHOR_HREF: &str = "recht.bund.de";
const FRBR_COUNTRY_CODE: &str = "de";
const FRBR_LANGUAGE_CODE: &str = "deu";

/// One entry of the shared reference group: the `akn:implicitReference`
/// wrapper and the proprietary element carrying the business attributes.
pub(crate) struct ReferenceEntry {
    pub label: String,
    pub payload: ElementTemplate,
    /// Children of the payload element, in order.
    pub children: Vec<ElementTemplate>,
}

/// Trimmed, non-blank values of a list field.
pub(crate) fn non_blank(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Trimmed value of an optional field, `None` when blank.
pub(crate) fn non_blank_opt(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Remove the child of `parent` equal to `template`, if any.
pub(crate) fn remove_container(
    tree: &mut XmlTree,
    parent: NodeId,
    template: &ElementTemplate,
) -> Result<()> {
    if let Some(existing) = tree.find_matching_child(parent, template) {
        tree.detach(existing)?;
    }
    Ok(())
}

/// Get or create the child equal to `template` and drop its old children.
pub(crate) fn recreate_container(
    tree: &mut XmlTree,
    parent: NodeId,
    template: ElementTemplate,
) -> Result<NodeId> {
    let container = tree.insert_once(parent, template)?;
    tree.clear_children(container)?;
    Ok(container)
}

/// Document number recorded in `FRBRWork/FRBRthis`, if any.
pub(crate) fn identified_document_number(document: &LdmlDocument) -> Option<&str> {
    let tree = document.tree();
    let path = format!("{IDENTIFICATION}/{FRBR_WORK}/{FRBR_THIS}");
    let this = tree.find_by_path(document.meta(), &path)?;
    tree.attribute(this, "value")
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Rewrite `akn:identification` for `document_number`.
pub(crate) fn write_identification(
    document: &mut LdmlDocument,
    document_number: &str,
    id: Option<Uuid>,
    erfassungsdatum: NaiveDate,
) -> Result<()> {
    let meta = document.meta();
    let tree = document.tree_mut();
    for existing in tree.find_children(meta, IDENTIFICATION) {
        tree.detach(existing)?;
    }

    let identification = tree.insert_ordered(
        meta,
        ElementTemplate::new(IDENTIFICATION)
            .with_attribute("source", ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT),
    )?;
    let date = erfassungsdatum.format("%Y-%m-%d").to_string();

    let levels = [
        (FRBR_WORK, document_number.to_string()),
        (FRBR_EXPRESSION, format!("{document_number}/dokument")),
        (FRBR_MANIFESTATION, format!("{document_number}/dokument.xml")),
    ];
    for (level, this) in levels {
        let node = tree.insert_ordered(identification, ElementTemplate::new(level))?;
        tree.insert_ordered(node, ElementTemplate::new(FRBR_THIS).with_attribute("value", &this))?;
        tree.insert_ordered(node, ElementTemplate::new(FRBR_URI).with_attribute("value", &this))?;
        tree.insert_ordered(
            node,
            ElementTemplate::new(FRBR_DATE)
                .with_attribute("date", &date)
                .with_attribute("name", DATE_ERFASSUNGSDATUM),
        )?;
        tree.insert_ordered(
            node,
            ElementTemplate::new(FRBR_AUTHOR).with_attribute("href", FRBR_AUTHOR_HREF),
        )?;

        match level {
            FRBR_WORK => {
                if let Some(id) = id {
                    tree.insert_ordered(
                        node,
                        ElementTemplate::new(FRBR_ALIAS)
                            .with_attribute("name", ALIAS_UEBERGREIFENDE_ID)
                            .with_attribute("value", id.to_string()),
                    )?;
                }
                tree.insert_ordered(
                    node,
                    ElementTemplate::new(FRBR_COUNTRY).with_attribute("value", FRBR_COUNTRY_CODE),
                )?;
            }
            FRBR_EXPRESSION => {
                tree.insert_ordered(
                    node,
                    ElementTemplate::new(FRBR_LANGUAGE)
                        .with_attribute("language", FRBR_LANGUAGE_CODE),
                )?;
            }
            _ => {
                tree.insert_ordered(
                    node,
                    ElementTemplate::new(FRBR_FORMAT).with_attribute("value", "xml"),
                )?;
            }
        }
    }
    Ok(())
}

/// Replace the `akn:longTitle` of the preface.
pub(crate) fn write_long_title(document: &mut LdmlDocument, title: Option<&String>) -> Result<()> {
    let preface = document.preface();
    let tree = document.tree_mut();
    for existing in tree.find_children(preface, LONG_TITLE) {
        tree.detach(existing)?;
    }

    if let Some(title) = non_blank_opt(title) {
        let long_title = tree.insert_ordered(preface, ElementTemplate::new(LONG_TITLE))?;
        tree.insert_text_element(long_title, ElementTemplate::new(P), title)?;
    }
    Ok(())
}

/// Replace a named container holding one `akn:p` per line.
///
/// Lines keep their indentation. Whitespace-only lines become empty paragraphs.
pub(crate) fn write_paragraphs(
    tree: &mut XmlTree,
    parent: NodeId,
    tag: &str,
    name: &str,
    text: Option<&String>,
) -> Result<()> {
    let template = ElementTemplate::new(tag).with_attribute("name", name);
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return remove_container(tree, parent, &template);
    };

    let container = recreate_container(tree, parent, template)?;
    for line in text.lines() {
        let p = tree.insert_ordered(container, ElementTemplate::new(P))?;
        if !line.trim().is_empty() {
            tree.append_text(p, line)?;
        }
    }
    Ok(())
}

/// Replace the keyword classification discriminated by `source`.
pub(crate) fn write_classification(
    document: &mut LdmlDocument,
    source: &str,
    values: &[&str],
) -> Result<()> {
    let meta = document.meta();
    let tree = document.tree_mut();
    let template = ElementTemplate::new(CLASSIFICATION).with_attribute("source", source);
    if values.is_empty() {
        return remove_container(tree, meta, &template);
    }

    let classification = recreate_container(tree, meta, template)?;
    for value in values {
        tree.insert_ordered(
            classification,
            ElementTemplate::new(KEYWORD)
                .with_attribute("dictionary", ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT)
                .with_attribute("showAs", *value)
                .with_attribute("value", *value),
        )?;
    }
    debug!(source, count = values.len(), "wrote classification");
    Ok(())
}

/// Replace the notes container discriminated by `source`, one note per entry.
pub(crate) fn write_notes(document: &mut LdmlDocument, source: &str, notes: &[&str]) -> Result<()> {
    let meta = document.meta();
    let tree = document.tree_mut();
    let template = ElementTemplate::new(NOTES).with_attribute("source", source);
    if notes.is_empty() {
        return remove_container(tree, meta, &template);
    }

    let container = recreate_container(tree, meta, template)?;
    for text in notes {
        let note = tree.insert_ordered(container, ElementTemplate::new(NOTE))?;
        tree.insert_text_element(note, ElementTemplate::new(P), *text)?;
    }
    Ok(())
}

/// Replace a single text element under `ris:meta`.
pub(crate) fn write_ris_text(
    document: &mut LdmlDocument,
    tag: &str,
    value: Option<&str>,
) -> Result<()> {
    if let Some(ris_meta) = document.proprietary() {
        let tree = document.tree_mut();
        for existing in tree.find_children(ris_meta, tag) {
            tree.detach(existing)?;
        }
    }

    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        let ris_meta = document.proprietary_or_create()?;
        document
            .tree_mut()
            .insert_text_element(ris_meta, ElementTemplate::new(tag), value)?;
    }
    Ok(())
}

/// Replace a list container under `ris:meta` with one text item per value.
pub(crate) fn write_ris_list(
    document: &mut LdmlDocument,
    container: &str,
    item: &str,
    values: &[&str],
) -> Result<()> {
    let template = ElementTemplate::new(container);
    if values.is_empty() {
        if let Some(ris_meta) = document.proprietary() {
            remove_container(document.tree_mut(), ris_meta, &template)?;
        }
        return Ok(());
    }

    let ris_meta = document.proprietary_or_create()?;
    let tree = document.tree_mut();
    let list = recreate_container(tree, ris_meta, template)?;
    for value in values {
        tree.insert_text_element(list, ElementTemplate::new(item), *value)?;
    }
    Ok(())
}

/// Replace all entries of one kind in the shared reference group.
///
/// Entries of other kinds (and anything the converter does not own) stay.
pub(crate) fn write_references(
    document: &mut LdmlDocument,
    kind: &str,
    entries: Vec<ReferenceEntry>,
) -> Result<()> {
    if let Some(group) = document.other_references() {
        document
            .tree_mut()
            .retain_children(group, |tree, child| !is_reference_of_kind(tree, child, kind))?;
    }
    if entries.is_empty() {
        return Ok(());
    }

    let group = document.other_references_or_create()?;
    let tree = document.tree_mut();
    for entry in entries {
        let reference = tree.insert_ordered(
            group,
            ElementTemplate::new(IMPLICIT_REFERENCE)
                .with_optional_attribute("shortForm", Some(entry.label.as_str()))
                .with_optional_attribute("showAs", Some(entry.label.as_str())),
        )?;
        let payload = tree.insert_ordered(reference, entry.payload)?;
        for child in entry.children {
            tree.insert_ordered(payload, child)?;
        }
    }
    debug!(kind, "wrote reference entries");
    Ok(())
}

fn is_reference_of_kind(tree: &XmlTree, node: NodeId, kind: &str) -> bool {
    tree.has_tag(node, IMPLICIT_REFERENCE)
        && tree
            .element_children(node)
            .next()
            .is_some_and(|payload| tree.has_tag(payload, kind))
}

/// `ris:singleNorm` element carrying the attributes of one single norm.
fn single_norm_template(single_norm: &SingleNorm) -> ElementTemplate {
    let date_of_version = single_norm
        .date_of_version
        .map(|d| d.format("%Y-%m-%d").to_string());
    ElementTemplate::new(SINGLE_NORM)
        .with_optional_attribute("singleNorm", single_norm.single_norm.as_deref())
        .with_optional_attribute("dateOfVersion", date_of_version.as_deref())
        .with_optional_attribute("dateOfRelevance", single_norm.date_of_relevance.as_deref())
}

/// One entry per norm-like reference, its single norms nested inside.
pub(crate) fn norm_entries<'a>(
    kind: &str,
    references: impl IntoIterator<Item = (&'a str, &'a [SingleNorm], Option<&'a str>)>,
) -> Vec<ReferenceEntry> {
    let mut entries = Vec::new();
    for (abbreviation, single_norms, reference_type) in references {
        let abbreviation = abbreviation.trim();
        if abbreviation.is_empty() {
            warn!(kind, "skipping norm reference without abbreviation");
            continue;
        }

        let single_norms: Vec<&SingleNorm> =
            single_norms.iter().filter(|n| !n.is_empty()).collect();
        let norms: Vec<&str> = single_norms
            .iter()
            .filter_map(|n| n.single_norm.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        let label = if norms.is_empty() {
            abbreviation.to_string()
        } else {
            format!("{abbreviation} {}", norms.join(", "))
        };

        entries.push(ReferenceEntry {
            label,
            payload: ElementTemplate::new(kind)
                .with_optional_attribute("referenceType", reference_type)
                .with_attribute("normAbbreviation", abbreviation),
            children: single_norms.into_iter().map(single_norm_template).collect(),
        });
    }
    entries
}

/// Write plain norm references.
pub(crate) fn write_norm_references(
    document: &mut LdmlDocument,
    references: &[NormReference],
) -> Result<()> {
    let entries = norm_entries(
        NORM_REFERENCE,
        references
            .iter()
            .map(|r| (r.norm_abbreviation.as_str(), r.single_norms.as_slice(), None)),
    );
    write_references(document, NORM_REFERENCE, entries)
}

/// Write periodical citations.
pub(crate) fn write_fundstellen(
    document: &mut LdmlDocument,
    fundstellen: &[Fundstelle],
) -> Result<()> {
    let entries = fundstellen
        .iter()
        .filter(|f| !f.periodikum.trim().is_empty())
        .map(|f| ReferenceEntry {
            label: f.label(),
            payload: ElementTemplate::new(FUNDSTELLE)
                .with_attribute("periodikum", f.periodikum.trim())
                .with_optional_attribute("zitatstelle", Some(f.zitatstelle.as_str())),
            children: Vec::new(),
        })
        .collect();
    write_references(document, FUNDSTELLE, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentCategory;
    use crate::xml::CanonicalOrderTable;

    fn document() -> LdmlDocument {
        LdmlDocument::new(
            DocumentCategory::Verwaltungsvorschrift,
            CanonicalOrderTable::default_table(),
        )
        .unwrap()
    }

    #[test]
    fn test_classification_replaced_not_duplicated() {
        let mut document = document();
        write_classification(&mut document, SOURCE_SCHLAGWORT, &["a", "b"]).unwrap();
        write_classification(&mut document, SOURCE_SCHLAGWORT, &["c"]).unwrap();

        let tree = document.tree();
        let containers = tree.find_children(document.meta(), CLASSIFICATION);
        assert_eq!(containers.len(), 1);
        assert_eq!(tree.find_children(containers[0], KEYWORD).len(), 1);
    }

    #[test]
    fn test_empty_classification_leaves_no_container() {
        let mut document = document();
        write_classification(&mut document, SOURCE_SCHLAGWORT, &["a"]).unwrap();
        write_classification(&mut document, SOURCE_SCHLAGWORT, &[]).unwrap();

        assert!(document
            .tree()
            .find_child(document.meta(), CLASSIFICATION)
            .is_none());
    }

    #[test]
    fn test_classifications_with_distinct_sources_coexist() {
        let mut document = document();
        write_classification(&mut document, SOURCE_SCHLAGWORT, &["a"]).unwrap();
        write_classification(&mut document, SOURCE_DOKTYP, &["VR"]).unwrap();

        assert_eq!(
            document
                .tree()
                .find_children(document.meta(), CLASSIFICATION)
                .len(),
            2
        );
    }

    #[test]
    fn test_write_references_keeps_other_kinds() {
        let mut document = document();
        write_fundstellen(
            &mut document,
            &[Fundstelle {
                periodikum: "BAnz".to_string(),
                zitatstelle: "2024, 1".to_string(),
            }],
        )
        .unwrap();
        write_norm_references(&mut document, &[NormReference::new("BGB")]).unwrap();
        write_norm_references(&mut document, &[]).unwrap();

        let tree = document.tree();
        let group = document.other_references().unwrap();
        let entries = tree.find_children(group, IMPLICIT_REFERENCE);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            tree.attribute(entries[0], "shortForm"),
            Some("BAnz 2024, 1")
        );
    }

    #[test]
    fn test_norm_entries_nest_single_norms() {
        let reference = NormReference::new("BGB").with_single_norms(vec![
            SingleNorm::new("§ 1"),
            SingleNorm::default(),
            SingleNorm {
                single_norm: Some("§ 2".to_string()),
                date_of_version: NaiveDate::from_ymd_opt(2020, 1, 1),
                date_of_relevance: Some("2019".to_string()),
            },
        ]);
        let bare: &[SingleNorm] = &[];
        let entries = norm_entries(
            NORM_REFERENCE,
            [
                (
                    reference.norm_abbreviation.as_str(),
                    reference.single_norms.as_slice(),
                    None,
                ),
                ("BGB", bare, None),
            ],
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "BGB § 1, § 2");
        assert_eq!(entries[0].children.len(), 2);
        let attributes = entries[0].children[1].attributes();
        assert_eq!(attributes.get("dateOfVersion").map(String::as_str), Some("2020-01-01"));
        assert_eq!(attributes.get("dateOfRelevance").map(String::as_str), Some("2019"));
        assert_eq!(entries[1].label, "BGB");
        assert!(entries[1].children.is_empty());
    }

    #[test]
    fn test_write_ris_text_replaces() {
        let mut document = document();
        write_ris_text(&mut document, DOKUMENTARISCHER_TITEL, Some("eins")).unwrap();
        write_ris_text(&mut document, DOKUMENTARISCHER_TITEL, Some("zwei")).unwrap();

        let ris_meta = document.proprietary().unwrap();
        let titles = document.tree().find_children(ris_meta, DOKUMENTARISCHER_TITEL);
        assert_eq!(titles.len(), 1);
        assert_eq!(document.tree().text(titles[0]).as_deref(), Some("zwei"));

        write_ris_text(&mut document, DOKUMENTARISCHER_TITEL, Some("   ")).unwrap();
        assert!(document.tree().children(ris_meta).is_empty());
    }

    #[test]
    fn test_write_paragraphs_per_line() {
        let mut document = document();
        let body = document.main_body();
        let text = "erste Zeile\n\ndritte Zeile".to_string();
        write_paragraphs(document.tree_mut(), body, HCONTAINER, NAME_KURZREFERAT, Some(&text))
            .unwrap();

        let tree = document.tree();
        let container = tree.find_child(body, HCONTAINER).unwrap();
        assert_eq!(tree.find_children(container, P).len(), 3);
    }
}
