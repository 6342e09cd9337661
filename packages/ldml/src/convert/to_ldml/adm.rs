//! Writers for administrative regulations (Verwaltungsvorschriften).

use chrono::NaiveDate;
use tracing::warn;

use super::common::{
    non_blank, non_blank_opt, norm_entries, recreate_container, remove_container,
    write_classification, write_fundstellen, write_long_title, write_norm_references,
    write_notes, write_paragraphs, write_references, write_ris_list, write_ris_text,
    ReferenceEntry,
};
use crate::config::ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT;
use crate::convert::vocabulary::*;
use crate::error::Result;
use crate::model::{
    ActiveCitation, AdmDocumentationUnitContent, DocumentType, FieldOfLaw, Normgeber,
};
use crate::skeleton::LdmlDocument;
use crate::xml::ElementTemplate;

/// Write every business-owned field of an administrative regulation.
pub(crate) fn write(
    document: &mut LdmlDocument,
    content: &AdmDocumentationUnitContent,
) -> Result<()> {
    write_long_title(document, content.langueberschrift.as_ref())?;
    write_dokumenttyp(
        document,
        content.dokumenttyp.as_ref(),
        non_blank_opt(content.dokumenttyp_zusatz.as_ref()),
    )?;
    write_lifecycle(document, content.inkrafttretedatum, content.ausserkrafttretedatum)?;

    let preface = document.preface();
    write_paragraphs(
        document.tree_mut(),
        preface,
        CONTAINER,
        NAME_GLIEDERUNG,
        content.gliederung.as_ref(),
    )?;
    let main_body = document.main_body();
    write_paragraphs(
        document.tree_mut(),
        main_body,
        HCONTAINER,
        NAME_KURZREFERAT,
        content.kurzreferat.as_ref(),
    )?;

    write_classification(document, SOURCE_SCHLAGWORT, &non_blank(&content.keywords))?;
    let note: Vec<&str> = non_blank_opt(content.note.as_ref()).into_iter().collect();
    write_notes(document, SOURCE_NOTIZ, &note)?;

    write_normgeber(document, &content.normgeber_list)?;
    let zitierdaten: Vec<String> = content
        .zitierdaten
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    write_ris_list(document, ZITIERDATEN, ZITIERDATUM, &non_blank(&zitierdaten))?;
    write_ris_list(
        document,
        AKTENZEICHEN_LISTE,
        AKTENZEICHEN,
        &non_blank(&content.aktenzeichen),
    )?;
    write_fields_of_law(document, &content.fields_of_law)?;
    write_ris_list(document, BERUFSBILDER, BERUFSBILD, &non_blank(&content.berufsbilder))?;
    write_ris_list(document, TITELASPEKTE, TITELASPEKT, &non_blank(&content.titelaspekte))?;
    write_ris_list(document, DEFINITIONEN, DEFINITION, &non_blank(&content.definitionen))?;

    write_fundstellen(document, &content.fundstellen)?;
    write_norm_references(document, &content.norm_references)?;
    let active = norm_entries(
        ACTIVE_REFERENCE,
        content.active_references.iter().map(|r| {
            (
                r.norm_abbreviation.as_str(),
                r.single_norms.as_slice(),
                Some(r.reference_type.as_str()),
            )
        }),
    );
    write_references(document, ACTIVE_REFERENCE, active)?;
    write_active_citations(document, &content.active_citations)?;
    Ok(())
}

/// `ris:dokumentTyp category="<code>"` carrying the optional Zusatz as text.
fn write_dokumenttyp(
    document: &mut LdmlDocument,
    dokumenttyp: Option<&DocumentType>,
    zusatz: Option<&str>,
) -> Result<()> {
    if let Some(ris_meta) = document.proprietary() {
        let tree = document.tree_mut();
        for existing in tree.find_children(ris_meta, DOKUMENT_TYP) {
            tree.detach(existing)?;
        }
    }

    let Some(code) = dokumenttyp.map(|t| t.abbreviation.trim()).filter(|c| !c.is_empty()) else {
        if zusatz.is_some() {
            warn!("dropping dokumenttypZusatz without dokumenttyp");
        }
        return Ok(());
    };

    let ris_meta = document.proprietary_or_create()?;
    let tree = document.tree_mut();
    let node = tree.insert_ordered(
        ris_meta,
        ElementTemplate::new(DOKUMENT_TYP).with_attribute("category", code),
    )?;
    if let Some(zusatz) = zusatz {
        tree.append_text(node, zusatz)?;
    }
    Ok(())
}

fn write_lifecycle(
    document: &mut LdmlDocument,
    inkrafttreten: Option<NaiveDate>,
    ausserkrafttreten: Option<NaiveDate>,
) -> Result<()> {
    let meta = document.meta();
    let tree = document.tree_mut();
    let template =
        ElementTemplate::new(LIFECYCLE).with_attribute("source", ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT);

    let events: Vec<(&str, &str, NaiveDate)> = [
        (EVENT_INKRAFTTRETEN, "generation", inkrafttreten),
        (EVENT_AUSSERKRAFTTRETEN, "repeal", ausserkrafttreten),
    ]
    .into_iter()
    .filter_map(|(refers_to, kind, date)| date.map(|d| (refers_to, kind, d)))
    .collect();

    if events.is_empty() {
        return remove_container(tree, meta, &template);
    }

    let lifecycle = recreate_container(tree, meta, template)?;
    for (refers_to, kind, date) in events {
        tree.insert_ordered(
            lifecycle,
            ElementTemplate::new(EVENT_REF)
                .with_attribute("date", date.format("%Y-%m-%d").to_string())
                .with_attribute("refersTo", refers_to)
                .with_attribute("source", ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT)
                .with_attribute("type", kind),
        )?;
    }
    Ok(())
}

/// `ris:normgeberListe` with one `ris:normgeber` per entry and its regions.
fn write_normgeber(document: &mut LdmlDocument, normgeber_list: &[Normgeber]) -> Result<()> {
    let entries: Vec<&Normgeber> = normgeber_list
        .iter()
        .filter(|n| !n.institution.name.trim().is_empty())
        .collect();
    let template = ElementTemplate::new(NORMGEBER_LISTE);
    if entries.is_empty() {
        if let Some(ris_meta) = document.proprietary() {
            remove_container(document.tree_mut(), ris_meta, &template)?;
        }
        return Ok(());
    }

    let ris_meta = document.proprietary_or_create()?;
    let tree = document.tree_mut();
    let list = recreate_container(tree, ris_meta, template)?;
    for normgeber in entries {
        let institution = &normgeber.institution;
        let node = tree.insert_ordered(
            list,
            ElementTemplate::new(NORMGEBER)
                .with_attribute("institution", institution.name.trim())
                .with_optional_attribute("officialName", institution.official_name.as_deref())
                .with_attribute("type", institution.institution_type.as_str()),
        )?;
        for region in normgeber.regions.iter().filter(|r| !r.code.trim().is_empty()) {
            tree.insert_ordered(
                node,
                ElementTemplate::new(REGION)
                    .with_attribute("code", region.code.trim())
                    .with_optional_attribute("longText", region.long_text.as_deref()),
            )?;
        }
    }
    Ok(())
}

/// `ris:sachgebiete` with `ris:sachgebiet notation="<id>"` carrying the text.
fn write_fields_of_law(document: &mut LdmlDocument, fields_of_law: &[FieldOfLaw]) -> Result<()> {
    let entries: Vec<&FieldOfLaw> = fields_of_law
        .iter()
        .filter(|f| !f.identifier.trim().is_empty())
        .collect();
    let template = ElementTemplate::new(SACHGEBIETE);
    if entries.is_empty() {
        if let Some(ris_meta) = document.proprietary() {
            remove_container(document.tree_mut(), ris_meta, &template)?;
        }
        return Ok(());
    }

    let ris_meta = document.proprietary_or_create()?;
    let tree = document.tree_mut();
    let list = recreate_container(tree, ris_meta, template)?;
    for field in entries {
        let node = tree.insert_ordered(
            list,
            ElementTemplate::new(SACHGEBIET).with_attribute("notation", field.identifier.trim()),
        )?;
        if !field.text.trim().is_empty() {
            tree.append_text(node, field.text.trim())?;
        }
    }
    Ok(())
}

fn write_active_citations(document: &mut LdmlDocument, citations: &[ActiveCitation]) -> Result<()> {
    let entries = citations
        .iter()
        .filter_map(|citation| {
            let label = citation.label();
            if label.is_empty() && citation.document_number.is_none() {
                warn!("skipping empty active citation");
                return None;
            }
            let date = citation
                .decision_date
                .map(|d| d.format("%Y-%m-%d").to_string());
            let court = citation.typed_court();
            if court.is_none() && citation.court.is_some() {
                warn!(label = %label, "dropping court without court type");
            }
            Some(ReferenceEntry {
                label,
                payload: ElementTemplate::new(CASELAW_REFERENCE)
                    .with_optional_attribute("citationType", citation.citation_type.as_deref())
                    .with_optional_attribute("courtType", court.map(|c| c.court_type.as_str()))
                    .with_optional_attribute(
                        "courtLocation",
                        court.and_then(|c| c.location.as_deref()),
                    )
                    .with_optional_attribute("date", date.as_deref())
                    .with_optional_attribute("fileNumber", citation.file_number.as_deref())
                    .with_optional_attribute("documentNumber", citation.document_number.as_deref()),
                children: Vec::new(),
            })
        })
        .collect();
    write_references(document, CASELAW_REFERENCE, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Court, DocumentCategory, Institution, InstitutionType, Region};
    use crate::xml::CanonicalOrderTable;

    fn document() -> LdmlDocument {
        LdmlDocument::new(
            DocumentCategory::Verwaltungsvorschrift,
            CanonicalOrderTable::default_table(),
        )
        .unwrap()
    }

    #[test]
    fn test_lifecycle_events() {
        let mut document = document();
        write_lifecycle(&mut document, NaiveDate::from_ymd_opt(2024, 1, 1), None).unwrap();

        let tree = document.tree();
        let lifecycle = tree.find_child(document.meta(), LIFECYCLE).unwrap();
        let events = tree.find_children(lifecycle, EVENT_REF);
        assert_eq!(events.len(), 1);
        assert_eq!(tree.attribute(events[0], "refersTo"), Some(EVENT_INKRAFTTRETEN));
        assert_eq!(tree.attribute(events[0], "date"), Some("2024-01-01"));

        let mut document = document;
        write_lifecycle(&mut document, None, None).unwrap();
        assert!(document.tree().find_child(document.meta(), LIFECYCLE).is_none());
    }

    #[test]
    fn test_dokumenttyp_with_zusatz() {
        let mut document = document();
        write_dokumenttyp(
            &mut document,
            Some(&DocumentType::new("VR", "Verwaltungsregelung")),
            Some("Bekanntmachung"),
        )
        .unwrap();

        let ris_meta = document.proprietary().unwrap();
        let node = document.tree().find_child(ris_meta, DOKUMENT_TYP).unwrap();
        assert_eq!(document.tree().attribute(node, "category"), Some("VR"));
        assert_eq!(document.tree().text(node).as_deref(), Some("Bekanntmachung"));
    }

    #[test]
    fn test_normgeber_with_regions() {
        let mut document = document();
        let normgeber = Normgeber {
            institution: Institution {
                name: "Landesregierung".to_string(),
                official_name: None,
                institution_type: InstitutionType::LegalEntity,
            },
            regions: vec![Region {
                code: "NW".to_string(),
                long_text: Some("Nordrhein-Westfalen".to_string()),
            }],
        };
        write_normgeber(&mut document, &[normgeber]).unwrap();

        let tree = document.tree();
        let ris_meta = document.proprietary().unwrap();
        let node = tree
            .find_by_path(ris_meta, "ris:normgeberListe/ris:normgeber")
            .unwrap();
        assert_eq!(tree.attribute(node, "type"), Some("legal-entity"));
        assert_eq!(tree.attribute(node, "officialName"), None);
        let region = tree.find_child(node, REGION).unwrap();
        assert_eq!(tree.attribute(region, "code"), Some("NW"));
    }

    #[test]
    fn test_active_citation_attributes() {
        let mut document = document();
        let citation = ActiveCitation {
            citation_type: Some("Vergleiche".to_string()),
            file_number: Some("IV R 1/20".to_string()),
            ..ActiveCitation::default()
        };
        write_active_citations(&mut document, &[citation, ActiveCitation::default()]).unwrap();

        let tree = document.tree();
        let group = document.other_references().unwrap();
        let entries = tree.find_children(group, IMPLICIT_REFERENCE);
        assert_eq!(entries.len(), 1);
        let payload = tree.find_child(entries[0], CASELAW_REFERENCE).unwrap();
        assert_eq!(tree.attribute(payload, "fileNumber"), Some("IV R 1/20"));
        assert_eq!(tree.attribute(payload, "courtType"), None);
    }

    #[test]
    fn test_court_without_type_is_dropped() {
        let mut document = document();
        let citation = ActiveCitation {
            court: Some(Court {
                court_type: " ".to_string(),
                location: Some("Berlin".to_string()),
            }),
            file_number: Some("1 K 2/21".to_string()),
            ..ActiveCitation::default()
        };
        write_active_citations(&mut document, &[citation]).unwrap();

        let tree = document.tree();
        let group = document.other_references().unwrap();
        let entry = tree.find_child(group, IMPLICIT_REFERENCE).unwrap();
        assert_eq!(tree.attribute(entry, "showAs"), Some("1 K 2/21"));
        let payload = tree.find_child(entry, CASELAW_REFERENCE).unwrap();
        assert_eq!(tree.attribute(payload, "courtType"), None);
        assert_eq!(tree.attribute(payload, "courtLocation"), None);
    }
}
