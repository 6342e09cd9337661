//! Writers for literature records, shared by both literature kinds.

use super::common::{
    non_blank, non_blank_opt, write_classification, write_fundstellen, write_long_title,
    write_norm_references, write_notes, write_paragraphs, write_ris_list, write_ris_text,
};
use crate::convert::vocabulary::*;
use crate::error::Result;
use crate::model::{LiteratureContent, SliDocumentationUnitContent, UliDocumentationUnitContent};
use crate::skeleton::LdmlDocument;

/// Write an unselbständige Literatur record.
pub(crate) fn write_uli(
    document: &mut LdmlDocument,
    content: &UliDocumentationUnitContent,
) -> Result<()> {
    write_common(document, &content.literature)?;
    write_fundstellen(document, &content.fundstellen)
}

/// Write a selbständige Literatur record.
pub(crate) fn write_sli(
    document: &mut LdmlDocument,
    content: &SliDocumentationUnitContent,
) -> Result<()> {
    write_common(document, &content.literature)?;
    write_ris_list(
        document,
        HERAUSGEBER_LISTE,
        HERAUSGEBER,
        &non_blank(&content.herausgeber),
    )
}

fn write_common(document: &mut LdmlDocument, literature: &LiteratureContent) -> Result<()> {
    write_long_title(document, literature.hauptsachtitel.as_ref())?;

    let main_body = document.main_body();
    write_paragraphs(
        document.tree_mut(),
        main_body,
        HCONTAINER,
        NAME_KURZREFERAT,
        literature.kurzreferat.as_ref(),
    )?;

    let codes: Vec<String> = literature
        .dokumenttypen
        .iter()
        .map(|t| t.abbreviation.clone())
        .collect();
    write_classification(document, SOURCE_DOKTYP, &non_blank(&codes))?;
    write_notes(
        document,
        SOURCE_GESAMTFUSSNOTEN,
        &non_blank(&literature.gesamtfussnoten),
    )?;

    write_ris_list(
        document,
        VEROEFFENTLICHUNGSJAHRE,
        VEROEFFENTLICHUNGSJAHR,
        &non_blank(&literature.veroeffentlichungsjahre),
    )?;
    write_ris_text(
        document,
        HAUPTSACHTITEL_ZUSATZ,
        non_blank_opt(literature.hauptsachtitel_zusatz.as_ref()),
    )?;
    write_ris_text(
        document,
        DOKUMENTARISCHER_TITEL,
        non_blank_opt(literature.dokumentarischer_titel.as_ref()),
    )?;
    write_ris_list(document, VERFASSER_LISTE, VERFASSER, &non_blank(&literature.verfasser))?;

    write_norm_references(document, &literature.norm_references)
}
