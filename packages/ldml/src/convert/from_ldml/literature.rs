//! Transformers for literature records.

use roxmltree::Document;
use tracing::warn;

use super::common::{
    classification_values, note_texts, ris_list, ris_text, transform_document_number,
    transform_fundstellen, transform_id, transform_kurzreferat, transform_long_title,
    transform_norm_references,
};
use crate::convert::vocabulary::*;
use crate::lookup::DocumentTypeLookup;
use crate::model::{
    DocumentCategory, DocumentType, LiteratureContent, SliDocumentationUnitContent,
    UliDocumentationUnitContent,
};

pub(crate) fn read_uli(
    document: &Document<'_>,
    lookup: &dyn DocumentTypeLookup,
) -> UliDocumentationUnitContent {
    UliDocumentationUnitContent {
        literature: read_common(document, lookup, DocumentCategory::LiteraturUnselbstaendig),
        fundstellen: transform_fundstellen(document),
    }
}

pub(crate) fn read_sli(
    document: &Document<'_>,
    lookup: &dyn DocumentTypeLookup,
) -> SliDocumentationUnitContent {
    SliDocumentationUnitContent {
        literature: read_common(document, lookup, DocumentCategory::LiteraturSelbstaendig),
        herausgeber: transform_herausgeber(document),
    }
}

fn read_common(
    document: &Document<'_>,
    lookup: &dyn DocumentTypeLookup,
    category: DocumentCategory,
) -> LiteratureContent {
    LiteratureContent {
        id: transform_id(document),
        document_number: transform_document_number(document),
        veroeffentlichungsjahre: transform_veroeffentlichungsjahre(document),
        dokumenttypen: transform_dokumenttypen(document, lookup, category),
        hauptsachtitel: transform_long_title(document),
        hauptsachtitel_zusatz: ris_text(document, HAUPTSACHTITEL_ZUSATZ),
        dokumentarischer_titel: ris_text(document, DOKUMENTARISCHER_TITEL),
        verfasser: transform_verfasser(document),
        gesamtfussnoten: note_texts(document, SOURCE_GESAMTFUSSNOTEN),
        kurzreferat: transform_kurzreferat(document),
        norm_references: transform_norm_references(document),
    }
}

/// Document types of the `doktyp` classification, resolved through the lookup.
///
/// Codes the lookup does not know are dropped.
pub fn transform_dokumenttypen(
    document: &Document<'_>,
    lookup: &dyn DocumentTypeLookup,
    category: DocumentCategory,
) -> Vec<DocumentType> {
    classification_values(document, SOURCE_DOKTYP)
        .into_iter()
        .filter_map(|code| {
            let resolved = lookup.resolve_document_type(&code, category);
            if resolved.is_none() {
                warn!(code = %code, category = %category, "unknown document type");
            }
            resolved
        })
        .collect()
}

pub fn transform_veroeffentlichungsjahre(document: &Document<'_>) -> Vec<String> {
    ris_list(document, VEROEFFENTLICHUNGSJAHRE, VEROEFFENTLICHUNGSJAHR)
}

pub fn transform_verfasser(document: &Document<'_>) -> Vec<String> {
    ris_list(document, VERFASSER_LISTE, VERFASSER)
}

pub fn transform_herausgeber(document: &Document<'_>) -> Vec<String> {
    ris_list(document, HERAUSGEBER_LISTE, HERAUSGEBER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::InMemoryDocumentTypeLookup;

    const XML: &str = r#"<akn:akomaNtoso xmlns:akn="http://docs.oasis-open.org/legaldocml/ns/akn/3.0" xmlns:ris="http://ldml.neuris.de/literature/selbstaendig/metadata/">
  <akn:doc name="offene-struktur">
    <akn:meta>
      <akn:classification source="doktyp">
        <akn:keyword value="Bib" showAs="Bib" dictionary="attributsemantik-noch-undefiniert"/>
        <akn:keyword value="Unbekannt" showAs="Unbekannt" dictionary="attributsemantik-noch-undefiniert"/>
      </akn:classification>
      <akn:notes source="gesamtfussnoten">
        <akn:note><akn:p>Fussnote eins</akn:p></akn:note>
        <akn:note><akn:p>Fussnote zwei</akn:p></akn:note>
      </akn:notes>
      <akn:proprietary>
        <ris:meta>
          <ris:veroeffentlichungsjahre>
            <ris:veroeffentlichungsjahr>2023</ris:veroeffentlichungsjahr>
            <ris:veroeffentlichungsjahr>2024</ris:veroeffentlichungsjahr>
          </ris:veroeffentlichungsjahre>
          <ris:herausgeberListe>
            <ris:herausgeber>Verlag</ris:herausgeber>
          </ris:herausgeberListe>
        </ris:meta>
      </akn:proprietary>
    </akn:meta>
  </akn:doc>
</akn:akomaNtoso>"#;

    #[test]
    fn test_read_sli() {
        let document = Document::parse(XML).unwrap();
        let lookup = InMemoryDocumentTypeLookup::new().with(
            DocumentCategory::LiteraturSelbstaendig,
            DocumentType::new("Bib", "Bibliographie"),
        );
        let content = read_sli(&document, &lookup);

        assert_eq!(
            content.literature.dokumenttypen,
            vec![DocumentType::new("Bib", "Bibliographie")]
        );
        assert_eq!(content.literature.veroeffentlichungsjahre, vec!["2023", "2024"]);
        assert_eq!(
            content.literature.gesamtfussnoten,
            vec!["Fussnote eins", "Fussnote zwei"]
        );
        assert_eq!(content.herausgeber, vec!["Verlag"]);
        assert!(content.literature.verfasser.is_empty());
        assert_eq!(content.literature.hauptsachtitel, None);
    }

    #[test]
    fn test_document_types_resolve_per_category() {
        let document = Document::parse(XML).unwrap();
        let lookup = InMemoryDocumentTypeLookup::new().with(
            DocumentCategory::LiteraturSelbstaendig,
            DocumentType::new("Bib", "Bibliographie"),
        );
        assert!(
            transform_dokumenttypen(&document, &lookup, DocumentCategory::LiteraturUnselbstaendig)
                .is_empty()
        );
    }
}
