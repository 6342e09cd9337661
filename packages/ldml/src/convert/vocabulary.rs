//! Element names and `source` discriminators shared by both conversion directions.
//!
//! Writers use the qualified names; readers match on local names, which
//! are the part after the prefix.

// Akoma Ntoso elements
pub const IDENTIFICATION: &str = "akn:identification";
pub const FRBR_WORK: &str = "akn:FRBRWork";
pub const FRBR_EXPRESSION: &str = "akn:FRBRExpression";
pub const FRBR_MANIFESTATION: &str = "akn:FRBRManifestation";
pub const FRBR_THIS: &str = "akn:FRBRthis";
pub const FRBR_URI: &str = "akn:FRBRuri";
pub const FRBR_ALIAS: &str = "akn:FRBRalias";
pub const FRBR_DATE: &str = "akn:FRBRdate";
pub const FRBR_AUTHOR: &str = "akn:FRBRauthor";
pub const FRBR_COUNTRY: &str = "akn:FRBRcountry";
pub const FRBR_LANGUAGE: &str = "akn:FRBRlanguage";
pub const FRBR_FORMAT: &str = "akn:FRBRformat";
pub const CLASSIFICATION: &str = "akn:classification";
pub const KEYWORD: &str = "akn:keyword";
pub const LIFECYCLE: &str = "akn:lifecycle";
pub const EVENT_REF: &str = "akn:eventRef";
pub const NOTES: &str = "akn:notes";
pub const NOTE: &str = "akn:note";
pub const IMPLICIT_REFERENCE: &str = "akn:implicitReference";
pub const LONG_TITLE: &str = "akn:longTitle";
pub const CONTAINER: &str = "akn:container";
pub const HCONTAINER: &str = "akn:hcontainer";
pub const P: &str = "akn:p";

// Proprietary (RIS) elements
pub const DOKUMENT_TYP: &str = "ris:dokumentTyp";
pub const VEROEFFENTLICHUNGSJAHRE: &str = "ris:veroeffentlichungsjahre";
pub const VEROEFFENTLICHUNGSJAHR: &str = "ris:veroeffentlichungsjahr";
pub const HAUPTSACHTITEL_ZUSATZ: &str = "ris:hauptsachtitelZusatz";
pub const DOKUMENTARISCHER_TITEL: &str = "ris:dokumentarischerTitel";
pub const VERFASSER_LISTE: &str = "ris:verfasserListe";
pub const VERFASSER: &str = "ris:verfasser";
pub const HERAUSGEBER_LISTE: &str = "ris:herausgeberListe";
pub const HERAUSGEBER: &str = "ris:herausgeber";
pub const NORMGEBER_LISTE: &str = "ris:normgeberListe";
pub const NORMGEBER: &str = "ris:normgeber";
pub const REGION: &str = "ris:region";
pub const ZITIERDATEN: &str = "ris:zitierdaten";
pub const ZITIERDATUM: &str = "ris:zitierdatum";
pub const AKTENZEICHEN_LISTE: &str = "ris:aktenzeichenListe";
pub const AKTENZEICHEN: &str = "ris:aktenzeichen";
pub const SACHGEBIETE: &str = "ris:sachgebiete";
pub const SACHGEBIET: &str = "ris:sachgebiet";
pub const BERUFSBILDER: &str = "ris:berufsbilder";
pub const BERUFSBILD: &str = "ris:berufsbild";
pub const TITELASPEKTE: &str = "ris:titelaspekte";
pub const TITELASPEKT: &str = "ris:titelaspekt";
pub const DEFINITIONEN: &str = "ris:definitionen";
pub const DEFINITION: &str = "ris:definition";

// Entries of the shared reference group
pub const FUNDSTELLE: &str = "ris:fundstelle";
pub const NORM_REFERENCE: &str = "ris:normReference";
pub const ACTIVE_REFERENCE: &str = "ris:activeReference";
pub const CASELAW_REFERENCE: &str = "ris:caselawReference";
pub const SINGLE_NORM: &str = "ris:singleNorm";

// `source` discriminators
pub const SOURCE_DOKTYP: &str = "doktyp";
pub const SOURCE_SCHLAGWORT: &str = "schlagwort";
pub const SOURCE_GESAMTFUSSNOTEN: &str = "gesamtfussnoten";
pub const SOURCE_NOTIZ: &str = "notiz";

// `name` values of structural containers
pub const NAME_GLIEDERUNG: &str = "gliederung";
pub const NAME_KURZREFERAT: &str = "kurzreferat";
pub const ALIAS_UEBERGREIFENDE_ID: &str = "uebergreifende-id";
pub const DATE_ERFASSUNGSDATUM: &str = "erfassungsdatum";

// Lifecycle events
pub const EVENT_INKRAFTTRETEN: &str = "inkrafttreten";
pub const EVENT_AUSSERKRAFTTRETEN: &str = "ausserkrafttreten";

/// Local part of a qualified name.
#[must_use]
pub fn local(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, local)| local)
}
