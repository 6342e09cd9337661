//! Document categories and their fixed LDML properties.

use serde::{Deserialize, Serialize};

use crate::config::{RIS_NAMESPACE_SLI, RIS_NAMESPACE_ULI, RIS_NAMESPACE_VWV};

/// Kind of documentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentCategory {
    /// Administrative regulation (Verwaltungsvorschrift).
    Verwaltungsvorschrift,

    /// Literature published inside another work (unselbständige Literatur).
    LiteraturUnselbstaendig,

    /// Standalone literature (selbständige Literatur).
    LiteraturSelbstaendig,
}

impl DocumentCategory {
    /// All categories, in a stable order.
    pub const ALL: [DocumentCategory; 3] = [
        Self::Verwaltungsvorschrift,
        Self::LiteraturUnselbstaendig,
        Self::LiteraturSelbstaendig,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verwaltungsvorschrift => "VERWALTUNGSVORSCHRIFT",
            Self::LiteraturUnselbstaendig => "LITERATUR_UNSELBSTAENDIG",
            Self::LiteraturSelbstaendig => "LITERATUR_SELBSTAENDIG",
        }
    }

    /// Fixed document number prefix of this category.
    #[must_use]
    pub fn document_number_prefix(&self) -> &'static str {
        match self {
            Self::Verwaltungsvorschrift => "KSNR",
            Self::LiteraturUnselbstaendig => "KALU",
            Self::LiteraturSelbstaendig => "KALS",
        }
    }

    /// Proprietary (RIS) namespace bound on documents of this category.
    #[must_use]
    pub fn proprietary_namespace(&self) -> &'static str {
        match self {
            Self::Verwaltungsvorschrift => RIS_NAMESPACE_VWV,
            Self::LiteraturUnselbstaendig => RIS_NAMESPACE_ULI,
            Self::LiteraturSelbstaendig => RIS_NAMESPACE_SLI,
        }
    }

    /// Detect the category from a proprietary namespace URI.
    #[must_use]
    pub fn from_proprietary_namespace(uri: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.proprietary_namespace() == uri)
    }

    /// Parse from the textual form used on the command line and in JSON.
    ///
    /// Accepts the serialized name as well as the document number prefix.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let upper = text.trim().to_uppercase();
        Self::ALL.into_iter().find(|category| {
            category.as_str() == upper || category.document_number_prefix() == upper
        })
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let prefixes: std::collections::HashSet<_> = DocumentCategory::ALL
            .iter()
            .map(DocumentCategory::document_number_prefix)
            .collect();
        assert_eq!(prefixes.len(), DocumentCategory::ALL.len());
    }

    #[test]
    fn test_namespace_round_trip() {
        for category in DocumentCategory::ALL {
            assert_eq!(
                DocumentCategory::from_proprietary_namespace(category.proprietary_namespace()),
                Some(category)
            );
        }
        assert_eq!(
            DocumentCategory::from_proprietary_namespace("http://example.com/"),
            None
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            DocumentCategory::parse("verwaltungsvorschrift"),
            Some(DocumentCategory::Verwaltungsvorschrift)
        );
        assert_eq!(
            DocumentCategory::parse("KALU"),
            Some(DocumentCategory::LiteraturUnselbstaendig)
        );
        assert_eq!(DocumentCategory::parse("unknown"), None);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&DocumentCategory::LiteraturSelbstaendig).unwrap(),
            "\"LITERATUR_SELBSTAENDIG\""
        );
    }
}
