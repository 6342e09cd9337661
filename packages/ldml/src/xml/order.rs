//! Canonical child order per parent element.
//!
//! The table is data, not logic: the built-in table is embedded from
//! `resources/canonical_order.yaml` and a table for another schema
//! version can be loaded from a file without touching the algorithm.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;

use crate::config::validate_qualified_name;
use crate::error::{LdmlError, Result};

const DEFAULT_TABLE_YAML: &str = include_str!("../../resources/canonical_order.yaml");

#[allow(clippy::expect_used)] // Embedded resource, covered by tests
static DEFAULT_TABLE: LazyLock<Arc<CanonicalOrderTable>> = LazyLock::new(|| {
    Arc::new(
        CanonicalOrderTable::from_yaml_str(DEFAULT_TABLE_YAML)
            .expect("embedded canonical order table is valid"),
    )
});

/// On-disk shape of an order table.
#[derive(Debug, Deserialize)]
struct OrderTableFile {
    schema_version: String,
    elements: HashMap<String, Vec<String>>,
}

/// Immutable mapping parent tag -> allowed child tags in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalOrderTable {
    schema_version: String,
    /// parent -> child -> rank
    ranks: HashMap<String, HashMap<String, usize>>,
    /// parent -> ordered children, kept for inspection
    entries: HashMap<String, Vec<String>>,
}

impl CanonicalOrderTable {
    /// The built-in table for the current schema version.
    #[must_use]
    pub fn default_table() -> Arc<CanonicalOrderTable> {
        Arc::clone(&DEFAULT_TABLE)
    }

    /// Build a table from `(parent, children)` entries.
    pub fn new(
        schema_version: impl Into<String>,
        entries: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Result<Self> {
        let mut ranks = HashMap::new();
        let mut ordered = HashMap::new();

        for (parent, children) in entries {
            validate_qualified_name(&parent)
                .map_err(|_| LdmlError::OrderTable(format!("invalid parent tag '{parent}'")))?;

            let mut child_ranks = HashMap::with_capacity(children.len());
            for (rank, child) in children.iter().enumerate() {
                validate_qualified_name(child).map_err(|_| {
                    LdmlError::OrderTable(format!("invalid child tag '{child}' under '{parent}'"))
                })?;
                if child_ranks.insert(child.clone(), rank).is_some() {
                    return Err(LdmlError::OrderTable(format!(
                        "duplicate child tag '{child}' under '{parent}'"
                    )));
                }
            }

            ranks.insert(parent.clone(), child_ranks);
            ordered.insert(parent, children);
        }

        Ok(Self {
            schema_version: schema_version.into(),
            ranks,
            entries: ordered,
        })
    }

    /// Parse a table from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: OrderTableFile = serde_yaml_ng::from_str(yaml)?;
        Self::new(file.schema_version, file.elements)
    }

    /// Load a table from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Rank of `child` under `parent`, or `None` when either is unconstrained.
    #[must_use]
    pub fn rank(&self, parent: &str, child: &str) -> Option<usize> {
        self.ranks.get(parent)?.get(child).copied()
    }

    /// Whether the table constrains the children of `parent`.
    #[must_use]
    pub fn has_entry(&self, parent: &str) -> bool {
        self.ranks.contains_key(parent)
    }

    /// Ordered child tags of `parent`.
    #[must_use]
    pub fn children_of(&self, parent: &str) -> Option<&[String]> {
        self.entries.get(parent).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_loads() {
        let table = CanonicalOrderTable::default_table();
        assert!(table.has_entry("akn:meta"));
        assert!(table.has_entry("ris:meta"));
        assert_eq!(table.rank("akn:doc", "akn:meta"), Some(0));
        assert!(table.rank("akn:doc", "akn:mainBody") > table.rank("akn:doc", "akn:preface"));
    }

    #[test]
    fn test_rank_unknown() {
        let table = CanonicalOrderTable::default_table();
        assert_eq!(table.rank("akn:meta", "akn:unknown"), None);
        assert_eq!(table.rank("akn:unknown", "akn:meta"), None);
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
schema_version: "test-1"
elements:
  a:
    - b
    - c
"#;
        let table = CanonicalOrderTable::from_yaml_str(yaml).unwrap();
        assert_eq!(table.schema_version(), "test-1");
        assert_eq!(table.rank("a", "c"), Some(1));
        assert_eq!(
            table.children_of("a"),
            Some(&["b".to_string(), "c".to_string()][..])
        );
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let result = CanonicalOrderTable::new(
            "test",
            [("a".to_string(), vec!["b".to_string(), "b".to_string()])],
        );
        assert!(matches!(result, Err(LdmlError::OrderTable(_))));
    }

    #[test]
    fn test_invalid_tag_rejected() {
        let result =
            CanonicalOrderTable::new("test", [("a".to_string(), vec!["not a tag".to_string()])]);
        assert!(matches!(result, Err(LdmlError::OrderTable(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.yaml");
        std::fs::write(&path, "schema_version: v2\nelements:\n  x: [y, z]\n").unwrap();

        let table = CanonicalOrderTable::from_path(&path).unwrap();
        assert_eq!(table.schema_version(), "v2");
        assert_eq!(table.rank("x", "z"), Some(1));
    }
}
