//! Configuration constants and validation functions.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LdmlError, Result};

/// Namespace URI of the generic Akoma Ntoso vocabulary.
pub const AKN_NAMESPACE: &str = "http://docs.oasis-open.org/legaldocml/ns/akn/3.0";

/// Prefix bound to [`AKN_NAMESPACE`] on every produced document.
pub const AKN_PREFIX: &str = "akn";

/// Prefix bound to the proprietary (RIS) namespace on every produced document.
pub const RIS_PREFIX: &str = "ris";

/// Proprietary namespace for administrative regulations.
pub const RIS_NAMESPACE_VWV: &str = "http://ldml.neuris.de/metadata/";

/// Proprietary namespace for unselbständige Literatur.
pub const RIS_NAMESPACE_ULI: &str = "http://ldml.neuris.de/literature/unselbstaendig/metadata/";

/// Proprietary namespace for selbständige Literatur.
pub const RIS_NAMESPACE_SLI: &str = "http://ldml.neuris.de/literature/selbstaendig/metadata/";

/// Placeholder for `source`/`refersTo` attributes whose semantics are not yet defined.
pub const ATTRIBUTSEMANTIK_NOCH_UNDEFINIERT: &str = "attributsemantik-noch-undefiniert";

/// Value of the `name` attribute on `akn:doc`.
pub const DOC_NAME: &str = "offene-struktur";

/// Minimum number of digits of the sequence part of a document number.
pub const SEQUENCE_WIDTH: usize = 6;

/// Environment variable pointing at a YAML canonical order table.
pub const ENV_CANONICAL_ORDER_PATH: &str = "LDML_CANONICAL_ORDER_PATH";

/// Environment variable pointing at a JSON document-type table.
pub const ENV_DOCUMENT_TYPES_PATH: &str = "LDML_DOCUMENT_TYPES_PATH";

/// Document number prefix: 3 to 4 upper-case letters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3,4}$").expect("valid regex"));

/// Qualified XML name: optional `prefix:` followed by a local name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_.-]*:)?[A-Za-z_][A-Za-z0-9_.-]*$").expect("valid regex")
});

/// Validate a document number prefix.
///
/// # Examples
/// ```
/// use ris_ldml::config::validate_prefix;
///
/// assert!(validate_prefix("KSNR").is_ok());
/// assert!(validate_prefix("ks").is_err());
/// ```
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if PREFIX_PATTERN.is_match(prefix) {
        Ok(())
    } else {
        Err(LdmlError::InvalidDocumentNumber(format!(
            "prefix '{prefix}' must be 3 to 4 upper-case letters"
        )))
    }
}

/// Validate a qualified element or attribute name (`akn:meta`, `source`).
///
/// # Examples
/// ```
/// use ris_ldml::config::validate_qualified_name;
///
/// assert!(validate_qualified_name("akn:meta").is_ok());
/// assert!(validate_qualified_name("akn:").is_err());
/// ```
pub fn validate_qualified_name(name: &str) -> Result<()> {
    if QNAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(LdmlError::Structural(format!("malformed tag name '{name}'")))
    }
}

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone, Default)]
pub struct LdmlConfig {
    /// YAML file overriding the built-in canonical order table.
    pub canonical_order_path: Option<PathBuf>,
    /// JSON file seeding the document-type lookup.
    pub document_types_path: Option<PathBuf>,
}

impl LdmlConfig {
    pub fn from_env() -> Result<Self> {
        let canonical_order_path = optional_path(ENV_CANONICAL_ORDER_PATH)?;
        let document_types_path = optional_path(ENV_DOCUMENT_TYPES_PATH)?;

        Ok(Self {
            canonical_order_path,
            document_types_path,
        })
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.canonical_order_path = Some(path.into());
        self
    }

    pub fn with_document_types_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_types_path = Some(path.into());
        self
    }
}

fn optional_path(var: &str) -> Result<Option<PathBuf>> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => {
            let path = PathBuf::from(value);
            if !path.is_file() {
                return Err(LdmlError::Config(format!(
                    "{var} points to a missing file: {}",
                    path.display()
                )));
            }
            Ok(Some(path))
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => {
            Err(LdmlError::Config(format!("{var} is not valid unicode")))
        }
    }
}
