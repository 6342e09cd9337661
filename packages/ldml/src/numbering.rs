//! Document number generation.
//!
//! A document number is `PREFIX` + `YYYY` + sequence, zero-padded to
//! [`SEQUENCE_WIDTH`] digits. Sequences beyond the width grow the string
//! instead of being truncated, and still parse back.
//!
//! [`generate`] is pure. [`DocumentNumberService`] runs read-latest,
//! generate and record under one lock so concurrent callers never receive
//! the same number.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use regex::Regex;
use tracing::info;

use crate::config::{validate_prefix, SEQUENCE_WIDTH};
use crate::error::{LdmlError, Result};
use crate::model::DocumentCategory;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOCUMENT_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{3,4})([0-9]{4})([0-9]{6,})$").expect("valid regex"));

/// A parsed document number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentNumber {
    prefix: String,
    year: u16,
    sequence: u64,
}

impl DocumentNumber {
    /// Build a document number from its parts.
    pub fn new(prefix: &str, year: u16, sequence: u64) -> Result<Self> {
        validate_prefix(prefix)?;
        if !(1000..=9999).contains(&year) {
            return Err(LdmlError::InvalidDocumentNumber(format!(
                "year {year} is not a 4-digit year"
            )));
        }
        if sequence == 0 {
            return Err(LdmlError::InvalidDocumentNumber(
                "sequence must be positive".to_string(),
            ));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            year,
            sequence,
        })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn year(&self) -> u16 {
        self.year
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The number following this one in the same prefix and year.
    pub fn next(&self) -> Result<Self> {
        let sequence = self.sequence.checked_add(1).ok_or_else(|| {
            LdmlError::InvalidDocumentNumber(format!("sequence of {self} is exhausted"))
        })?;
        Ok(Self {
            prefix: self.prefix.clone(),
            year: self.year,
            sequence,
        })
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:04}{:0width$}",
            self.prefix,
            self.year,
            self.sequence,
            width = SEQUENCE_WIDTH
        )
    }
}

impl FromStr for DocumentNumber {
    type Err = LdmlError;

    /// Parse the exact textual form. Sequences wider than
    /// [`SEQUENCE_WIDTH`] must not carry leading zeros.
    fn from_str(s: &str) -> Result<Self> {
        let invalid =
            || LdmlError::InvalidDocumentNumber(format!("malformed document number '{s}'"));
        let captures = DOCUMENT_NUMBER_PATTERN.captures(s).ok_or_else(invalid)?;

        let year: u16 = captures[2].parse().map_err(|_| invalid())?;
        let sequence: u64 = captures[3].parse().map_err(|_| invalid())?;
        let number = Self::new(&captures[1], year, sequence)?;
        if number.to_string() != s {
            return Err(invalid());
        }
        Ok(number)
    }
}

/// Generate the next document number for `prefix` and `year`.
///
/// Without a latest number the sequence starts at 1. A latest number with
/// another prefix or year is rejected, never silently skipped.
///
/// # Examples
/// ```
/// use ris_ldml::numbering::generate;
///
/// assert_eq!(generate("KSNR", 2025, None).unwrap().to_string(), "KSNR2025000001");
/// assert_eq!(
///     generate("KSNR", 2025, Some("KSNR2025099999")).unwrap().to_string(),
///     "KSNR2025100000"
/// );
/// assert!(generate("KSNR", 2025, Some("KSNR2024000001")).is_err());
/// ```
pub fn generate(prefix: &str, year: u16, latest: Option<&str>) -> Result<DocumentNumber> {
    let Some(latest) = latest else {
        return DocumentNumber::new(prefix, year, 1);
    };

    let latest: DocumentNumber = latest.trim().parse()?;
    if latest.prefix != prefix {
        return Err(LdmlError::InvalidDocumentNumber(format!(
            "latest number {latest} does not have prefix {prefix}"
        )));
    }
    if latest.year != year {
        return Err(LdmlError::InvalidDocumentNumber(format!(
            "latest number {latest} is not from year {year}"
        )));
    }
    latest.next()
}

/// Persistence of the latest issued number per prefix and year.
pub trait DocumentNumberStore: Send {
    /// Latest issued number for `prefix` in `year`, if any.
    fn latest(&self, prefix: &str, year: u16) -> Result<Option<String>>;

    /// Record `number` as the latest issued number for its prefix and year.
    fn record(&mut self, number: &DocumentNumber) -> Result<()>;
}

/// Store keeping the latest numbers in memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentNumberStore {
    latest: HashMap<(String, u16), String>,
}

impl InMemoryDocumentNumberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentNumberStore for InMemoryDocumentNumberStore {
    fn latest(&self, prefix: &str, year: u16) -> Result<Option<String>> {
        Ok(self.latest.get(&(prefix.to_string(), year)).cloned())
    }

    fn record(&mut self, number: &DocumentNumber) -> Result<()> {
        self.latest
            .insert((number.prefix.clone(), number.year), number.to_string());
        Ok(())
    }
}

/// Issues document numbers, serializing access to the store.
pub struct DocumentNumberService<S: DocumentNumberStore> {
    store: Mutex<S>,
}

impl<S: DocumentNumberStore> DocumentNumberService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Issue the next number for `category` in `year`.
    pub fn next(&self, category: DocumentCategory, year: u16) -> Result<DocumentNumber> {
        let prefix = category.document_number_prefix();
        let mut store = self
            .store
            .lock()
            .map_err(|_| LdmlError::Config("document number store lock poisoned".to_string()))?;

        let latest = store.latest(prefix, year)?;
        let number = generate(prefix, year, latest.as_deref())?;
        store.record(&number)?;

        info!(document_number = %number, category = %category, "issued document number");
        Ok(number)
    }

    /// Consume the service and return the store.
    pub fn into_store(self) -> Result<S> {
        self.store
            .into_inner()
            .map_err(|_| LdmlError::Config("document number store lock poisoned".to_string()))
    }
}
