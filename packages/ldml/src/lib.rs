//! RIS LDML - Schema-ordered Akoma Ntoso (LDML) conversion for documentation units.
//!
//! This crate converts documentation units (administrative regulations and
//! literature records) into LDML documents whose element order follows the
//! target schema, reads them back into the business model, and issues
//! document numbers.
//!
//! # Example
//!
//! ```
//! use ris_ldml::convert::{BusinessToLdmlConverter, LdmlToBusinessConverter};
//! use ris_ldml::lookup::InMemoryDocumentTypeLookup;
//! use ris_ldml::model::{AdmDocumentationUnitContent, DocumentationUnit};
//!
//! let unit: DocumentationUnit = AdmDocumentationUnitContent {
//!     document_number: Some("KSNR2025000001".to_string()),
//!     keywords: vec!["Beihilfe".to_string()],
//!     ..Default::default()
//! }
//! .into();
//!
//! let xml = BusinessToLdmlConverter::default().convert(&unit).unwrap();
//! let lookup = InMemoryDocumentTypeLookup::new();
//! let read = LdmlToBusinessConverter::new(&lookup).convert(&xml).unwrap();
//! assert_eq!(read, unit);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespaces, constants, validation and environment configuration
//! - [`error`]: Error types and Result alias
//! - [`model`]: Business model of documentation units
//! - [`xml`]: Canonical order table, ordered XML tree, parsing and serialization
//! - [`skeleton`]: Minimal LDML document shell per category
//! - [`convert`]: Business model to LDML and back
//! - [`lookup`]: Document type resolution
//! - [`numbering`]: Document number generation
//! - [`publish`]: Convert, validate and publish orchestration
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod lookup;
pub mod model;
pub mod numbering;
pub mod publish;
pub mod skeleton;
pub mod xml;

// Re-export commonly used items
pub use convert::{BusinessToLdmlConverter, LdmlToBusinessConverter};
pub use error::{LdmlError, Result};
pub use model::{DocumentCategory, DocumentationUnit, DocumentationUnitContent};
pub use numbering::{generate, DocumentNumber, DocumentNumberService};
pub use skeleton::LdmlDocument;
pub use xml::{CanonicalOrderTable, XmlTree};
