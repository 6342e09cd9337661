//! Conversion between documentation units and LDML documents.
//!
//! - [`to_ldml`]: business model to XML, for publishing
//! - [`from_ldml`]: XML to business model, for re-editing

pub mod from_ldml;
pub mod to_ldml;
pub mod vocabulary;

pub use from_ldml::{detect_category, LdmlToBusinessConverter};
pub use to_ldml::BusinessToLdmlConverter;
