//! Command-line interface for LDML conversion and document numbering.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use console::style;

use crate::config::LdmlConfig;
use crate::convert::{BusinessToLdmlConverter, LdmlToBusinessConverter};
use crate::error::{LdmlError, Result};
use crate::lookup::InMemoryDocumentTypeLookup;
use crate::model::{DocumentCategory, DocumentationUnit, DocumentationUnitContent};
use crate::numbering::generate;
use crate::xml::CanonicalOrderTable;

/// RIS LDML - Convert documentation units to and from LDML.
#[derive(Parser)]
#[command(name = "ris-ldml")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a documentation unit (JSON) to LDML.
    ToLdml {
        /// Documentation unit JSON file
        input: PathBuf,

        /// Previously published LDML to edit instead of starting fresh
        #[arg(short, long)]
        previous: Option<PathBuf>,

        /// Write the LDML to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Capture date in YYYY-MM-DD format (default: today)
        #[arg(long)]
        erfassungsdatum: Option<String>,
    },

    /// Read a documentation unit (JSON) back from LDML.
    FromLdml {
        /// LDML file
        input: PathBuf,

        /// JSON document type table (overrides LDML_DOCUMENT_TYPES_PATH)
        #[arg(long)]
        document_types: Option<PathBuf>,
    },

    /// Generate the next document number.
    NextNumber {
        /// Category name or prefix (e.g. KSNR, LITERATUR_SELBSTAENDIG)
        #[arg(short, long)]
        category: String,

        /// Four-digit year (default: current year)
        #[arg(short, long)]
        year: Option<u16>,

        /// Latest issued number for this category and year
        #[arg(short, long)]
        latest: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = LdmlConfig::from_env()?;

    match cli.command {
        Commands::ToLdml {
            input,
            previous,
            output,
            erfassungsdatum,
        } => to_ldml_command(
            &config,
            &input,
            previous.as_deref(),
            output.as_deref(),
            erfassungsdatum.as_deref(),
        ),
        Commands::FromLdml {
            input,
            document_types,
        } => from_ldml_command(&config, &input, document_types.as_deref()),
        Commands::NextNumber {
            category,
            year,
            latest,
        } => next_number_command(&category, year, latest.as_deref()),
    }
}

fn order_table(config: &LdmlConfig) -> Result<Arc<CanonicalOrderTable>> {
    match &config.canonical_order_path {
        Some(path) => Ok(Arc::new(CanonicalOrderTable::from_path(path)?)),
        None => Ok(CanonicalOrderTable::default_table()),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        LdmlError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| LdmlError::Config(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

/// Execute the to-ldml command.
fn to_ldml_command(
    config: &LdmlConfig,
    input: &Path,
    previous: Option<&Path>,
    output: Option<&Path>,
    erfassungsdatum: Option<&str>,
) -> Result<()> {
    let unit: DocumentationUnit = serde_json::from_str(&read_file(input)?)?;
    let previous = previous.map(read_file).transpose()?;

    let mut converter = BusinessToLdmlConverter::new(order_table(config)?);
    if let Some(date) = erfassungsdatum {
        converter = converter.with_erfassungsdatum(parse_date(date)?);
    }

    eprintln!(
        "{} {} {}",
        style("Converting").bold(),
        style(unit.category()).cyan(),
        style(unit.document_number().unwrap_or("(no document number)")).green()
    );

    let xml = converter.convert_onto(&unit, previous.as_deref())?;

    match output {
        Some(path) => {
            std::fs::write(path, &xml)?;
            eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{xml}"),
    }
    Ok(())
}

/// Execute the from-ldml command.
fn from_ldml_command(
    config: &LdmlConfig,
    input: &Path,
    document_types: Option<&Path>,
) -> Result<()> {
    let lookup = match document_types.or(config.document_types_path.as_deref()) {
        Some(path) => InMemoryDocumentTypeLookup::from_path(path)?,
        None => InMemoryDocumentTypeLookup::new(),
    };
    if lookup.is_empty() {
        eprintln!(
            "{} no document types loaded, document types will be absent",
            style("Warning:").yellow().bold()
        );
    }

    let xml = read_file(input)?;
    let unit = LdmlToBusinessConverter::new(&lookup).convert(&xml)?;

    eprintln!(
        "{} {} {}",
        style("Read").bold(),
        style(unit.category()).cyan(),
        style(unit.document_number().unwrap_or("(no document number)")).green()
    );
    println!("{}", serde_json::to_string_pretty(&unit)?);
    Ok(())
}

/// Execute the next-number command.
fn next_number_command(category: &str, year: Option<u16>, latest: Option<&str>) -> Result<()> {
    let category = DocumentCategory::parse(category)
        .ok_or_else(|| LdmlError::UnknownDocumentCategory(category.to_string()))?;
    let year = match year {
        Some(year) => year,
        None => u16::try_from(chrono::Local::now().year())
            .map_err(|_| LdmlError::Config("current year out of range".to_string()))?,
    };

    let number = generate(category.document_number_prefix(), year, latest)?;
    println!("{number}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_to_ldml() {
        let cli = Cli::parse_from(["ris-ldml", "to-ldml", "unit.json", "--previous", "old.xml"]);

        let Commands::ToLdml {
            input,
            previous,
            output,
            erfassungsdatum,
        } = cli.command
        else {
            panic!("expected to-ldml");
        };
        assert_eq!(input, PathBuf::from("unit.json"));
        assert_eq!(previous, Some(PathBuf::from("old.xml")));
        assert!(output.is_none());
        assert!(erfassungsdatum.is_none());
    }

    #[test]
    fn test_cli_parse_next_number() {
        let cli = Cli::parse_from([
            "ris-ldml",
            "next-number",
            "--category",
            "KSNR",
            "--year",
            "2025",
            "--latest",
            "KSNR2025000001",
        ]);

        let Commands::NextNumber {
            category,
            year,
            latest,
        } = cli.command
        else {
            panic!("expected next-number");
        };
        assert_eq!(category, "KSNR");
        assert_eq!(year, Some(2025));
        assert_eq!(latest.as_deref(), Some("KSNR2025000001"));
    }

    #[test]
    fn test_next_number_rejects_unknown_category() {
        let result = next_number_command("XYZ", Some(2025), None);
        assert!(matches!(result, Err(LdmlError::UnknownDocumentCategory(_))));
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-01-01").is_ok());
        assert!(parse_date("01.01.2025").is_err());
    }
}
