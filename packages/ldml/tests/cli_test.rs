//! Command-line tests for the ris-ldml binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn ris_ldml() -> Command {
    let mut cmd = Command::cargo_bin("ris-ldml").unwrap();
    cmd.env_remove("LDML_CANONICAL_ORDER_PATH")
        .env_remove("LDML_DOCUMENT_TYPES_PATH")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_to_ldml_prints_document() {
    ris_ldml()
        .arg("to-ldml")
        .arg(fixture_path("uli_unit.json"))
        .args(["--erfassungsdatum", "2025-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<akn:FRBRthis value="KALU2025000007"/>"#))
        .stdout(predicate::str::contains(
            "http://ldml.neuris.de/literature/unselbstaendig/metadata/",
        ))
        .stderr(predicate::str::contains("Converting"));
}

#[test]
fn test_to_ldml_then_from_ldml() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("KSNR2025000001.akn.xml");

    ris_ldml()
        .arg("to-ldml")
        .arg(fixture_path("adm_unit.json"))
        .arg("--output")
        .arg(&output)
        .args(["--erfassungsdatum", "2025-01-02"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved to:"));
    assert!(output.exists());

    ris_ldml()
        .arg("from-ldml")
        .arg(&output)
        .arg("--document-types")
        .arg(fixture_path("document_types.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "VERWALTUNGSVORSCHRIFT""#))
        .stdout(predicate::str::contains(r#""documentNumber": "KSNR2025000001""#))
        .stdout(predicate::str::contains(r#""abbreviation": "VR""#));
}

#[test]
fn test_to_ldml_onto_previous_keeps_foreign_content() {
    ris_ldml()
        .arg("to-ldml")
        .arg(fixture_path("adm_unit.json"))
        .arg("--previous")
        .arg(fixture_path("adm_previous.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("ris:passivzitierungen"))
        .stdout(predicate::str::contains("Veraltet").not());
}

#[test]
fn test_from_ldml_without_document_types_warns() {
    ris_ldml()
        .arg("from-ldml")
        .arg(fixture_path("adm_previous.xml"))
        .assert()
        .success()
        .stderr(predicate::str::contains("no document types loaded"))
        .stdout(predicate::str::contains(r#""aktenzeichen": ["#));
}

#[test]
fn test_from_ldml_rejects_malformed_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xml");
    std::fs::write(&input, "<akn:akomaNtoso>").unwrap();

    ris_ldml()
        .arg("from-ldml")
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_next_number() {
    ris_ldml()
        .args(["next-number", "--category", "KSNR", "--year", "2025"])
        .args(["--latest", "KSNR2025000001"])
        .assert()
        .success()
        .stdout("KSNR2025000002\n");
}

#[test]
fn test_next_number_first_of_year() {
    ris_ldml()
        .args(["next-number", "-c", "LITERATUR_SELBSTAENDIG", "-y", "2026"])
        .assert()
        .success()
        .stdout("KALS2026000001\n");
}

#[test]
fn test_next_number_rejects_year_mismatch() {
    ris_ldml()
        .args(["next-number", "--category", "KSNR", "--year", "2025"])
        .args(["--latest", "KSNR2024000007"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_missing_input_file() {
    ris_ldml()
        .args(["to-ldml", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));
}
