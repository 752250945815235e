//! Integration tests for the code-set provider.

use std::io::Write;
use std::sync::Arc;

use camt_model::{FieldErrorKind, code::CodeStrategy};
use camt_standards::{
    CodeSetDefinition, CodeSetProvider, FileSource, StandardsError, StaticSource,
};

const FIXTURE: &str = r#"{
    "definitions": {
        "ExternalFixtureList1Code": {"type": "string", "enum": ["ALFA", "BRVO"]},
        "ExternalFixtureRange1Code": {"type": "string", "minLength": 2, "maxLength": 3},
        "ExternalFixtureNumber1Code": {"type": "integer"},
        "ExternalFixtureBare1Code": {"type": "string"}
    }
}"#;

fn fixture() -> CodeSetProvider {
    CodeSetProvider::new(Box::new(StaticSource::new("fixture.json", FIXTURE)))
}

#[test]
fn test_embedded_account_identification() {
    let provider = CodeSetProvider::embedded();
    let rule = provider
        .code_rule("ExternalAccountIdentification1Code")
        .unwrap();
    assert_eq!(rule.strategy(), CodeStrategy::External);
    for code in ["AIIN", "BBAN", "CUID", "UPIC"] {
        assert!(rule.validate(code).is_ok(), "{code}");
    }
    for code in ["ABCD", "1234", "AI", "UP"] {
        assert!(rule.validate(code).is_err(), "{code}");
    }
}

#[test]
fn test_embedded_length_range_entry() {
    let provider = CodeSetProvider::embedded();
    let definition = provider
        .lookup("ExternalBankTransactionFamily1Code")
        .unwrap();
    assert_eq!(
        definition.as_ref(),
        &CodeSetDefinition::LengthRange { min: 1, max: 4 }
    );
    let rule = provider
        .code_rule("ExternalBankTransactionFamily1Code")
        .unwrap();
    assert_eq!(rule.validate("rcdt").unwrap().code(), "RCDT");
}

#[test]
fn test_lookups_are_cached() {
    let provider = fixture();
    let first = provider.lookup("ExternalFixtureList1Code").unwrap();
    let second = provider.lookup("ExternalFixtureList1Code").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_setup_errors() {
    let provider = fixture();
    assert!(matches!(
        provider.lookup("ExternalMissing1Code").unwrap_err(),
        StandardsError::UnknownFieldType { .. }
    ));
    assert!(matches!(
        provider.lookup("ExternalFixtureNumber1Code").unwrap_err(),
        StandardsError::UnsupportedType { .. }
    ));
    assert!(matches!(
        provider.lookup("ExternalFixtureBare1Code").unwrap_err(),
        StandardsError::MissingConstraint { .. }
    ));

    let err = provider.code_rule("ExternalMissing1Code").unwrap_err();
    assert_eq!(err.kind(), FieldErrorKind::Configuration);
    insta::assert_snapshot!(
        err.to_string(),
        @"Cannot configure ExternalMissing1Code: ExternalMissing1Code is not defined in fixture.json"
    );
}

#[test]
fn test_fixture_range_rule() {
    let rule = fixture().code_rule("ExternalFixtureRange1Code").unwrap();
    assert!(rule.validate("ab").is_ok());
    assert!(rule.validate("A").is_err());
    assert!(rule.validate("ABCD").is_err());
}

#[test]
fn test_malformed_document() {
    let provider = CodeSetProvider::new(Box::new(StaticSource::new("broken.json", "{\"definitions\": [")));
    assert!(matches!(
        provider.lookup("ExternalFixtureList1Code").unwrap_err(),
        StandardsError::JsonParse { .. }
    ));
    assert!(provider.names().is_err());
}

#[test]
fn test_malformed_entry_fails_only_itself() {
    let provider = CodeSetProvider::new(Box::new(StaticSource::new(
        "mixed.json",
        r#"{"definitions": {
            "ExternalGood1Code": {"type": "string", "enum": ["AAAA", "BBBB"]},
            "ExternalBad1Code": {"type": "integer", "enum": [1, 2]},
            "ExternalBad2Code": {"type": "string", "enum": ["CCCC", 3]}
        }}"#,
    )));

    let rule = provider.code_rule("ExternalGood1Code").unwrap();
    assert!(rule.validate("aaaa").is_ok());
    assert!(rule.validate("CCCC").is_err());

    assert!(matches!(
        provider.lookup("ExternalBad1Code").unwrap_err(),
        StandardsError::UnsupportedType { .. }
    ));
    let err = provider.code_rule("ExternalBad2Code").unwrap_err();
    assert_eq!(err.kind(), FieldErrorKind::Configuration);
    assert!(err.to_string().starts_with("Cannot configure ExternalBad2Code"), "{err}");

    assert!(provider.lookup("ExternalGood1Code").is_ok());
    assert_eq!(provider.names().unwrap().len(), 3);
}

#[test]
fn test_file_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();
    let provider = CodeSetProvider::new(Box::new(FileSource::new(file.path())));
    assert_eq!(
        provider.names().unwrap(),
        vec![
            "ExternalFixtureBare1Code",
            "ExternalFixtureList1Code",
            "ExternalFixtureNumber1Code",
            "ExternalFixtureRange1Code",
        ]
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CodeSetProvider::new(Box::new(FileSource::new(dir.path().join("none.json"))));
    let err = provider.lookup("ExternalFixtureList1Code").unwrap_err();
    assert!(matches!(err, StandardsError::FileNotFound { .. }));
}

#[test]
fn test_embedded_names() {
    let names = CodeSetProvider::embedded().names().unwrap();
    assert!(names.iter().any(|n| n == "ExternalPurpose1Code"));
    assert!(names.iter().all(|n| n.starts_with("External") && n.ends_with("Code")));
}
