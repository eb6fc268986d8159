use std::path::Path;

use openfeature_codegen::error::Error;
use openfeature_codegen::manifest::{self, init_manifest, FlagDefault, FlagType, ManifestFormat};
use openfeature_codegen::storage::MemoryStorage;

fn parse_json(text: &str) -> Result<manifest::Manifest, Error> {
    manifest::parse("flags.json", text.as_bytes(), ManifestFormat::Json)
}

#[test]
fn test_load_json_manifest() {
    let storage = MemoryStorage::new();
    storage
        .insert_file("flags.json", include_str!("testdata/success_manifest.json"))
        .unwrap();

    let manifest = manifest::load(&storage, Path::new("flags.json")).unwrap();

    assert_eq!(manifest.schema_version(), "v0");
    assert_eq!(manifest.description(), Some("Flags for the storefront"));
    assert_eq!(manifest.flags().len(), 4);

    let flag = manifest.flag("username-max-length").unwrap();
    assert_eq!(flag.flag_type(), FlagType::Integer);
    assert_eq!(flag.default_value(), &FlagDefault::Integer(50));
    assert_eq!(flag.description(), Some("Maximum allowed length for usernames."));
}

#[test]
fn test_load_yaml_manifest() {
    let storage = MemoryStorage::new();
    storage
        .insert_file("config/flags.yaml", include_str!("testdata/object_manifest.yaml"))
        .unwrap();

    let manifest = manifest::load(&storage, Path::new("config/flags.yaml")).unwrap();

    let theme = manifest.flag("theme").unwrap();
    assert_eq!(theme.flag_type(), FlagType::Object);
    match theme.default_value() {
        FlagDefault::Object(map) => {
            assert_eq!(map["primary"], "#ff0000");
            assert_eq!(map["dark"], true);
        }
        other => panic!("Expected an object default, got {other:?}"),
    }
    assert_eq!(manifest.flag("new-ui").unwrap().default_value(), &FlagDefault::Boolean(true));
}

#[test]
fn test_flag_order_is_preserved() {
    let manifest = parse_json(
        r#"{"flags": {
            "zeta": {"flagType": "boolean", "defaultValue": true},
            "alpha": {"flagType": "string", "defaultValue": "a"},
            "mid": {"flagType": "integer", "defaultValue": 1}
        }}"#,
    )
    .unwrap();

    let keys: Vec<&str> = manifest.flags().iter().map(|f| f.key()).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_empty_flag_set_is_valid() {
    let manifest = parse_json(r#"{"flags": {}}"#).unwrap();
    assert!(manifest.flags().is_empty());
    assert_eq!(manifest.schema_version(), "v0");
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let result = parse_json(
        r#"{"flags": {
            "new-ui": {"flagType": "boolean", "defaultValue": true},
            "new-ui": {"flagType": "boolean", "defaultValue": false}
        }}"#,
    );

    match result {
        Err(Error::ValidationError { manifest, message }) => {
            assert_eq!(manifest, "flags.json");
            assert!(message.contains("'new-ui'"), "unexpected message: {message}");
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_duplicate_keys_are_rejected_in_yaml() {
    let yaml = "flags:\n  a:\n    flagType: boolean\n    defaultValue: true\n  a:\n    flagType: boolean\n    defaultValue: false\n";
    let result = manifest::parse("flags.yaml", yaml.as_bytes(), ManifestFormat::Yaml);

    match result {
        Err(Error::ValidationError { manifest, message }) => {
            assert_eq!(manifest, "flags.yaml");
            assert!(message.contains("'a'"), "unexpected message: {message}");
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_empty_key_is_rejected() {
    let result = parse_json(r#"{"flags": {"": {"flagType": "boolean", "defaultValue": true}}}"#);
    assert!(matches!(result, Err(Error::ValidationError { .. })));
}

#[test]
fn test_unknown_type_is_rejected() {
    let result = parse_json(r#"{"flags": {"limit": {"flagType": "number", "defaultValue": 1}}}"#);

    match result {
        Err(Error::UnknownTypeError { key, flag_type, .. }) => {
            assert_eq!(key, "limit");
            assert_eq!(flag_type, "number");
        }
        other => panic!("Expected UnknownTypeError, got {other:?}"),
    }
}

#[test]
fn test_mismatched_defaults_are_rejected() {
    let result =
        parse_json(r#"{"flags": {"new-ui": {"flagType": "boolean", "defaultValue": "yes"}}}"#);
    match result {
        Err(Error::TypeMismatchError { key, flag_type, value, .. }) => {
            assert_eq!(key, "new-ui");
            assert_eq!(flag_type, FlagType::Boolean);
            assert_eq!(value, "\"yes\"");
        }
        other => panic!("Expected TypeMismatchError, got {other:?}"),
    }

    let result = parse_json(r#"{"flags": {"limit": {"flagType": "integer", "defaultValue": 1.5}}}"#);
    assert!(matches!(result, Err(Error::TypeMismatchError { .. })));

    let result = parse_json(r#"{"flags": {"theme": {"flagType": "object", "defaultValue": [1]}}}"#);
    assert!(matches!(result, Err(Error::TypeMismatchError { .. })));
}

#[test]
fn test_whole_number_is_a_valid_float() {
    let manifest =
        parse_json(r#"{"flags": {"ratio": {"flagType": "float", "defaultValue": 3}}}"#).unwrap();
    assert_eq!(manifest.flag("ratio").unwrap().default_value(), &FlagDefault::Float(3.0));
}

#[test]
fn test_malformed_json_reports_location() {
    let result = parse_json("{\n  \"flags\": {\n    \"a\": \n}");

    match result {
        Err(Error::ParseError { manifest, line, .. }) => {
            assert_eq!(manifest, "flags.json");
            assert!(line.is_some());
        }
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_invalid_utf8_is_a_parse_error() {
    let result = manifest::parse("flags.json", &[0xff, 0xfe], ManifestFormat::Json);
    assert!(matches!(result, Err(Error::ParseError { line: None, .. })));
}

#[test]
fn test_structural_problems_are_validation_errors() {
    assert!(matches!(parse_json(r#"{}"#), Err(Error::ValidationError { .. })));
    assert!(matches!(
        parse_json(r#"{"flags": {}, "owner": "team-a"}"#),
        Err(Error::ValidationError { .. })
    ));
    assert!(matches!(
        parse_json(r#"{"flags": {"a": {"flagType": "boolean"}}}"#),
        Err(Error::ValidationError { .. })
    ));
}

#[test]
fn test_schema_version_is_checked() {
    let result = parse_json(
        r#"{"$schema": "https://example.com/schema/v7/flag-manifest.json", "flags": {}}"#,
    );

    match result {
        Err(Error::ValidationError { message, .. }) => assert!(message.contains("v7")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_missing_manifest_is_an_io_error() {
    let storage = MemoryStorage::new();
    match manifest::load(&storage, Path::new("missing.json")) {
        Err(Error::IoError { path, .. }) => assert_eq!(path, Path::new("missing.json")),
        other => panic!("Expected IoError, got {other:?}"),
    }
}

#[test]
fn test_init_manifest_creates_loadable_file() {
    let storage = MemoryStorage::new();

    init_manifest(&storage, Path::new("config/flags.json"), false).unwrap();
    let manifest = manifest::load(&storage, Path::new("config/flags.json")).unwrap();
    assert!(manifest.flags().is_empty());

    init_manifest(&storage, Path::new("flags.yml"), false).unwrap();
    let manifest = manifest::load(&storage, Path::new("flags.yml")).unwrap();
    assert_eq!(manifest.schema_version(), "v0");
}

#[test]
fn test_init_manifest_respects_force() {
    let storage = MemoryStorage::new();
    storage.insert_file("flags.json", "{\"flags\": {\"keep\": {}}}").unwrap();

    let result = init_manifest(&storage, Path::new("flags.json"), false);
    assert!(matches!(result, Err(Error::ManifestExistsError { .. })));
    assert!(storage.read_to_string("flags.json").unwrap().contains("keep"));

    init_manifest(&storage, Path::new("flags.json"), true).unwrap();
    assert!(!storage.read_to_string("flags.json").unwrap().contains("keep"));
}
