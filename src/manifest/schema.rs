//! Structural validation of manifests against the embedded JSON Schema, and
//! resolution of the `$schema` version marker.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::constants::{CURRENT_SCHEMA_VERSION, SUPPORTED_SCHEMA_VERSIONS};
use crate::error::{Error, Result};

/// JSON Schema describing the v0 manifest layout.
pub const MANIFEST_SCHEMA: &str = include_str!("flag-manifest.schema.json");

static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/schema/(v\d+)/").expect("version pattern is valid"));

/// Resolves the schema version named by a `$schema` marker.
///
/// An absent marker means the current version. A marker without a
/// `/schema/<version>/` segment, or with an unsupported version, is rejected.
pub fn schema_version(manifest: &str, marker: Option<&str>) -> Result<String> {
    let Some(marker) = marker else {
        debug!("No $schema marker in {manifest}, assuming {CURRENT_SCHEMA_VERSION}");
        return Ok(CURRENT_SCHEMA_VERSION.to_string());
    };

    let version = VERSION_SEGMENT
        .captures(marker)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::ValidationError {
            manifest: manifest.to_string(),
            message: format!("'$schema' value '{marker}' does not name a schema version"),
        })?;

    if !SUPPORTED_SCHEMA_VERSIONS.contains(&version) {
        return Err(Error::ValidationError {
            manifest: manifest.to_string(),
            message: format!(
                "unsupported schema version '{version}' (supported: {})",
                SUPPORTED_SCHEMA_VERSIONS.join(", ")
            ),
        });
    }

    Ok(version.to_string())
}

/// Checks the document's structure. Type names and default shapes are left to
/// the loader so they can be reported with their own error kinds.
pub fn validate(manifest: &str, instance: &serde_json::Value) -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(MANIFEST_SCHEMA).map_err(|e| Error::ValidationError {
            manifest: manifest.to_string(),
            message: format!("embedded manifest schema is unreadable: {e}"),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| Error::ValidationError {
        manifest: manifest.to_string(),
        message: format!("embedded manifest schema is invalid: {e}"),
    })?;

    let problems: Vec<String> = validator.iter_errors(instance).map(|e| e.to_string()).collect();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError {
            manifest: manifest.to_string(),
            message: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_version_marker() {
        let marker =
            "https://raw.githubusercontent.com/open-feature/cli/main/schema/v0/flag-manifest.json";
        assert_eq!(schema_version("flags.json", Some(marker)).unwrap(), "v0");
        assert_eq!(schema_version("flags.json", None).unwrap(), CURRENT_SCHEMA_VERSION);
        assert!(schema_version("flags.json", Some("https://example.com/schema/v9/x.json")).is_err());
        assert!(schema_version("flags.json", Some("not-a-schema")).is_err());
    }

    #[test]
    fn test_structure_is_validated() {
        assert!(validate("flags.json", &json!({"flags": {}})).is_ok());
        assert!(validate("flags.json", &json!({})).is_err());
        assert!(validate(
            "flags.json",
            &json!({"flags": {"a": {"flagType": "boolean", "defaultValue": true, "extra": 1}}})
        )
        .is_err());
        assert!(validate("flags.json", &json!({"flags": {"a": {"flagType": "boolean"}}})).is_err());
    }
}
