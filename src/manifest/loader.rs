//! Manifest loading: read, deserialize, validate.
//!
//! Loading is the only place manifest invariants are checked. Everything
//! downstream takes a [`Manifest`] and trusts it.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use log::debug;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::{schema, FlagDefault, FlagDefinition, FlagType, Manifest};
use crate::constants::SCHEMA_URL;
use crate::error::{Error, Result};
use crate::storage::Storage;

/// On-disk syntax of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// `.yaml` and `.yml` select YAML, anything else is read as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ManifestFormat::Yaml
            }
            _ => ManifestFormat::Json,
        }
    }

    fn deserialize<T: DeserializeOwned>(self, manifest: &str, text: &str) -> Result<T> {
        match self {
            ManifestFormat::Json => serde_json::from_str(text).map_err(|e| Error::ParseError {
                manifest: manifest.to_string(),
                line: (e.line() > 0).then_some(e.line()),
                column: (e.column() > 0).then_some(e.column()),
                message: e.to_string(),
            }),
            ManifestFormat::Yaml => serde_yaml::from_str(text).map_err(|e| {
                let location = e.location();
                Error::ParseError {
                    manifest: manifest.to_string(),
                    line: location.as_ref().map(|l| l.line()),
                    column: location.as_ref().map(|l| l.column()),
                    message: e.to_string(),
                }
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(rename = "$schema", default)]
    schema: Option<String>,
    #[serde(default)]
    description: Option<String>,
    flags: RawFlags,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawFlag {
    flag_type: String,
    default_value: serde_json::Value,
    #[serde(default)]
    description: Option<String>,
}

/// Flag entries in source order, duplicates included.
#[derive(Debug)]
struct RawFlags(Vec<(String, RawFlag)>);

impl<'de> Deserialize<'de> for RawFlags {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlagsVisitor;

        impl<'de> Visitor<'de> for FlagsVisitor {
            type Value = RawFlags;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of flag keys to flag definitions")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<RawFlags, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut flags = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, flag)) = map.next_entry::<String, RawFlag>()? {
                    flags.push((key, flag));
                }
                Ok(RawFlags(flags))
            }
        }

        deserializer.deserialize_map(FlagsVisitor)
    }
}

/// Reads and validates the manifest at `path`.
///
/// # Errors
/// * `Error::IoError` if the manifest cannot be read
/// * any error of [`parse`]
pub fn load(storage: &dyn Storage, path: &Path) -> Result<Manifest> {
    debug!("Loading manifest from {}", path.display());
    let bytes = storage.read(path).map_err(Error::io(path))?;
    parse(&path.display().to_string(), &bytes, ManifestFormat::from_path(path))
}

/// Parses and validates manifest bytes. `manifest` names the source in errors.
///
/// # Errors
/// * `Error::ParseError` for malformed syntax or non UTF-8 input
/// * `Error::ValidationError` for schema violations, unknown schema versions,
///   empty keys and duplicate keys
/// * `Error::UnknownTypeError` for a `flagType` outside the known set
/// * `Error::TypeMismatchError` for a default that does not fit its type
pub fn parse(manifest: &str, bytes: &[u8], format: ManifestFormat) -> Result<Manifest> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::ParseError {
        manifest: manifest.to_string(),
        message: format!("manifest is not valid UTF-8 ({e})"),
        line: None,
        column: None,
    })?;

    let document: serde_json::Value = format.deserialize(manifest, text)?;
    schema::validate(manifest, &document)?;

    // Deserialized a second time so duplicate keys survive; the untyped
    // document above has already collapsed them.
    let raw: RawManifest = format.deserialize(manifest, text)?;
    build(manifest, raw)
}

fn build(manifest: &str, raw: RawManifest) -> Result<Manifest> {
    let schema_version = schema::schema_version(manifest, raw.schema.as_deref())?;
    let entries = raw.flags.0;

    if entries.iter().any(|(key, _)| key.trim().is_empty()) {
        return Err(Error::ValidationError {
            manifest: manifest.to_string(),
            message: "flag keys must not be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for (key, _) in &entries {
        if !seen.insert(key.as_str()) && !duplicates.contains(&key.as_str()) {
            duplicates.push(key);
        }
    }
    if !duplicates.is_empty() {
        return Err(Error::ValidationError {
            manifest: manifest.to_string(),
            message: format!(
                "duplicate flag key(s): {}",
                duplicates.iter().map(|k| format!("'{k}'")).collect::<Vec<_>>().join(", ")
            ),
        });
    }

    let mut flags = Vec::with_capacity(entries.len());
    for (key, raw_flag) in entries {
        let flag_type =
            FlagType::parse(&raw_flag.flag_type).ok_or_else(|| Error::UnknownTypeError {
                manifest: manifest.to_string(),
                key: key.clone(),
                flag_type: raw_flag.flag_type.clone(),
            })?;

        let default = FlagDefault::from_json(flag_type, &raw_flag.default_value).ok_or_else(|| {
            Error::TypeMismatchError {
                manifest: manifest.to_string(),
                key: key.clone(),
                flag_type,
                value: raw_flag.default_value.to_string(),
            }
        })?;

        flags.push(FlagDefinition::new(key, default, raw_flag.description));
    }

    debug!("Loaded {} flag(s) from {manifest} (schema {schema_version})", flags.len());
    Ok(Manifest::new(schema_version, raw.description, flags))
}

/// Writes a starter manifest with no flags.
///
/// # Errors
/// * `Error::ManifestExistsError` if `path` exists and `force` is false
/// * `Error::IoError` if the directory or file cannot be written
pub fn init_manifest(storage: &dyn Storage, path: &Path, force: bool) -> Result<()> {
    if storage.exists(path) && !force {
        return Err(Error::ManifestExistsError { path: path.display().to_string() });
    }

    let contents = match ManifestFormat::from_path(path) {
        ManifestFormat::Json => {
            format!("{{\n  \"$schema\": \"{SCHEMA_URL}\",\n  \"flags\": {{}}\n}}\n")
        }
        ManifestFormat::Yaml => format!("$schema: {SCHEMA_URL}\nflags: {{}}\n"),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        storage.create_dir_all(parent).map_err(Error::io(parent))?;
    }
    storage.write(path, contents.as_bytes()).map_err(Error::io(path))?;
    debug!("Initialized manifest at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ManifestFormat::from_path("flags.json"), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path("flags.yaml"), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path("flags.YML"), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path("flags"), ManifestFormat::Json);
    }

    #[test]
    fn test_duplicates_are_kept_in_raw_flags() {
        let raw: RawManifest = serde_json::from_str(
            r#"{"flags": {"a": {"flagType": "boolean", "defaultValue": true},
                          "a": {"flagType": "boolean", "defaultValue": false}}}"#,
        )
        .unwrap();
        assert_eq!(raw.flags.0.len(), 2);
    }
}
