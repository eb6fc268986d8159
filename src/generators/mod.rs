//! Target renderers.
//!
//! Rendering is two passes. [`declarations`] turns every flag into a
//! [`Declaration`] record using the type mapping table, checking identifier
//! collisions on the way, so any mapping error surfaces before text exists.
//! The target's template then lays those records out in one formatting pass.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

use crate::constants::GENERATED_BANNER;
use crate::error::{Error, Result};
use crate::manifest::{FlagType, Manifest};
use crate::mapping;
use crate::renderer::TemplateRenderer;
use crate::target::{Target, TargetConfig};
use crate::writer::GeneratedArtifact;

pub mod csharp;
pub mod go;
pub mod java;
pub mod nestjs;
pub mod nodejs;
pub mod python;
pub mod react;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

static DOTTED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("dotted identifier pattern is valid")
});

/// Naming fields resolved for one target, plus its default file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preamble {
    #[serde(skip)]
    pub file_name: String,
    pub package_name: Option<String>,
    pub namespace: Option<String>,
}

impl Preamble {
    pub fn new<S: Into<String>>(file_name: S) -> Self {
        Self { file_name: file_name.into(), package_name: None, namespace: None }
    }
}

/// One flag, fully mapped for a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub key: String,
    /// The key as a quoted string literal
    pub key_literal: String,
    /// The key made safe for a doc comment
    pub key_doc: String,
    pub identifier: String,
    pub flag_type: FlagType,
    pub native_type: &'static str,
    pub method: &'static str,
    /// Default value as a target literal
    pub default: String,
    pub doc: Vec<String>,
}

/// A renderer for one target ecosystem.
pub trait Generator: Send + Sync {
    fn target(&self) -> Target;

    /// MiniJinja template for the whole file.
    fn template(&self) -> &'static str;

    /// Resolves naming fields and the default file name, applying this
    /// target's policy for absent fields.
    ///
    /// # Errors
    /// * `Error::MissingConfigError` if a required naming field is absent
    /// * `Error::ConfigError` if a naming field is not a legal identifier
    fn preamble(&self, config: &TargetConfig) -> Result<Preamble>;

    /// Every top-level name emitted for a flag identifier. Collisions are
    /// checked across all of them.
    fn accessor_names(&self, identifier: &str) -> Vec<String> {
        vec![identifier.to_string()]
    }

    /// Top-level names the template itself imports or declares. An accessor
    /// that would shadow one gets a trailing `_` on its identifier.
    fn imported_names(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Identifier for `key` whose accessor names leave the generator's imports
/// alone.
fn accessor_identifier(generator: &dyn Generator, key: &str) -> Result<String> {
    let mut identifier = mapping::identifier(generator.target(), key)?;
    let imported = generator.imported_names();
    if generator
        .accessor_names(&identifier)
        .iter()
        .any(|name| imported.contains(&name.as_str()))
    {
        identifier.push('_');
    }
    Ok(identifier)
}

/// Registered renderer for `target`.
pub fn generator_for(target: Target) -> &'static dyn Generator {
    match target {
        Target::Go => &go::GoGenerator,
        Target::React => &react::ReactGenerator,
        Target::Nodejs => &nodejs::NodeJsGenerator,
        Target::Nestjs => &nestjs::NestJsGenerator,
        Target::Python => &python::PythonGenerator,
        Target::Csharp => &csharp::CSharpGenerator,
        Target::Java => &java::JavaGenerator,
    }
}

/// Maps every flag of `manifest` for `target`, in manifest order.
///
/// # Errors
/// * `Error::UnsupportedTypeError` if the target cannot represent a flag
/// * `Error::RenderError` if two keys produce the same accessor name, a key has
///   no identifier characters, or a default does not fit the native type
pub fn declarations(manifest: &Manifest, target: Target) -> Result<Vec<Declaration>> {
    let generator = generator_for(target);
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut declarations = Vec::with_capacity(manifest.flags().len());

    for flag in manifest.flags() {
        let mapping = mapping::map_type(target, flag)?;
        let identifier = accessor_identifier(generator, flag.key())?;

        for name in generator.accessor_names(&identifier) {
            if let Some(previous) = owners.insert(name.clone(), flag.key()) {
                return Err(Error::RenderError {
                    target,
                    message: format!(
                        "flags '{previous}' and '{}' both map to identifier '{name}'",
                        flag.key()
                    ),
                });
            }
        }

        declarations.push(Declaration {
            key: flag.key().to_string(),
            key_literal: mapping::string_literal(flag.key()),
            key_doc: mapping::doc_lines(target, Some(flag.key())).join(" "),
            identifier,
            flag_type: flag.flag_type(),
            native_type: mapping.native_type,
            method: mapping.method,
            default: mapping.default_literal(flag.key(), flag.default_value())?,
            doc: mapping::doc_lines(target, flag.description()),
        });
    }

    Ok(declarations)
}

/// Where `config` sends `target`'s file, without rendering anything.
pub fn output_path(target: Target, config: &TargetConfig) -> Result<PathBuf> {
    let preamble = generator_for(target).preamble(config)?;
    Ok(resolve_path(config, preamble.file_name))
}

fn resolve_path(config: &TargetConfig, default_file_name: String) -> PathBuf {
    let file_name = config
        .output_file
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(default_file_name);
    config.output_dir.join(file_name)
}

/// Renders `manifest` for `target`.
///
/// The result depends only on the manifest and the configuration, so the same
/// inputs always give byte-identical text.
pub fn render(
    renderer: &dyn TemplateRenderer,
    manifest: &Manifest,
    target: Target,
    config: &TargetConfig,
) -> Result<GeneratedArtifact> {
    let generator = generator_for(target);
    let preamble = generator.preamble(config)?;
    let flags = declarations(manifest, target)?;

    let methods: BTreeSet<&str> = flags.iter().map(|flag| flag.method).collect();
    let context = serde_json::json!({
        "banner": GENERATED_BANNER,
        "manifest_doc": mapping::comment_lines(manifest.description()),
        "package_name": preamble.package_name,
        "namespace": preamble.namespace,
        "flags": flags,
        "methods": methods,
        "uses_object": flags.iter().any(|flag| flag.flag_type == FlagType::Object),
    });

    debug!("Rendering {} flag(s) for {target}", flags.len());
    let content = renderer.render(generator.template(), &context)?;
    Ok(GeneratedArtifact::new(resolve_path(config, preamble.file_name), content))
}

/// Validates a single-segment identifier such as a Go package name.
fn identifier_field(target: Target, field: &str, value: &str) -> Result<String> {
    check_field(target, field, value, &IDENTIFIER)
}

/// Validates a dotted name such as a Java package or C# namespace.
fn dotted_field(target: Target, field: &str, value: &str) -> Result<String> {
    check_field(target, field, value, &DOTTED_IDENTIFIER)
}

fn check_field(target: Target, field: &str, value: &str, pattern: &Regex) -> Result<String> {
    let value = value.trim();
    if !pattern.is_match(value) {
        return Err(Error::ConfigError(format!(
            "'{value}' is not a valid {field} for target '{target}'"
        )));
    }

    if let Some(keyword) = value.split('.').find(|segment| keywords(target).contains(segment)) {
        return Err(Error::ConfigError(format!(
            "'{value}' is not a valid {field} for target '{target}': '{keyword}' is a keyword"
        )));
    }

    Ok(value.to_string())
}

/// Language keywords that cannot appear in a package or namespace.
fn keywords(target: Target) -> &'static [&'static str] {
    match target {
        Target::Go => &[
            "break", "case", "chan", "const", "continue", "default", "defer", "else",
            "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
            "package", "range", "return", "select", "struct", "switch", "type", "var",
        ],
        Target::Java => &[
            "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
            "class", "const", "continue", "default", "do", "double", "else", "enum", "extends",
            "false", "final", "finally", "float", "for", "goto", "if", "implements", "import",
            "instanceof", "int", "interface", "long", "native", "new", "null", "package",
            "private", "protected", "public", "return", "short", "static", "strictfp", "super",
            "switch", "synchronized", "this", "throw", "throws", "transient", "true", "try",
            "void", "volatile", "while",
        ],
        Target::Csharp => &[
            "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char",
            "checked", "class", "const", "continue", "decimal", "default", "delegate", "do",
            "double", "else", "enum", "event", "explicit", "extern", "false", "finally", "fixed",
            "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface",
            "internal", "is", "lock", "long", "namespace", "new", "null", "object", "operator",
            "out", "override", "params", "private", "protected", "public", "readonly", "ref",
            "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static", "string",
            "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
            "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
        ],
        Target::React | Target::Nodejs | Target::Nestjs | Target::Python => &[],
    }
}

/// Logs naming fields the target has no use for.
fn warn_unused(target: Target, config: &TargetConfig, uses_package: bool, uses_namespace: bool) {
    if !uses_package {
        if let Some(package_name) = config.package_name() {
            warn!("Target '{target}' does not use a package name, ignoring '{package_name}'");
        }
    }
    if !uses_namespace {
        if let Some(namespace) = config.namespace() {
            warn!("Target '{target}' does not use a namespace, ignoring '{namespace}'");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_target_is_registered() {
        for target in Target::ALL {
            assert_eq!(generator_for(target).target(), target);
        }
    }

    #[test]
    fn test_naming_patterns() {
        assert!(identifier_field(Target::Go, "package name", "demo").is_ok());
        assert!(identifier_field(Target::Go, "package name", "com.example").is_err());
        assert!(dotted_field(Target::Java, "package name", "com.example.flags").is_ok());
        assert!(dotted_field(Target::Java, "package name", "com..example").is_err());
        assert!(dotted_field(Target::Csharp, "namespace", "1Flags").is_err());
    }

    #[test]
    fn test_naming_fields_reject_keywords() {
        assert!(identifier_field(Target::Go, "package-name", "func").is_err());
        assert!(dotted_field(Target::Java, "package-name", "com.class.flags").is_err());
        assert!(dotted_field(Target::Csharp, "namespace", "Acme.namespace").is_err());
        assert!(dotted_field(Target::Csharp, "namespace", "Acme.Class").is_ok());
    }

    #[test]
    fn test_imported_hooks_are_not_shadowed() {
        let react = generator_for(Target::React);
        assert_eq!(accessor_identifier(react, "flag").unwrap(), "Flag_");
        assert_eq!(accessor_identifier(react, "suspense-flag").unwrap(), "SuspenseFlag_");
        assert_eq!(accessor_identifier(react, "new-ui").unwrap(), "NewUi");
    }

    #[test]
    fn test_output_file_override() {
        let config = TargetConfig::new("out").with_output_file("flags.ts");
        assert_eq!(output_path(Target::Nodejs, &config).unwrap(), PathBuf::from("out/flags.ts"));

        let config = TargetConfig::new("out");
        assert_eq!(
            output_path(Target::Nodejs, &config).unwrap(),
            PathBuf::from("out/openfeature.ts")
        );
    }
}
