//! Target identities and the per-invocation target configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One supported output ecosystem.
///
/// The set is closed: renderers are registered against these variants and an
/// unknown name is rejected before any I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Go SDK accessors
    Go,
    /// React SDK hooks (TypeScript)
    React,
    /// Node.js server SDK accessors (TypeScript)
    Nodejs,
    /// NestJS SDK decorators (TypeScript)
    Nestjs,
    /// Python SDK accessors
    Python,
    /// .NET SDK accessors
    Csharp,
    /// Java SDK accessors
    Java,
}

impl Target {
    pub const ALL: [Target; 7] = [
        Target::Go,
        Target::React,
        Target::Nodejs,
        Target::Nestjs,
        Target::Python,
        Target::Csharp,
        Target::Java,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Target::Go => "go",
            Target::React => "react",
            Target::Nodejs => "nodejs",
            Target::Nestjs => "nestjs",
            Target::Python => "python",
            Target::Csharp => "csharp",
            Target::Java => "java",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.name()).collect()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| Error::UnknownTargetError { target: s.to_string() })
    }
}

/// Per-invocation parameters for one target.
///
/// Naming fields are not validated here; the renderer that consumes them
/// decides whether they are legal, required or ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetConfig {
    /// Directory the generated file is written into
    pub output_dir: PathBuf,
    /// Overrides the target's default file name
    pub output_file: Option<String>,
    /// Package name (go, java)
    pub package_name: Option<String>,
    /// Namespace (csharp)
    pub namespace: Option<String>,
}

impl TargetConfig {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self { output_dir: output_dir.into(), ..Self::default() }
    }

    pub fn with_package_name<S: Into<String>>(mut self, package_name: S) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_output_file<S: Into<String>>(mut self, output_file: S) -> Self {
        self.output_file = Some(output_file.into());
        self
    }

    /// Package name with empty strings treated as absent.
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Namespace with empty strings treated as absent.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_round_trips_through_its_name() {
        for target in Target::ALL {
            assert_eq!(target.name().parse::<Target>().unwrap(), target);
        }
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        match "rust".parse::<Target>() {
            Err(Error::UnknownTargetError { target }) => assert_eq!(target, "rust"),
            other => panic!("Expected UnknownTargetError, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_naming_fields_are_absent() {
        let config = TargetConfig::new("out").with_package_name("  ").with_namespace("");
        assert_eq!(config.package_name(), None);
        assert_eq!(config.namespace(), None);
    }
}
