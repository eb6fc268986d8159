//! Go SDK accessors: one exported function per flag.

use super::{identifier_field, warn_unused, Generator, Preamble};
use crate::error::Result;
use crate::target::{Target, TargetConfig};

/// Package used when none is configured.
pub const DEFAULT_PACKAGE: &str = "openfeature";

pub struct GoGenerator;

impl Generator for GoGenerator {
    fn target(&self) -> Target {
        Target::Go
    }

    fn template(&self) -> &'static str {
        include_str!("templates/go.go.j2")
    }

    /// The package name is optional and falls back to [`DEFAULT_PACKAGE`].
    /// The file is named after the package.
    fn preamble(&self, config: &TargetConfig) -> Result<Preamble> {
        warn_unused(Target::Go, config, true, false);
        let package_name = match config.package_name() {
            Some(name) => identifier_field(Target::Go, "package-name", name)?,
            None => DEFAULT_PACKAGE.to_string(),
        };

        Ok(Preamble {
            file_name: format!("{package_name}.go"),
            package_name: Some(package_name),
            namespace: None,
        })
    }
}
