//! Java SDK accessors: static getters on a final `OpenFeature` class.

use super::{dotted_field, warn_unused, Generator, Preamble};
use crate::error::{Error, Result};
use crate::target::{Target, TargetConfig};

pub struct JavaGenerator;

impl Generator for JavaGenerator {
    fn target(&self) -> Target {
        Target::Java
    }

    fn template(&self) -> &'static str {
        include_str!("templates/java.java.j2")
    }

    fn accessor_names(&self, identifier: &str) -> Vec<String> {
        vec![format!("get{identifier}")]
    }

    /// Java has no usable default package, so the package name is required.
    fn preamble(&self, config: &TargetConfig) -> Result<Preamble> {
        warn_unused(Target::Java, config, true, false);
        let package_name = config.package_name().ok_or(Error::MissingConfigError {
            target: Target::Java,
            field: "package-name",
        })?;

        Ok(Preamble {
            file_name: "OpenFeature.java".to_string(),
            package_name: Some(dotted_field(Target::Java, "package-name", package_name)?),
            namespace: None,
        })
    }
}
