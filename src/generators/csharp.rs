//! .NET SDK accessors: async methods on a `GeneratedClient` wrapper.

use super::{dotted_field, warn_unused, Generator, Preamble};
use crate::error::Result;
use crate::target::{Target, TargetConfig};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "OpenFeature.Generated";

pub struct CSharpGenerator;

impl Generator for CSharpGenerator {
    fn target(&self) -> Target {
        Target::Csharp
    }

    fn template(&self) -> &'static str {
        include_str!("templates/csharp.cs.j2")
    }

    fn accessor_names(&self, identifier: &str) -> Vec<String> {
        vec![format!("{identifier}Async")]
    }

    /// The namespace is optional and falls back to [`DEFAULT_NAMESPACE`].
    fn preamble(&self, config: &TargetConfig) -> Result<Preamble> {
        warn_unused(Target::Csharp, config, false, true);
        let namespace = match config.namespace() {
            Some(namespace) => dotted_field(Target::Csharp, "namespace", namespace)?,
            None => DEFAULT_NAMESPACE.to_string(),
        };

        Ok(Preamble {
            file_name: "OpenFeature.g.cs".to_string(),
            package_name: None,
            namespace: Some(namespace),
        })
    }
}
