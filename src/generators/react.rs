//! React SDK hooks, a regular and a suspense variant per flag.

use super::{warn_unused, Generator, Preamble};
use crate::error::Result;
use crate::target::{Target, TargetConfig};

pub struct ReactGenerator;

impl Generator for ReactGenerator {
    fn target(&self) -> Target {
        Target::React
    }

    fn template(&self) -> &'static str {
        include_str!("templates/react.ts.j2")
    }

    fn accessor_names(&self, identifier: &str) -> Vec<String> {
        vec![format!("use{identifier}"), format!("useSuspense{identifier}")]
    }

    fn imported_names(&self) -> &'static [&'static str] {
        &["useFlag", "useSuspenseFlag"]
    }

    fn preamble(&self, config: &TargetConfig) -> Result<Preamble> {
        warn_unused(Target::React, config, false, false);
        Ok(Preamble::new("openfeature.ts"))
    }
}
