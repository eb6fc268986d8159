//! Node.js server SDK accessors.

use super::{warn_unused, Generator, Preamble};
use crate::error::Result;
use crate::target::{Target, TargetConfig};

pub struct NodeJsGenerator;

impl Generator for NodeJsGenerator {
    fn target(&self) -> Target {
        Target::Nodejs
    }

    fn template(&self) -> &'static str {
        include_str!("templates/nodejs.ts.j2")
    }

    fn preamble(&self, config: &TargetConfig) -> Result<Preamble> {
        warn_unused(Target::Nodejs, config, false, false);
        Ok(Preamble::new("openfeature.ts"))
    }
}
