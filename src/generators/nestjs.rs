//! NestJS decorators wrapping the SDK's typed feature flag decorators.

use super::{warn_unused, Generator, Preamble};
use crate::error::Result;
use crate::target::{Target, TargetConfig};

pub struct NestJsGenerator;

impl Generator for NestJsGenerator {
    fn target(&self) -> Target {
        Target::Nestjs
    }

    fn template(&self) -> &'static str {
        include_str!("templates/nestjs.ts.j2")
    }

    fn preamble(&self, config: &TargetConfig) -> Result<Preamble> {
        warn_unused(Target::Nestjs, config, false, false);
        Ok(Preamble::new("openfeature-decorators.ts"))
    }
}
