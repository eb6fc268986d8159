use super::{warn_unused, Generator, Preamble};
use crate::error::Result;
use crate::target::{Target, TargetConfig};

pub struct PythonGenerator;

impl Generator for PythonGenerator {
    fn target(&self) -> Target {
        Target::Python
    }

    fn template(&self) -> &'static str {
        include_str!("templates/python.py.j2")
    }

    fn preamble(&self, config: &TargetConfig) -> Result<Preamble> {
        warn_unused(Target::Python, config, false, false);
        Ok(Preamble::new("openfeature.py"))
    }
}
