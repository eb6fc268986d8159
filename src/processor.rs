//! Generation orchestration: loader, renderer and writer run strictly in
//! sequence for each target. Nothing is cached between calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::generators;
use crate::manifest::{self, Manifest};
use crate::renderer::TemplateRenderer;
use crate::storage::Storage;
use crate::target::{Target, TargetConfig};
use crate::writer::write_artifact;

/// One target to generate within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub target: Target,
    pub config: TargetConfig,
}

impl Request {
    pub fn new(target: Target, config: TargetConfig) -> Self {
        Self { target, config }
    }
}

/// Result of one request within a batch.
#[derive(Debug)]
pub struct Outcome {
    pub target: Target,
    /// Written path, or the error that stopped this target
    pub result: Result<PathBuf>,
}

/// Drives manifest loading, rendering and writing.
pub struct Processor<'a> {
    storage: &'a dyn Storage,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Processor<'a> {
    pub fn new(storage: &'a dyn Storage, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { storage, renderer }
    }

    /// Generates one target's file from the manifest at `manifest_path`.
    ///
    /// The target name is resolved before any I/O. The first failing stage
    /// aborts the rest, so nothing is written unless rendering succeeded.
    ///
    /// # Errors
    /// * `Error::UnknownTargetError` for an unregistered target name
    /// * any loader, renderer or writer error, unchanged
    pub fn generate(
        &self,
        target: &str,
        manifest_path: &Path,
        config: &TargetConfig,
    ) -> Result<PathBuf> {
        let target: Target = target.parse()?;
        let manifest = manifest::load(self.storage, manifest_path)?;
        self.generate_from(&manifest, target, config)
    }

    /// Generates every request from one manifest load.
    ///
    /// Output paths are resolved first; requests that would write the same
    /// file are rejected before anything is read or written. The targets then
    /// run in parallel, each on its own thread, and their outcomes come back
    /// in request order. One target failing does not stop the others.
    ///
    /// # Errors
    /// * `Error::ConfigError` if two requests share an output path
    /// * any target configuration error found while resolving paths
    /// * any loader error
    pub fn generate_all(&self, manifest_path: &Path, requests: &[Request]) -> Result<Vec<Outcome>> {
        let mut claimed: HashMap<PathBuf, Target> = HashMap::new();
        for request in requests {
            let path = generators::output_path(request.target, &request.config)?;
            if let Some(previous) = claimed.insert(path.clone(), request.target) {
                return Err(Error::ConfigError(format!(
                    "targets '{previous}' and '{}' would both write '{}'",
                    request.target,
                    path.display()
                )));
            }
        }

        let manifest = manifest::load(self.storage, manifest_path)?;
        debug!("Generating {} target(s) from {}", requests.len(), manifest_path.display());

        let outcomes: Vec<Outcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = requests
                .iter()
                .map(|request| {
                    let manifest = &manifest;
                    scope.spawn(move || Outcome {
                        target: request.target,
                        result: self.generate_from(manifest, request.target, &request.config),
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        Ok(outcomes)
    }

    fn generate_from(
        &self,
        manifest: &Manifest,
        target: Target,
        config: &TargetConfig,
    ) -> Result<PathBuf> {
        let artifact = generators::render(self.renderer, manifest, target, config)?;
        let path = write_artifact(self.storage, artifact)?;
        debug!("Generated {target} accessors in {}", path.display());
        Ok(path)
    }
}
