//! Output writer.
//!
//! Generated files are always overwritten in full. This is a regeneration
//! tool, not a merge tool: manual edits to a generated file are lost on the
//! next run.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Rendered text and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    path: PathBuf,
    content: String,
}

impl GeneratedArtifact {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, content: S) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Persists `artifact`, creating missing parent directories and replacing any
/// existing file. Returns the written path.
///
/// # Errors
/// * `Error::IoError` with the directory path if it cannot be created, for
///   example because a file is in the way
/// * `Error::IoError` with the destination path if the write fails; the
///   previous file, if any, is left untouched
pub fn write_artifact(storage: &dyn Storage, artifact: GeneratedArtifact) -> Result<PathBuf> {
    let GeneratedArtifact { path, content } = artifact;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        storage.create_dir_all(parent).map_err(Error::io(parent))?;
    }

    debug!("Writing file: {}", path.display());
    storage.write(&path, content.as_bytes()).map_err(Error::io(&path))?;
    Ok(path)
}
