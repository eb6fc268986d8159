//! Configuration file handling.
//! An optional `.openfeature.yaml` (or `.yml` / `.json`) supplies defaults for
//! the manifest path, the output directory and per-target naming fields. The
//! command line always wins over the file.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::constants::{CONFIG_FILES, DEFAULT_MANIFEST, DEFAULT_OUTPUT_DIR};
use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::target::{Target, TargetConfig};

/// Per-target settings, from the config file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TargetOverrides {
    pub package_name: Option<String>,
    pub namespace: Option<String>,
    pub output: Option<PathBuf>,
    pub output_file: Option<String>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub manifest: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub targets: IndexMap<Target, TargetOverrides>,
}

impl Config {
    /// Manifest path: command line, then config file, then `flags.json`.
    pub fn manifest_path(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.manifest.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
    }

    /// Builds the configuration for `target`. Each field is taken from the
    /// command line if given, then the target's section, then the top level.
    pub fn target_config(&self, target: Target, cli: &TargetOverrides) -> TargetConfig {
        let section = self.targets.get(&target).cloned().unwrap_or_default();

        let output_dir = cli
            .output
            .clone()
            .or(section.output)
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        TargetConfig {
            output_dir,
            output_file: cli.output_file.clone().or(section.output_file),
            package_name: cli.package_name.clone().or(section.package_name),
            namespace: cli.namespace.clone().or(section.namespace),
        }
    }
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the configuration file.
///
/// With an explicit `path` the file must exist. Otherwise each of
/// [`CONFIG_FILES`] is tried in `dir`, and an empty configuration is returned
/// when none is present.
///
/// # Errors
/// * `Error::ConfigError` if an explicit path is missing or the file is invalid
/// * `Error::IoError` if a present file cannot be read
pub fn load_config(storage: &dyn Storage, dir: &Path, path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(path) if !storage.exists(path) => {
            return Err(Error::ConfigError(format!(
                "Configuration file '{}' does not exist",
                path.display()
            )));
        }
        Some(path) => path.to_path_buf(),
        None => match CONFIG_FILES.iter().map(|f| dir.join(f)).find(|p| storage.exists(p)) {
            Some(found) => found,
            None => {
                debug!("No configuration file found (tried: {})", CONFIG_FILES.join(", "));
                return Ok(Config::default());
            }
        },
    };

    debug!("Loading configuration from {}", config_path.display());
    let bytes = storage.read(&config_path).map_err(Error::io(&config_path))?;
    let content = String::from_utf8(bytes).map_err(|e| {
        Error::ConfigError(format!("'{}' is not valid UTF-8: {e}", config_path.display()))
    })?;
    parse_config(&content)
}
