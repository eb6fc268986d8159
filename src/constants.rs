//! Common constants used throughout openfeature-codegen.

/// Supported configuration file names, looked up in the working directory
pub const CONFIG_FILES: [&str; 3] = [".openfeature.yaml", ".openfeature.yml", ".openfeature.json"];

/// Manifest path used when neither the command line nor the config file names one
pub const DEFAULT_MANIFEST: &str = "flags.json";

/// Output directory used when neither the command line nor the config file names one
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// `$schema` value written by `init`
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/open-feature/cli/main/schema/v0/flag-manifest.json";

/// Version assumed when a manifest has no `$schema` marker
pub const CURRENT_SCHEMA_VERSION: &str = "v0";

pub const SUPPORTED_SCHEMA_VERSIONS: [&str; 1] = ["v0"];

/// First line of every generated file
pub const GENERATED_BANNER: &str = "Code generated by openfeature-codegen. DO NOT EDIT.";
