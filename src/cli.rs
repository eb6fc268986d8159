//! Command-line interface implementation for openfeature-codegen.
//! Provides argument parsing and help text formatting using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::TargetOverrides;
use crate::target::Target;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate typed feature flag accessors from a flag manifest", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to .openfeature.yaml in the working directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate accessors for one or more targets.
    /// Existing generated files are overwritten.
    Generate(GenerateArgs),

    /// Create a manifest with no flags
    Init(InitArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Targets to generate
    #[arg(value_name = "TARGET", required = true, value_enum)]
    pub targets: Vec<Target>,

    /// Path to the flag manifest
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Directory the generated files are written into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// File name to use instead of the target's default
    #[arg(long, value_name = "NAME")]
    pub output_file: Option<String>,

    /// Package name (go, java)
    #[arg(long, value_name = "NAME")]
    pub package_name: Option<String>,

    /// Namespace (csharp)
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<String>,
}

impl GenerateArgs {
    /// Naming fields given on the command line.
    pub fn overrides(&self) -> TargetOverrides {
        TargetOverrides {
            package_name: self.package_name.clone(),
            namespace: self.namespace.clone(),
            output: self.output.clone(),
            output_file: self.output_file.clone(),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Where to create the manifest
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Overwrite an existing manifest
    #[arg(short, long)]
    pub force: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
