//! Error handling for openfeature-codegen.
//! Defines the error taxonomy shared by the loader, the renderers, the writer
//! and the orchestrator.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::FlagType;
use crate::target::Target;

/// Custom error types for code generation.
///
/// Every variant carries the manifest path, flag key or target needed to act on
/// it without re-running. None of them are retried internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed manifest syntax.
    #[error("Failed to parse manifest '{manifest}'{}: {message}.", location(.line, .column))]
    ParseError {
        manifest: String,
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// Structural problems: schema violations, empty or duplicate keys.
    #[error("Invalid manifest '{manifest}': {message}.")]
    ValidationError { manifest: String, message: String },

    /// A flag declares a type outside the closed FlagType set.
    #[error("Flag '{key}' in '{manifest}' has unknown type '{flag_type}'.")]
    UnknownTypeError { manifest: String, key: String, flag_type: String },

    /// A flag's default value does not have the shape of its declared type.
    #[error("Flag '{key}' in '{manifest}' is declared as {flag_type} but its default value is {value}.")]
    TypeMismatchError {
        manifest: String,
        key: String,
        flag_type: FlagType,
        value: String,
    },

    /// The target has no representation for the flag's type.
    #[error("Target '{target}' cannot represent flag '{key}' of type {flag_type}.")]
    UnsupportedTypeError {
        target: Target,
        key: String,
        flag_type: FlagType,
    },

    /// Identifier collisions and literals the target cannot express.
    #[error("Render error for target '{target}': {message}.")]
    RenderError { target: Target, message: String },

    /// A naming field the target requires was not supplied.
    #[error("Target '{target}' requires a {field}, pass it with --{field}.")]
    MissingConfigError { target: Target, field: &'static str },

    /// Invalid configuration: illegal naming fields, colliding output paths,
    /// unreadable configuration files.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The requested target is not registered.
    #[error("Unknown target '{target}', expected one of: {}.", Target::names().join(", "))]
    UnknownTargetError { target: String },

    /// `init` refused to overwrite an existing manifest.
    #[error("Manifest '{path}' already exists. Use --force to overwrite it.")]
    ManifestExistsError { path: String },

    /// Template engine failures.
    #[error("Template error: {0}.")]
    TemplateError(#[from] minijinja::Error),

    /// Read, write and directory failures, with the attempted path.
    #[error("IO error at '{}': {source}.", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" at line {line}, column {column}"),
        (Some(line), None) => format!(" at line {line}"),
        _ => String::new(),
    }
}

impl Error {
    /// Wraps an I/O failure together with the path that was being accessed.
    pub fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::IoError { path, source }
    }
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
