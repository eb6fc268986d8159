//! openfeature-codegen turns a declarative feature flag manifest into typed
//! accessor code for several OpenFeature SDKs.
//!
//! The pipeline runs in one direction: the manifest loader produces a
//! validated [`manifest::Manifest`], a target renderer maps it through the
//! [`mapping`] table into source text, and the [`writer`] persists it. The
//! [`processor`] drives those stages for one or many targets.

/// Command-line interface definitions
pub mod cli;

/// Configuration file handling
/// Supports JSON and YAML formats (.openfeature.yaml, .openfeature.yml, .openfeature.json)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Per-target renderers and the declaration records they consume
pub mod generators;

pub mod logger;

/// Manifest model, loading and validation
pub mod manifest;

/// Per-target type mapping table: native types, literals, identifier casing
pub mod mapping;

/// Generation orchestration
pub mod processor;

/// Template rendering engine
pub mod renderer;

/// Storage capability used by the loader and the writer
pub mod storage;

/// Target identities and per-target configuration
pub mod target;

/// Output writer
pub mod writer;
