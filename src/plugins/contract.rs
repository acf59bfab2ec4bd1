//! Contract shared by every validation unit.

use std::path::PathBuf;
use serde_yaml::Mapping;
use thiserror::Error;
use crate::model::Issue;

/// An externally supplied validation unit.
///
/// Implementations are shared across worker threads and must not keep
/// per-call mutable state.
pub trait Plugin: Send + Sync {
    /// Unit identity, used in logs.
    fn name(&self) -> &str;

    /// Inspect one parsed configuration.
    fn evaluate(&self, config: &Mapping) -> Result<Vec<Issue>, PluginError>;
}

/// Failure of a single `evaluate` call.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A strict check found a value of the wrong type.
    #[error("field '{field}' must be a {expected}")]
    TypeMismatch { field: String, expected: &'static str },

    /// Any other failure reported by the unit.
    #[error("{0}")]
    Failed(String),
}

/// Failure to admit one unit into the registry.
#[derive(Debug, Error)]
pub enum PluginLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid pattern '{pattern}' in {path}: {source}")]
    Pattern {
        path: PathBuf,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("check #{index} in {path} ({kind}) requires a pattern")]
    MissingPattern {
        path: PathBuf,
        index: usize,
        kind: &'static str,
    },

    #[error("{path} does not implement evaluate")]
    MissingEntryPoint { path: PathBuf },
}
