//! Run-level errors.
//!
//! Everything scoped to one file or one plugin is reported as data. Only
//! conditions that make a run meaningless end up here.

use thiserror::Error;
use crate::config::ConfigError;
use crate::discover::DiscoveryError;
use crate::reporting::ReportError;

#[derive(Debug, Error)]
pub enum GuardianError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
}
