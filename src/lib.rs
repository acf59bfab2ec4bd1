//! Config Guardian library.
//!
//! Validates deployment configuration files against built-in rules and
//! declarative plugins, concurrently, with an optional watch mode.

pub mod cli;
pub mod config;
pub mod discover;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod plugins;
pub mod reporting;
pub mod validate;
pub mod watch;

pub use config::GuardianConfig;
pub use engine::{ValidationCycle, ValidationOrchestrator};
pub use error::GuardianError;
pub use model::{Issue, Severity, ValidationResult};
pub use plugins::{Plugin, PluginRegistry};
pub use reporting::Report;
pub use validate::RuleValidator;
