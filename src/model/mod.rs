//! Validation data model.
//!
//! # Data Flow
//! ```text
//! RuleValidator / PluginRegistry
//!     → Issue (field, message, severity)
//!     → ValidationResult (one per file, validity derived from issues)
//!     → reporting::aggregate → Report
//! ```
//!
//! # Design Decisions
//! - Issues are immutable values; validity is never set by hand
//! - `config` is `None` whenever the document could not be used as a mapping

pub mod issue;
pub mod result;

pub use issue::{Issue, Severity};
pub use result::ValidationResult;
