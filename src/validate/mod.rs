//! Built-in validation.
//!
//! # Data Flow
//! ```text
//! file bytes
//!     → document.rs (YAML parse, root must be a mapping)
//!     → rules.rs (fixed rule set: required keys, replicas, image, env)
//!     → Vec<Issue>
//! ```
//!
//! # Design Decisions
//! - Every rule runs; no short-circuit after the first failure
//! - Rule evaluation is a pure function of the mapping
//! - Parse failures are data (an Issue), never an error value

pub mod document;
pub mod rules;

pub use document::{load_mapping, parse_document, read_failure};
pub use rules::{extract_registry, RuleValidator};
