//! Validation engine.
//!
//! # Data Flow
//! ```text
//! ValidationCycle::run
//!     → discover::find_config_files
//!     → ValidationOrchestrator::run_all
//!         job queue → N workers → task.rs (read, parse, rules, plugins)
//!         → completion channel tagged with submission index
//!     → reporting::aggregate → write_report + console summary
//! ```
//!
//! # Design Decisions
//! - RuleValidator and PluginRegistry are shared read-only behind `Arc`
//! - Parsing and rule evaluation run on the blocking pool; file reads are async
//! - A task that panics, is cancelled or overruns its budget yields a
//!   placeholder result for its own index; the run always completes

pub mod cycle;
pub mod orchestrator;
pub mod task;

pub use cycle::ValidationCycle;
pub use orchestrator::{TaskOutcome, ValidationOrchestrator};
pub use task::{validate_bytes, validate_file};
