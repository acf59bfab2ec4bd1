//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events inside per-component spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr via tracing-subscriber fmt layer
//!     → optional Prometheus scrape endpoint (watch mode)
//! ```
//!
//! # Design Decisions
//! - Components receive a parent span at construction instead of a global logger
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops

pub mod logging;
pub mod metrics;
