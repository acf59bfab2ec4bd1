//! Report generation.
//!
//! # Data Flow
//! ```text
//! Vec<ValidationResult>
//!     → aggregator.rs (stats, sorted file lists, registry counts)
//!     → Report
//!     → sink.rs (pretty JSON file + console summary)
//! ```
//!
//! # Design Decisions
//! - Aggregation is stateless and order-insensitive; sorting happens here,
//!   never relied upon from completion order
//! - Only report writing can fail, and that failure is fatal

pub mod aggregator;
pub mod sink;

pub use aggregator::{aggregate, InvalidFile, Report, ReportStats, ValidFile};
pub use sink::{render_summary, write_report, ReportError};
