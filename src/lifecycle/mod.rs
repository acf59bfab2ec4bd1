//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate root → Initial cycle → (watch mode) start notification source + trigger loop
//!
//! Shutdown (shutdown.rs):
//!     Stop requested → watch loop leaves its wait → subscription released → Exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - A missing root is fatal before any work starts
//! - Shutdown never interrupts an in-flight validation cycle

pub mod shutdown;
pub mod signals;
pub mod startup;
