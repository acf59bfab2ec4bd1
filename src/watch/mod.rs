//! Continuous re-validation.
//!
//! # Data Flow
//! ```text
//! notify::RecommendedWatcher (source.rs)
//!     → ChangeEvent { path, is_directory } over an mpsc channel
//!     → WatchTrigger (trigger.rs): filter → Debouncer → CycleRunner
//!     → ValidationCycle::run (discover, validate, report)
//! ```
//!
//! # States
//! ```text
//! Idle → Running: monitored file changed, debounce window elapsed
//! Running → Idle: cycle finished (successfully or not)
//! Idle → Stopped: shutdown signal or event stream closed
//! ```
//!
//! # Design Decisions
//! - Debounce is "ignore events inside the window after a trigger"
//! - Shutdown only interrupts the wait for events; a running cycle finishes
//! - A failing cycle is logged and the loop keeps going

pub mod source;
pub mod trigger;

pub use source::NotifySource;
pub use trigger::{ChangeEvent, CycleRunner, Debouncer, EventDisposition, WatchState, WatchStats, WatchTrigger};
