//! Plugin extension subsystem.
//!
//! # Data Flow
//! ```text
//! plugins/ directory
//!     → registry.rs (enumerate *.toml, skip `_*`, sorted by name)
//!     → manifest.rs (parse + compile one declarative unit)
//!     → Arc<PluginRegistry> shared read-only by all workers
//!
//! Per document:
//!     PluginRegistry::run(config)
//!     → each Plugin::evaluate in load order
//!     → failures and panics become `plugin` issues
//! ```
//!
//! # Design Decisions
//! - Units are data, not code: nothing executes at load time
//! - One broken unit never blocks loading or running the others
//! - The `Plugin` trait is the seam; embedders may register their own units

pub mod contract;
pub mod manifest;
pub mod registry;

pub use contract::{Plugin, PluginError, PluginLoadError};
pub use manifest::ManifestPlugin;
pub use registry::PluginRegistry;
