//! Configuration file discovery.
//!
//! # Design Decisions
//! - Recursive walk, results sorted by path for stable runs
//! - A missing or non-directory root is the only fatal discovery failure
//! - Unreadable subdirectories are logged and skipped

pub mod scanner;

pub use scanner::{find_config_files, has_monitored_extension, DiscoveryError};
