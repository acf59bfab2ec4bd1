//! Tool settings.
//!
//! # Data Flow
//! ```text
//! guardian.toml (optional)
//!     → loader.rs (read & deserialize, defaults for every field)
//!     → CLI flags override individual fields
//!     → validation.rs (semantic checks)
//!     → GuardianConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the tool runs without a settings file
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, DEFAULT_CONFIG_FILE};
pub use schema::GuardianConfig;
pub use schema::{EngineConfig, ObservabilityConfig, PluginsConfig, ReportConfig, ScanConfig, WatchConfig};
pub use validation::{validate_config, ValidationError};
