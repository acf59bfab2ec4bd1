//! Settings loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::config::schema::GuardianConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "guardian.toml";

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Load settings from a TOML file without validating them.
pub fn load_config(path: &Path) -> Result<GuardianConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings for this run: the explicit file if given, else `guardian.toml`
/// when it exists, else defaults. `apply` runs before validation so CLI
/// overrides are validated too.
pub fn resolve_config(
    explicit: Option<&Path>,
    apply: impl FnOnce(&mut GuardianConfig),
) -> Result<GuardianConfig, ConfigError> {
    let mut config = match explicit {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load_config(Path::new(DEFAULT_CONFIG_FILE))?,
        None => GuardianConfig::default(),
    };

    apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
