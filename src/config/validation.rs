//! Settings validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GuardianConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;
use crate::config::schema::GuardianConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single invalid setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check semantic constraints serde cannot express.
pub fn validate_config(config: &GuardianConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.engine.workers == 0 {
        errors.push(ValidationError::new("engine.workers", "must be at least 1"));
    }
    if config.engine.task_timeout_ms == Some(0) {
        errors.push(ValidationError::new("engine.task_timeout_ms", "must be greater than 0 when set"));
    }

    if config.scan.extensions.is_empty() {
        errors.push(ValidationError::new("scan.extensions", "at least one extension is required"));
    }
    for ext in &config.scan.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            errors.push(ValidationError::new(
                "scan.extensions",
                format!("'{}' must be a non-empty extension without a leading dot", ext),
            ));
        }
    }

    if config.watch.debounce_ms == 0 {
        errors.push(ValidationError::new("watch.debounce_ms", "must be greater than 0"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }
    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("'{}' is not a socket address", addr),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
