//! Validation of a single file.

use std::fs;
use std::path::Path;
use crate::model::ValidationResult;
use crate::plugins::PluginRegistry;
use crate::validate::{load_mapping, read_failure, RuleValidator};

/// Validate already-read file content.
///
/// Plugins run whenever the document is a mapping, whether or not the
/// built-in rules found errors.
pub fn validate_bytes(
    path: &Path,
    bytes: &[u8],
    rules: &RuleValidator,
    plugins: &PluginRegistry,
) -> ValidationResult {
    let config = match load_mapping(bytes) {
        Ok(config) => config,
        Err(issue) => {
            tracing::error!(path = %path.display(), "{}", issue.message);
            return ValidationResult::rejected(path, issue);
        }
    };

    let mut issues = rules.validate(&config);
    issues.extend(plugins.run(&config));

    ValidationResult::from_issues(path, issues, Some(config))
}

/// Read and validate a file synchronously.
pub fn validate_file(path: &Path, rules: &RuleValidator, plugins: &PluginRegistry) -> ValidationResult {
    match fs::read(path) {
        Ok(bytes) => validate_bytes(path, &bytes, rules, plugins),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "I/O error reading file");
            ValidationResult::rejected(path, read_failure(&e))
        }
    }
}
