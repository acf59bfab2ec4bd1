//! Fixed rule set applied to every configuration document.
//!
//! # Rules
//! - `required_keys`: `service`, `image` and `replicas` must be present
//! - `replicas`: integer in `1..=50`
//! - `image`: `<registry>/<service>:<version>`
//! - `env`: mapping with uppercase string keys and scalar values

use std::ops::RangeInclusive;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use crate::model::Issue;

/// Keys every document must define, in lexicographic order.
pub const REQUIRED_KEYS: [&str; 3] = ["image", "replicas", "service"];

/// Accepted replica counts.
pub const REPLICAS_RANGE: RangeInclusive<i64> = 1..=50;

/// `<registry>/<service>:<version>`, each token from `[A-Za-z0-9._-]`.
pub const IMAGE_PATTERN: &str = r"^[a-zA-Z0-9._-]+/[a-zA-Z0-9._-]+:[a-zA-Z0-9._-]+$";

/// Applies the built-in rules. Holds only immutable state and is shared
/// across workers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RuleValidator {
    image_pattern: Regex,
}

impl RuleValidator {
    pub fn new() -> Self {
        Self {
            image_pattern: Regex::new(IMAGE_PATTERN).expect("IMAGE_PATTERN is a valid regex"),
        }
    }

    /// Validate one mapping document. All rules run; issues are returned in
    /// rule order.
    pub fn validate(&self, config: &Mapping) -> Vec<Issue> {
        let mut issues = Vec::new();

        self.check_required_keys(config, &mut issues);

        if let Some(replicas) = config.get("replicas") {
            self.check_replicas(replicas, &mut issues);
        }
        if let Some(image) = config.get("image") {
            self.check_image(image, &mut issues);
        }
        if let Some(env) = config.get("env") {
            self.check_env(env, &mut issues);
        }

        issues
    }

    fn check_required_keys(&self, config: &Mapping, issues: &mut Vec<Issue>) {
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !config.contains_key(*key))
            .collect();

        if !missing.is_empty() {
            issues.push(Issue::error(
                "required_keys",
                format!("Missing required keys: {}", missing.join(", ")),
            ));
        }
    }

    fn check_replicas(&self, replicas: &Value, issues: &mut Vec<Issue>) {
        let count = match replicas {
            Value::Number(n) if n.is_i64() => n.as_i64(),
            // Larger than i64::MAX: an integer, but certainly out of range.
            Value::Number(n) if n.is_u64() => None,
            _ => {
                issues.push(Issue::error("replicas", "replicas must be an integer"));
                return;
            }
        };

        if !count.is_some_and(|c| REPLICAS_RANGE.contains(&c)) {
            issues.push(Issue::error(
                "replicas",
                format!(
                    "replicas must be between {} and {}",
                    REPLICAS_RANGE.start(),
                    REPLICAS_RANGE.end()
                ),
            ));
        }
    }

    fn check_image(&self, image: &Value, issues: &mut Vec<Issue>) {
        let Some(image) = image.as_str() else {
            issues.push(Issue::error("image", "image must be a string"));
            return;
        };

        if !self.image_pattern.is_match(image) {
            issues.push(Issue::error(
                "image",
                "image must follow pattern <registry>/<service>:<version>",
            ));
        }
    }

    fn check_env(&self, env: &Value, issues: &mut Vec<Issue>) {
        let Some(env) = env.as_mapping() else {
            issues.push(Issue::error("env", "env must be a dictionary of key-value pairs"));
            return;
        };

        for (key, value) in env {
            let Some(key) = key.as_str() else {
                issues.push(Issue::error(
                    "env",
                    format!("env key must be string, got {}", value_kind(key)),
                ));
                continue;
            };

            if key != key.to_uppercase() {
                issues.push(Issue::error("env", format!("env key '{}' must be uppercase", key)));
            }

            if !is_simple(value) {
                issues.push(Issue::error(
                    "env",
                    format!(
                        "env value for '{}' must be a simple type (string, number, or boolean)",
                        key
                    ),
                ));
            }
        }
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry part of an image reference: everything before the first `/`.
///
/// Returns `None` for non-strings and references without a registry.
pub fn extract_registry(image: &Value) -> Option<&str> {
    let (registry, _) = image.as_str()?.split_once('/')?;
    if registry.is_empty() {
        None
    } else {
        Some(registry)
    }
}

fn is_simple(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Type name used in `env` key messages: `int`, `bool`, `NoneType` and so on.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "dict",
        Value::Tagged(_) => "tagged",
    }
}
