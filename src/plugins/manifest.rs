//! Declarative plugin units.
//!
//! A unit is a TOML file whose `[evaluate]` table lists checks:
//!
//! ```toml
//! name = "check-latest-tag"
//!
//! [[evaluate.checks]]
//! kind = "deny_match"
//! field = "image"
//! pattern = "(?i):latest$"
//! message = "Image tag should not be 'latest' - use specific version tags"
//! ```
//!
//! Check kinds: `deny_match`, `require_match`, `deny_key_match`, `require_key`.
//! Messages may reference `{field}`, `{key}` and `{value}`.

use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use crate::model::{Issue, Severity};
use crate::plugins::contract::{Plugin, PluginError, PluginLoadError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    name: Option<String>,
    description: Option<String>,
    evaluate: Option<RawEvaluate>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEvaluate {
    #[serde(default)]
    checks: Vec<RawCheck>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCheck {
    kind: CheckKind,
    field: String,
    pattern: Option<String>,
    #[serde(default)]
    severity: Severity,
    message: Option<String>,
    issue_field: Option<String>,
    #[serde(default)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CheckKind {
    DenyMatch,
    RequireMatch,
    DenyKeyMatch,
    RequireKey,
}

impl CheckKind {
    fn as_str(self) -> &'static str {
        match self {
            CheckKind::DenyMatch => "deny_match",
            CheckKind::RequireMatch => "require_match",
            CheckKind::DenyKeyMatch => "deny_key_match",
            CheckKind::RequireKey => "require_key",
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            CheckKind::DenyMatch => "{field} value '{value}' is not allowed",
            CheckKind::RequireMatch => "{field} value '{value}' does not match the required pattern",
            CheckKind::DenyKeyMatch => "key '{key}' in {field} is not allowed",
            CheckKind::RequireKey => "{field} is required",
        }
    }
}

/// One compiled check.
#[derive(Debug)]
struct Check {
    kind: CheckKind,
    field: String,
    path: Vec<String>,
    pattern: Option<Regex>,
    severity: Severity,
    message: String,
    issue_field: String,
    strict: bool,
}

/// A validation unit loaded from a TOML manifest.
#[derive(Debug)]
pub struct ManifestPlugin {
    name: String,
    description: Option<String>,
    source: PathBuf,
    checks: Vec<Check>,
}

impl ManifestPlugin {
    /// Load and compile a manifest file.
    pub fn from_path(path: &Path) -> Result<Self, PluginLoadError> {
        let content = fs::read_to_string(path).map_err(|source| PluginLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Compile manifest text. `path` is the unit's identity.
    pub fn parse(content: &str, path: &Path) -> Result<Self, PluginLoadError> {
        let raw: RawManifest = toml::from_str(content).map_err(|source| PluginLoadError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

        let evaluate = raw.evaluate.ok_or_else(|| PluginLoadError::MissingEntryPoint {
            path: path.to_path_buf(),
        })?;

        let checks = evaluate
            .checks
            .into_iter()
            .enumerate()
            .map(|(index, check)| compile_check(check, index, path))
            .collect::<Result<Vec<_>, _>>()?;

        let name = raw.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        });

        Ok(Self {
            name,
            description: raw.description,
            source: path.to_path_buf(),
            checks,
        })
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }
}

impl Plugin for ManifestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, config: &Mapping) -> Result<Vec<Issue>, PluginError> {
        let mut issues = Vec::new();
        for check in &self.checks {
            check.apply(config, &mut issues)?;
        }
        Ok(issues)
    }
}

fn compile_check(raw: RawCheck, index: usize, path: &Path) -> Result<Check, PluginLoadError> {
    let pattern = match raw.pattern {
        Some(pattern) => Some(Regex::new(&pattern).map_err(|source| PluginLoadError::Pattern {
            path: path.to_path_buf(),
            pattern: pattern.clone(),
            source,
        })?),
        None if raw.kind != CheckKind::RequireKey => {
            return Err(PluginLoadError::MissingPattern {
                path: path.to_path_buf(),
                index,
                kind: raw.kind.as_str(),
            });
        }
        None => None,
    };

    Ok(Check {
        kind: raw.kind,
        path: raw.field.split('.').map(str::to_string).collect(),
        issue_field: raw.issue_field.unwrap_or_else(|| raw.field.clone()),
        field: raw.field,
        pattern,
        severity: raw.severity,
        message: raw.message.unwrap_or_else(|| raw.kind.default_message().to_string()),
        strict: raw.strict,
    })
}

impl Check {
    fn apply(&self, config: &Mapping, issues: &mut Vec<Issue>) -> Result<(), PluginError> {
        let value = lookup(config, &self.path);

        match (self.kind, value) {
            (CheckKind::RequireKey, None) => issues.push(self.issue("", "")),
            (CheckKind::RequireKey, Some(_)) => {}
            (_, None) => {}

            (CheckKind::DenyMatch | CheckKind::RequireMatch, Some(Value::String(s))) => {
                let matched = self.matches(s);
                if matched == (self.kind == CheckKind::DenyMatch) {
                    issues.push(self.issue("", s));
                }
            }
            (CheckKind::DenyMatch | CheckKind::RequireMatch, Some(_)) => {
                self.mismatch("string")?;
            }

            (CheckKind::DenyKeyMatch, Some(Value::Mapping(entries))) => {
                for key in entries.keys().filter_map(Value::as_str) {
                    if self.matches(key) {
                        issues.push(self.issue(key, ""));
                    }
                }
            }
            (CheckKind::DenyKeyMatch, Some(_)) => {
                self.mismatch("mapping")?;
            }
        }

        Ok(())
    }

    fn matches(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }

    fn mismatch(&self, expected: &'static str) -> Result<(), PluginError> {
        if self.strict {
            return Err(PluginError::TypeMismatch {
                field: self.field.clone(),
                expected,
            });
        }
        Ok(())
    }

    fn issue(&self, key: &str, value: &str) -> Issue {
        let message = self
            .message
            .replace("{field}", &self.field)
            .replace("{key}", key)
            .replace("{value}", value);
        Issue::new(self.issue_field.clone(), message, self.severity)
    }
}

/// Resolve a dotted path through nested mappings.
fn lookup<'a>(config: &'a Mapping, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = config.get(first.as_str())?;
    for segment in rest {
        current = current.as_mapping()?.get(segment.as_str())?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATEST_TAG: &str = r#"
name = "check-latest-tag"

[[evaluate.checks]]
kind = "deny_match"
field = "image"
pattern = "(?i):latest$"
message = "Image tag should not be 'latest' - use specific version tags"
"#;

    fn config(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn parse(content: &str) -> Result<ManifestPlugin, PluginLoadError> {
        ManifestPlugin::parse(content, Path::new("plugins/unit.toml"))
    }

    #[test]
    fn test_deny_match_flags_latest_tag() {
        let plugin = parse(LATEST_TAG).unwrap();
        assert_eq!(plugin.name(), "check-latest-tag");

        let issues = plugin.evaluate(&config("image: docker.io/app:LATEST")).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "image");
        assert!(issues[0].is_error());

        let issues = plugin.evaluate(&config("image: docker.io/app:v1.2.3")).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_wrong_type_ignored_unless_strict() {
        let plugin = parse(LATEST_TAG).unwrap();
        assert!(plugin.evaluate(&config("image: 42")).unwrap().is_empty());

        let strict = format!("{}strict = true\n", LATEST_TAG);
        let plugin = parse(&strict).unwrap();
        let err = plugin.evaluate(&config("image: 42")).unwrap_err();
        assert_eq!(err.to_string(), "field 'image' must be a string");
    }

    #[test]
    fn test_deny_key_match_reports_each_key() {
        let plugin = parse(
            r#"
[[evaluate.checks]]
kind = "deny_key_match"
field = "env"
pattern = "(?i)secret"
severity = "warning"
message = "Environment key '{key}' contains 'SECRET'"
"#,
        )
        .unwrap();
        assert_eq!(plugin.name(), "unit");

        let issues = plugin
            .evaluate(&config("env:\n  DB_SECRET: x\n  HOST: y\n  api_secret_key: z\n"))
            .unwrap();
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Environment key 'DB_SECRET' contains 'SECRET'",
                "Environment key 'api_secret_key' contains 'SECRET'",
            ]
        );
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_require_key_and_nested_paths() {
        let plugin = parse(
            r#"
[[evaluate.checks]]
kind = "require_key"
field = "resources.limits.memory"

[[evaluate.checks]]
kind = "require_match"
field = "resources.limits.memory"
pattern = "^[0-9]+Mi$"
issue_field = "memory"
"#,
        )
        .unwrap();
        assert_eq!(plugin.check_count(), 2);

        let issues = plugin.evaluate(&config("service: api")).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "resources.limits.memory is required");

        let issues = plugin
            .evaluate(&config("resources:\n  limits:\n    memory: 2Gi\n"))
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "memory");
        assert!(issues[0].message.contains("'2Gi'"));

        let issues = plugin
            .evaluate(&config("resources:\n  limits:\n    memory: 512Mi\n"))
            .unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_metadata_and_default_name() {
        let plugin = parse("description = \"no latest tags\"\n[evaluate]\n").unwrap();
        assert_eq!(plugin.name(), "unit");
        assert_eq!(plugin.description(), Some("no latest tags"));
        assert_eq!(plugin.source(), Path::new("plugins/unit.toml"));
        assert_eq!(plugin.check_count(), 0);

        assert_eq!(parse(LATEST_TAG).unwrap().description(), None);
    }

    #[test]
    fn test_missing_evaluate_table_rejected() {
        let err = parse("name = \"empty\"\n").unwrap_err();
        assert!(matches!(err, PluginLoadError::MissingEntryPoint { .. }));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let err = parse(
            "[[evaluate.checks]]\nkind = \"deny_match\"\nfield = \"image\"\npattern = \"(unclosed\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, PluginLoadError::Pattern { .. }));
    }

    #[test]
    fn test_missing_pattern_rejected() {
        let err = parse("[[evaluate.checks]]\nkind = \"deny_match\"\nfield = \"image\"\n").unwrap_err();
        assert!(matches!(err, PluginLoadError::MissingPattern { index: 0, .. }));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = parse("this is = = not toml").unwrap_err();
        assert!(matches!(err, PluginLoadError::Manifest { .. }));
    }
}
