//! Worker pool behavior over many files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use config_guardian::model::{Issue, ValidationResult};
use config_guardian::plugins::{ManifestPlugin, Plugin, PluginError, PluginRegistry};
use config_guardian::validate::RuleValidator;
use config_guardian::ValidationOrchestrator;
use serde_yaml::Mapping;
use tracing::Span;

mod common;

fn registry_with_latest_tag() -> PluginRegistry {
    let mut registry = PluginRegistry::empty(&Span::none());
    let plugin = ManifestPlugin::parse(common::LATEST_TAG_PLUGIN, Path::new("check_latest_tag.toml")).unwrap();
    registry.register(Box::new(plugin));
    registry
}

fn orchestrator(plugins: PluginRegistry, workers: usize) -> ValidationOrchestrator {
    ValidationOrchestrator::new(Arc::new(RuleValidator::new()), Arc::new(plugins), workers, &Span::none())
}

/// Order-free view of a run for comparison.
fn fingerprint(results: &[ValidationResult]) -> Vec<(PathBuf, bool, Vec<Issue>)> {
    let mut view: Vec<_> = results
        .iter()
        .map(|r| (r.path.clone(), r.is_valid(), r.issues().to_vec()))
        .collect();
    view.sort_by(|a, b| a.0.cmp(&b.0));
    view
}

#[tokio::test]
async fn test_worker_count_does_not_change_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let paths = common::synthetic_tree(dir.path(), 50);

    let single = orchestrator(registry_with_latest_tag(), 1).run_all(&paths).await;
    let many = orchestrator(registry_with_latest_tag(), 8).run_all(&paths).await;

    assert_eq!(single.len(), 50);
    assert_eq!(many.len(), 50);
    assert_eq!(fingerprint(&single), fingerprint(&many));

    let valid = single.iter().filter(|r| r.is_valid()).count();
    assert_eq!(valid, 10);
}

#[tokio::test]
async fn test_one_result_per_input_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = common::synthetic_tree(dir.path(), 12);
    paths.push(dir.path().join("missing.yaml"));

    let results = orchestrator(PluginRegistry::empty(&Span::none()), 4).run_all(&paths).await;
    let returned: Vec<PathBuf> = results.iter().map(|r| r.path.clone()).collect();
    assert_eq!(returned, paths);

    let missing = results.last().unwrap();
    assert!(!missing.is_valid());
    assert_eq!(missing.issues()[0].field, "io");
}

#[tokio::test]
async fn test_empty_input() {
    let results = orchestrator(PluginRegistry::empty(&Span::none()), 4).run_all(&[]).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_parse_failures_are_contained() {
    let dir = tempfile::tempdir().unwrap();
    let broken = common::write_file(dir.path(), "broken.yaml", "service: [unclosed\n");
    let list = common::write_file(dir.path(), "list.yaml", "- a\n");
    let good = common::write_file(dir.path(), "good.yaml", common::VALID_CONFIG);

    let results = orchestrator(PluginRegistry::empty(&Span::none()), 2)
        .run_all(&[broken, list, good])
        .await;

    assert_eq!(results[0].issues()[0].field, "yaml");
    assert!(results[0].config.is_none());
    assert_eq!(results[1].issues()[0].field, "root");
    assert!(results[1].config.is_none());
    assert!(results[2].is_valid());
}

struct Slow;

impl Plugin for Slow {
    fn name(&self) -> &str {
        "slow"
    }

    fn evaluate(&self, config: &Mapping) -> Result<Vec<Issue>, PluginError> {
        if config.contains_key("hang") {
            std::thread::sleep(Duration::from_millis(400));
        }
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_time_budget_substitutes_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let slow = common::write_file(dir.path(), "slow.yaml", "hang: true\n");
    let fast = common::write_file(dir.path(), "fast.yaml", common::VALID_CONFIG);

    let mut plugins = PluginRegistry::empty(&Span::none());
    plugins.register(Box::new(Slow));
    let results = orchestrator(plugins, 2)
        .with_task_timeout(Some(Duration::from_millis(50)))
        .run_all(&[slow.clone(), fast])
        .await;

    assert_eq!(results[0].path, slow);
    assert!(!results[0].is_valid());
    assert!(results[0].issues().is_empty());
    assert!(results[1].is_valid());
}

/// Fails, then panics while the registry reports the failure. The panic
/// escapes plugin isolation and takes the task down.
struct Unstable;

impl Plugin for Unstable {
    fn name(&self) -> &str {
        panic!("name unavailable")
    }

    fn evaluate(&self, config: &Mapping) -> Result<Vec<Issue>, PluginError> {
        if config.contains_key("explode") {
            Err(PluginError::Failed("bad input".into()))
        } else {
            Ok(Vec::new())
        }
    }
}

#[tokio::test]
async fn test_task_panic_becomes_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let bad = common::write_file(dir.path(), "a.yaml", "explode: 1\n");
    let good = common::write_file(dir.path(), "b.yaml", common::VALID_CONFIG);

    let mut plugins = PluginRegistry::empty(&Span::none());
    plugins.register(Box::new(Unstable));
    let results = orchestrator(plugins, 1).run_all(&[bad.clone(), good]).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].path, bad);
    assert!(!results[0].is_valid());
    assert!(results[0].issues().is_empty());
    assert!(results[1].is_valid());
}
