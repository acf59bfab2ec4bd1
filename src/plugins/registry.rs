//! Plugin discovery and invocation.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use serde_yaml::Mapping;
use tracing::Span;
use crate::model::Issue;
use crate::observability::metrics;
use crate::plugins::contract::{Plugin, PluginError};
use crate::plugins::manifest::ManifestPlugin;

/// File extension of plugin manifests.
pub const PLUGIN_EXTENSION: &str = "toml";

/// Ordered set of loaded validation units.
///
/// Built once per run and shared read-only across workers.
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
    span: Span,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}

impl PluginRegistry {
    /// Registry with no units.
    pub fn empty(parent: &Span) -> Self {
        Self {
            plugins: Vec::new(),
            span: tracing::info_span!(parent: parent, "plugin_registry"),
        }
    }

    /// Load every manifest in `dir`. Never fails: unreadable directories and
    /// broken units are logged and skipped.
    pub fn load(dir: &Path, parent: &Span) -> Self {
        let span = tracing::info_span!(parent: parent, "plugin_registry", dir = %dir.display());
        let plugins = span.in_scope(|| load_units(dir));
        Self { plugins, span }
    }

    /// Admit an in-process unit. It runs after all previously loaded units.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        tracing::debug!(parent: &self.span, plugin = plugin.name(), "Registered plugin");
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run every unit against `config` and concatenate their issues.
    ///
    /// A unit that fails or panics contributes one `plugin` error issue;
    /// the remaining units still run.
    pub fn run(&self, config: &Mapping) -> Vec<Issue> {
        let mut issues = Vec::new();

        for plugin in &self.plugins {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| plugin.evaluate(config)))
                .unwrap_or_else(|payload| Err(PluginError::Failed(panic_message(payload.as_ref()))));

            match outcome {
                Ok(found) => issues.extend(found),
                Err(e) => {
                    tracing::error!(parent: &self.span, plugin = plugin.name(), "Plugin execution error: {}", e);
                    metrics::record_plugin_failure(plugin.name());
                    issues.push(Issue::error("plugin", format!("Plugin error: {}", e)));
                }
            }
        }

        issues
    }
}

fn load_units(dir: &Path) -> Vec<Box<dyn Plugin>> {
    let entries = match plugin_files(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Plugin directory unavailable, continuing without plugins");
            return Vec::new();
        }
    };

    let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();
    for path in entries {
        match ManifestPlugin::from_path(&path) {
            Ok(plugin) => {
                tracing::info!(
                    plugin = plugin.name(),
                    checks = plugin.check_count(),
                    description = plugin.description().unwrap_or_default(),
                    "Loaded plugin: {}",
                    plugin.source().display()
                );
                plugins.push(Box::new(plugin));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load plugin {}", path.display());
            }
        }
    }

    tracing::info!(count = plugins.len(), "Plugin registry ready");
    plugins
}

/// Manifest files in `dir`, excluding `_`-prefixed names, sorted by name.
fn plugin_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == PLUGIN_EXTENSION))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('_'))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "plugin panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    struct Raising;

    impl Plugin for Raising {
        fn name(&self) -> &str {
            "raising"
        }

        fn evaluate(&self, _config: &Mapping) -> Result<Vec<Issue>, PluginError> {
            Err(PluginError::Failed("boom".into()))
        }
    }

    struct Panicking;

    impl Plugin for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn evaluate(&self, _config: &Mapping) -> Result<Vec<Issue>, PluginError> {
            panic!("unexpected state")
        }
    }

    struct Flagging(&'static str);

    impl Plugin for Flagging {
        fn name(&self) -> &str {
            self.0
        }

        fn evaluate(&self, _config: &Mapping) -> Result<Vec<Issue>, PluginError> {
            Ok(vec![Issue::warning("custom", self.0)])
        }
    }

    #[test]
    fn test_failure_becomes_single_issue_and_others_run() {
        let mut registry = PluginRegistry::empty(&Span::none());
        registry.register(Box::new(Raising));
        registry.register(Box::new(Flagging("after")));

        let issues = registry.run(&Mapping::new());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "plugin");
        assert_eq!(issues[0].message, "Plugin error: boom");
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[1].message, "after");
    }

    #[test]
    fn test_panic_is_contained() {
        let mut registry = PluginRegistry::empty(&Span::none());
        registry.register(Box::new(Panicking));
        registry.register(Box::new(Flagging("still-runs")));

        let issues = registry.run(&Mapping::new());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "Plugin error: unexpected state");
        assert_eq!(issues[1].message, "still-runs");
    }

    #[test]
    fn test_missing_directory_gives_empty_registry() {
        let registry = PluginRegistry::load(Path::new("/definitely/not/here"), &Span::none());
        assert!(registry.is_empty());
        assert!(registry.run(&Mapping::new()).is_empty());
    }

    #[test]
    fn test_units_run_in_registration_order() {
        let mut registry = PluginRegistry::empty(&Span::none());
        registry.register(Box::new(Flagging("first")));
        registry.register(Box::new(Flagging("second")));
        assert_eq!(registry.names(), vec!["first", "second"]);

        let messages: Vec<String> = registry.run(&Mapping::new()).into_iter().map(|i| i.message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
