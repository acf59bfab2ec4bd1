//! One discovery → validate → aggregate → publish pass.

use std::sync::Arc;
use std::time::Instant;
use async_trait::async_trait;
use chrono::Utc;
use tracing::Span;
use crate::config::GuardianConfig;
use crate::discover::find_config_files;
use crate::engine::orchestrator::ValidationOrchestrator;
use crate::error::GuardianError;
use crate::observability::metrics;
use crate::plugins::PluginRegistry;
use crate::reporting::{aggregate, render_summary, write_report, Report};
use crate::validate::RuleValidator;
use crate::watch::CycleRunner;

/// A complete validation run, repeatable.
///
/// Plugins are loaded once when the cycle is built and reused by every run;
/// nothing else is carried between runs.
pub struct ValidationCycle {
    config: GuardianConfig,
    orchestrator: ValidationOrchestrator,
    print_summary: bool,
    span: Span,
}

impl ValidationCycle {
    pub fn new(config: GuardianConfig, parent: &Span) -> Self {
        let plugins = Arc::new(PluginRegistry::load(&config.plugins.dir, parent));
        Self::with_plugins(config, plugins, parent)
    }

    /// Build a cycle around an already populated registry.
    pub fn with_plugins(config: GuardianConfig, plugins: Arc<PluginRegistry>, parent: &Span) -> Self {
        let span = tracing::info_span!(parent: parent, "cycle", root = %config.scan.root.display());
        let orchestrator = ValidationOrchestrator::new(
            Arc::new(RuleValidator::new()),
            plugins,
            config.engine.workers,
            &span,
        )
        .with_task_timeout(config.engine.task_timeout());

        Self {
            span,
            config,
            orchestrator,
            print_summary: true,
        }
    }

    /// Suppress the console summary (the JSON report is still written).
    pub fn quiet(mut self) -> Self {
        self.print_summary = false;
        self
    }

    pub fn config(&self) -> &GuardianConfig {
        &self.config
    }

    /// Run discovery, validation and reporting once.
    pub async fn run(&self) -> Result<Report, GuardianError> {
        let start = Instant::now();
        let root = &self.config.scan.root;
        tracing::info!(parent: &self.span, "Starting validation for: {}", root.display());

        let files = find_config_files(root, &self.config.scan.extensions)?;
        if files.is_empty() {
            tracing::warn!(parent: &self.span, "No configuration files found");
        }

        let results = self.orchestrator.run_all(&files).await;
        let report = aggregate(root, &results, Utc::now());

        write_report(&report, &self.config.report.out)?;
        if self.print_summary {
            println!("{}", render_summary(&report));
        }

        metrics::record_cycle(start);
        tracing::info!(
            parent: &self.span,
            valid = report.stats.valid_files,
            invalid = report.stats.invalid_files,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Validation cycle complete"
        );
        Ok(report)
    }
}

#[async_trait]
impl CycleRunner for ValidationCycle {
    async fn run_cycle(&mut self) -> Result<(), GuardianError> {
        self.run().await.map(|_| ())
    }
}
