//! Command-line surface.

use std::path::PathBuf;
use clap::Parser;
use crate::config::GuardianConfig;

#[derive(Debug, Parser)]
#[command(name = "config-guardian")]
#[command(about = "Config Guardian - Concurrent Configuration Deployment Validator", long_about = None)]
pub struct Cli {
    /// Root directory to scan for configuration files
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output path for the JSON report
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Watch for file changes and revalidate
    #[arg(long)]
    pub watch: bool,

    /// Number of concurrent workers
    #[arg(long)]
    pub workers: Option<usize>,

    /// Directory containing validation plugins
    #[arg(long)]
    pub plugins: Option<PathBuf>,

    /// Minimum milliseconds between watch-triggered runs
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Settings file (defaults to ./guardian.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overlay explicitly passed flags onto file settings.
    pub fn apply(&self, config: &mut GuardianConfig) {
        if let Some(root) = &self.root {
            config.scan.root = root.clone();
        }
        if let Some(out) = &self.out {
            config.report.out = out.clone();
        }
        if let Some(workers) = self.workers {
            config.engine.workers = workers;
        }
        if let Some(plugins) = &self.plugins {
            config.plugins.dir = plugins.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.watch.debounce_ms = debounce_ms;
        }
    }
}
