//! Config Guardian
//!
//! Concurrent validator for deployment configuration files.
//!
//! # Architecture Overview
//!
//! ```text
//!   --root ──▶ discover ──▶ engine::orchestrator ──────────▶ reporting
//!              (walkdir)    ┌──────────────────────────┐     aggregate
//!                           │ worker 1..N              │        │
//!                           │  read → parse (YAML)     │        ▼
//!                           │  → validate::rules       │   report.json
//!                           │  → plugins::registry     │   + summary
//!                           └──────────────────────────┘
//!
//!   --watch: notify ──▶ watch::trigger (debounce) ──▶ engine::cycle (again)
//! ```

use clap::Parser;
use config_guardian::cli::Cli;
use config_guardian::config::resolve_config;
use config_guardian::error::GuardianError;
use config_guardian::lifecycle::startup;
use config_guardian::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), |config| cli.apply(config)) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info", cli.verbose);
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    logging::init_logging(&config.observability.log_level, cli.verbose);
    tracing::info!(
        root = %config.scan.root.display(),
        workers = config.engine.workers,
        plugins = %config.plugins.dir.display(),
        watch = cli.watch,
        "config-guardian v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let span = logging::root_span();
    match startup::run(config, cli.watch, &span).await {
        Ok(()) => Ok(()),
        Err(GuardianError::Discovery(e)) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
