//! Startup orchestration.
//!
//! # Responsibilities
//! - Check the scan root before doing any work
//! - Run the initial validation cycle
//! - In watch mode, start the notification source, metrics exporter and
//!   Ctrl-C handler, then hand control to the watch loop

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::Span;
use crate::config::GuardianConfig;
use crate::discover::DiscoveryError;
use crate::engine::ValidationCycle;
use crate::error::GuardianError;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::shutdown_on_ctrl_c;
use crate::observability::metrics;
use crate::watch::{NotifySource, WatchTrigger};

/// Run once, or run and keep watching until interrupted.
pub async fn run(config: GuardianConfig, watch: bool, span: &Span) -> Result<(), GuardianError> {
    let root = config.scan.root.clone();
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root).into());
    }

    let cycle = ValidationCycle::new(config.clone(), span);
    cycle.run().await?;

    if !watch {
        return Ok(());
    }

    if let Some(addr) = config.observability.metrics_address.as_deref() {
        match addr.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(metrics_address = %addr, error = %e, "Failed to parse metrics address"),
        }
    }

    let shutdown = Arc::new(Shutdown::new());
    let stop_rx = shutdown.subscribe();
    tokio::spawn(shutdown_on_ctrl_c(Arc::clone(&shutdown)));

    let (source, events) = NotifySource::watch(&root)?;
    println!("\nWatching {} for changes...", source.root().display());
    println!("Press Ctrl+C to stop.\n");

    let mut trigger = WatchTrigger::new(
        cycle,
        config.scan.extensions.clone(),
        config.watch.debounce(),
        span,
    );
    let stats = trigger.run(events, stop_rx).await;
    drop(source);

    tracing::info!(
        cycles = stats.cycles,
        failed = stats.failed_cycles,
        debounced = stats.debounced,
        "File watcher stopped"
    );
    println!("\nFile watcher stopped.\n");
    Ok(())
}
