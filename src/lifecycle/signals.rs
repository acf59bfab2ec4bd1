//! OS signal handling.

use std::sync::Arc;
use crate::lifecycle::shutdown::Shutdown;

/// Trigger `shutdown` on Ctrl-C. Returns once the signal arrived or the
/// handler could not be installed.
pub async fn shutdown_on_ctrl_c(shutdown: Arc<Shutdown>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Interrupt received, stopping");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
    }
}
