//! Structured logging.
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the settings file and `--verbose`
//! - Initialization happens once, in the binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for the given level.
pub fn default_directive(level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { level };
    format!("config_guardian={}", level)
}

/// Install the global subscriber.
pub fn init_logging(level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(level, verbose).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Root span that components nest their own spans under.
pub fn root_span() -> tracing::Span {
    tracing::info_span!("config_guardian")
}
