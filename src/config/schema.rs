//! Settings schema.
//!
//! All types derive Serde traits for deserialization from `guardian.toml`.

use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::engine::orchestrator::DEFAULT_WORKERS;

/// Root settings for a validation run.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GuardianConfig {
    /// What to scan.
    pub scan: ScanConfig,

    /// Worker pool settings.
    pub engine: EngineConfig,

    /// Plugin discovery.
    pub plugins: PluginsConfig,

    /// Watch mode settings.
    pub watch: WatchConfig,

    /// Report output.
    pub report: ReportConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Scan configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Root directory to scan.
    pub root: PathBuf,

    /// Monitored file extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["yaml".to_string(), "yml".to_string()],
        }
    }
}

/// Worker pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of concurrent validation workers.
    pub workers: usize,

    /// Per-file time budget in milliseconds. Absent means unbounded.
    pub task_timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            task_timeout_ms: None,
        }
    }
}

impl EngineConfig {
    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout_ms.map(Duration::from_millis)
    }
}

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PluginsConfig {
    /// Directory holding plugin manifests.
    pub dir: PathBuf,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("plugins"),
        }
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    /// Minimum interval between two re-validation cycles.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 1000 }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Path of the JSON report.
    pub out: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out: PathBuf::from("report.json"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus endpoint bind address, watch mode only.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
