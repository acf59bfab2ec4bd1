//! Report output: JSON artifact and console summary.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::reporting::aggregator::Report;

const RULE_WIDTH: usize = 60;

/// Failure to publish a report. Always fatal to the run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to save report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write the report as pretty-printed JSON.
pub fn write_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Report saved");
    Ok(())
}

/// Human-readable summary of a report.
pub fn render_summary(report: &Report) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let stats = &report.stats;

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n{}", heavy);
    let _ = writeln!(out, "CONFIG GUARDIAN - VALIDATION SUMMARY");
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "Scanned: {}", report.scanned_root);
    let _ = writeln!(out, "Timestamp: {}", report.timestamp.to_rfc3339());
    let _ = writeln!(out, "{}", light);
    let _ = writeln!(out, "Total files:    {}", stats.total_files);
    let _ = writeln!(out, "Valid files:    {}", stats.valid_files);
    let _ = writeln!(out, "Invalid files:  {}", stats.invalid_files);
    let _ = writeln!(out, "Total issues:   {}", stats.total_issues);
    let _ = writeln!(out, "{}", light);

    if !report.registry_counts.is_empty() {
        let _ = writeln!(out, "Services per registry:");
        for (registry, count) in &report.registry_counts {
            let _ = writeln!(out, "  {}: {}", registry, count);
        }
    }

    let _ = writeln!(out, "{}", heavy);
    out
}
