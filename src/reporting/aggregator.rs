//! Reduction of per-file results into a report.

use std::collections::BTreeMap;
use std::path::Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::model::{Issue, ValidationResult};
use crate::validate::extract_registry;

/// Summary counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ReportStats {
    pub total_files: usize,
    pub valid_files: usize,
    pub invalid_files: usize,

    /// Error-severity issues across invalid files.
    pub total_issues: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidFile {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvalidFile {
    pub path: String,
    pub issues: Vec<Issue>,
}

/// Structured outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub scanned_root: String,
    pub stats: ReportStats,
    pub valid_files: Vec<ValidFile>,
    pub invalid_files: Vec<InvalidFile>,

    /// Valid files per image registry.
    pub registry_counts: BTreeMap<String, usize>,
}

/// Reduce results into a report. File lists are sorted by path.
///
/// Registries are counted only for files whose final verdict is valid, so a
/// file rejected by a plugin does not contribute.
pub fn aggregate(scanned_root: &Path, results: &[ValidationResult], timestamp: DateTime<Utc>) -> Report {
    let mut valid_files = Vec::new();
    let mut invalid_files = Vec::new();
    let mut registry_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_issues = 0;

    for result in results {
        let path = result.path.display().to_string();

        if result.is_valid() {
            let registry = result
                .config
                .as_ref()
                .and_then(|config| config.get("image"))
                .and_then(extract_registry);
            if let Some(registry) = registry {
                *registry_counts.entry(registry.to_string()).or_default() += 1;
            }
            valid_files.push(ValidFile { path });
        } else {
            total_issues += result.error_count();
            invalid_files.push(InvalidFile {
                path,
                issues: result.issues().to_vec(),
            });
        }
    }

    valid_files.sort_by(|a, b| a.path.cmp(&b.path));
    invalid_files.sort_by(|a, b| a.path.cmp(&b.path));

    Report {
        timestamp,
        scanned_root: scanned_root.display().to_string(),
        stats: ReportStats {
            total_files: results.len(),
            valid_files: valid_files.len(),
            invalid_files: invalid_files.len(),
            total_issues,
        },
        valid_files,
        invalid_files,
        registry_counts,
    }
}
