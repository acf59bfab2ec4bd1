//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const VALID_CONFIG: &str = "service: api\nimage: docker.io/app:v1.2.3\nreplicas: 3\n";

pub const LATEST_TAG_PLUGIN: &str = r#"
name = "check-latest-tag"

[[evaluate.checks]]
kind = "deny_match"
field = "image"
pattern = "(?i):latest$"
message = "Image tag should not be 'latest' - use specific version tags"
"#;

pub const SECRET_ENV_PLUGIN: &str = r#"
name = "check-secret-env"

[[evaluate.checks]]
kind = "deny_key_match"
field = "env"
pattern = "(?i)SECRET"
severity = "warning"
message = "Environment key '{key}' contains 'SECRET' - secrets should be managed externally"
"#;

/// Write `content` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Deterministic mix of valid and invalid documents.
pub fn synthetic_config(i: usize) -> String {
    match i % 5 {
        0 => format!("service: svc-{i}\nimage: docker.io/svc{i}:v1.0.{i}\nreplicas: {}\n", i % 50 + 1),
        1 => format!("service: svc-{i}\nimage: gcr.io/svc{i}:latest\nreplicas: 2\n"),
        2 => format!("service: svc-{i}\nreplicas: {}\n", 60 + i),
        3 => format!("service: svc-{i}\nimage: quay.io/svc:{i}\nreplicas: 1\nenv:\n  lower_{i}: x\n  DB_SECRET: y\n"),
        _ => "- not\n- a mapping\n".to_string(),
    }
}

/// Create `count` synthetic files under `dir`, spread over subdirectories.
pub fn synthetic_tree(dir: &Path, count: usize) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = (0..count)
        .map(|i| write_file(dir, &format!("group{}/svc{:03}.yaml", i % 4, i), &synthetic_config(i)))
        .collect();
    paths.sort();
    paths
}
