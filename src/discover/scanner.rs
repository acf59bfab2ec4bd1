//! Recursive file enumeration.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Discovery failures. All of them abort the run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Root directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// True when `path` ends in one of `extensions` (given without the dot).
pub fn has_monitored_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

/// Find every file under `root` with a monitored extension, sorted.
pub fn find_config_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry during discovery");
                continue;
            }
        };
        if entry.file_type().is_file() && has_monitored_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    tracing::info!(root = %root.display(), count = files.len(), "Discovered configuration files");
    Ok(files)
}
