//! Per-file validation outcome.

use std::path::{Path, PathBuf};
use serde_yaml::Mapping;
use crate::model::issue::Issue;

/// Outcome of validating a single configuration file.
///
/// `valid` always equals "no issue has severity Error"; it is recomputed
/// whenever issues are added.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub path: PathBuf,
    valid: bool,
    issues: Vec<Issue>,

    /// Parsed document, present only when the root was a mapping.
    pub config: Option<Mapping>,
}

impl ValidationResult {
    /// Result for a document that could not be used (read, parse or root failure).
    pub fn rejected(path: &Path, issue: Issue) -> Self {
        Self::from_issues(path, vec![issue], None)
    }

    /// Result for a parsed mapping document with the collected issues.
    pub fn from_issues(path: &Path, issues: Vec<Issue>, config: Option<Mapping>) -> Self {
        let mut result = Self {
            path: path.to_path_buf(),
            valid: true,
            issues,
            config,
        };
        result.recompute_validity();
        result
    }

    /// Stand-in for a file whose task failed outside validation itself.
    pub fn placeholder(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            valid: false,
            issues: Vec::new(),
            config: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn extend_issues(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
        self.recompute_validity();
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    fn recompute_validity(&mut self) {
        // Placeholders carry no issues but stay invalid.
        if self.valid {
            self.valid = !self.issues.iter().any(Issue::is_error);
        }
    }
}
