//! Bounded worker pool over many files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{Instrument, Span};
use crate::engine::task::validate_bytes;
use crate::model::ValidationResult;
use crate::observability::metrics;
use crate::plugins::PluginRegistry;
use crate::validate::{read_failure, RuleValidator};

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 4;

/// What a worker reports for one file.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Validation ran; the result carries any domain failures as issues.
    Completed(ValidationResult),

    /// The task machinery itself failed (panic, cancellation, time budget).
    Failed { reason: String },
}

type Job = (usize, PathBuf);

/// Runs validation for many files on a fixed number of workers.
pub struct ValidationOrchestrator {
    rules: Arc<RuleValidator>,
    plugins: Arc<PluginRegistry>,
    workers: usize,
    task_timeout: Option<Duration>,
    span: Span,
}

impl ValidationOrchestrator {
    pub fn new(rules: Arc<RuleValidator>, plugins: Arc<PluginRegistry>, workers: usize, parent: &Span) -> Self {
        Self {
            rules,
            plugins,
            workers: workers.max(1),
            task_timeout: None,
            span: tracing::info_span!(parent: parent, "orchestrator", workers = workers.max(1)),
        }
    }

    /// Bound the time a single file may take. `None` means unbounded.
    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Validate every path. Returns exactly one result per input, ordered
    /// like the input.
    pub async fn run_all(&self, paths: &[PathBuf]) -> Vec<ValidationResult> {
        let total = paths.len();
        if total == 0 {
            return Vec::new();
        }

        let (job_tx, job_rx) = mpsc::unbounded_channel::<Job>();
        for (index, path) in paths.iter().enumerate() {
            // Receiver is alive until the workers below finish.
            let _ = job_tx.send((index, path.clone()));
        }
        drop(job_tx);

        let job_rx = Arc::new(Mutex::new(job_rx));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(usize, TaskOutcome)>();

        let worker_count = self.workers.min(total);
        tracing::info!(parent: &self.span, files = total, workers = worker_count, "Validating files");

        let mut workers = JoinSet::new();
        for worker_id in 0..worker_count {
            let jobs = Arc::clone(&job_rx);
            let done = done_tx.clone();
            let rules = Arc::clone(&self.rules);
            let plugins = Arc::clone(&self.plugins);
            let timeout = self.task_timeout;
            let span = tracing::debug_span!(parent: &self.span, "worker", id = worker_id);

            workers.spawn(
                async move {
                    loop {
                        let job = jobs.lock().await.recv().await;
                        let Some((index, path)) = job else { break };
                        let outcome = run_task(path, Arc::clone(&rules), Arc::clone(&plugins), timeout).await;
                        if done.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                }
                .instrument(span),
            );
        }
        drop(done_tx);

        let mut slots: Vec<Option<ValidationResult>> = (0..total).map(|_| None).collect();
        while let Some((index, outcome)) = done_rx.recv().await {
            slots[index] = Some(self.settle(&paths[index], outcome));
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(parent: &self.span, error = %e, "Validation worker terminated abnormally");
            }
        }

        slots
            .into_iter()
            .zip(paths)
            .map(|(slot, path)| {
                slot.unwrap_or_else(|| {
                    tracing::error!(parent: &self.span, path = %path.display(), "No result produced, substituting placeholder");
                    metrics::record_placeholder();
                    ValidationResult::placeholder(path)
                })
            })
            .collect()
    }

    fn settle(&self, path: &Path, outcome: TaskOutcome) -> ValidationResult {
        let result = match outcome {
            TaskOutcome::Completed(result) => result,
            TaskOutcome::Failed { reason } => {
                tracing::error!(parent: &self.span, path = %path.display(), "Failed to validate: {}", reason);
                metrics::record_placeholder();
                ValidationResult::placeholder(path)
            }
        };
        metrics::record_file_result(result.is_valid());
        result
    }
}

async fn run_task(
    path: PathBuf,
    rules: Arc<RuleValidator>,
    plugins: Arc<PluginRegistry>,
    timeout: Option<Duration>,
) -> TaskOutcome {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "I/O error reading file");
            return TaskOutcome::Completed(ValidationResult::rejected(&path, read_failure(&e)));
        }
    };

    let blocking = tokio::task::spawn_blocking(move || validate_bytes(&path, &bytes, &rules, &plugins));

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, blocking).await {
            Ok(joined) => joined,
            Err(_) => {
                return TaskOutcome::Failed {
                    reason: format!("validation exceeded time budget of {}ms", limit.as_millis()),
                };
            }
        },
        None => blocking.await,
    };

    match joined {
        Ok(result) => TaskOutcome::Completed(result),
        Err(e) => TaskOutcome::Failed { reason: e.to_string() },
    }
}
