//! Debounced watch-trigger state machine.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::Span;
use crate::discover::has_monitored_extension;
use crate::error::GuardianError;

/// A filesystem change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub is_directory: bool,
}

impl ChangeEvent {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_directory: true,
        }
    }
}

/// Something the watch loop re-drives on change.
#[async_trait]
pub trait CycleRunner: Send {
    async fn run_cycle(&mut self) -> Result<(), GuardianError>;
}

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Running,
    Stopped,
}

/// How a single event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Directory event, unmonitored extension, or loop already stopped.
    Ignored,
    /// Arrived inside the debounce window.
    Debounced,
    /// Caused a validation cycle.
    Triggered,
}

/// Counters for one watch session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub cycles: u64,
    pub failed_cycles: u64,
    pub debounced: u64,
    pub ignored: u64,
}

/// Minimum spacing between triggers. The clock is an input so callers and
/// tests control time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_trigger: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_trigger: None,
        }
    }

    /// True when no trigger was recorded yet or the window since the last
    /// recorded trigger has elapsed at `now`.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last_trigger {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.window,
        }
    }

    /// Record a trigger at `now`. Called once the triggered cycle finished.
    pub fn record(&mut self, now: Instant) {
        self.last_trigger = Some(now);
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Turns change notifications into validation cycles.
pub struct WatchTrigger<R> {
    runner: R,
    extensions: Vec<String>,
    debouncer: Debouncer,
    state: WatchState,
    stats: WatchStats,
    span: Span,
}

impl<R: CycleRunner> WatchTrigger<R> {
    pub fn new(runner: R, extensions: Vec<String>, debounce: Duration, parent: &Span) -> Self {
        Self {
            runner,
            extensions,
            debouncer: Debouncer::new(debounce),
            state: WatchState::Idle,
            stats: WatchStats::default(),
            span: tracing::info_span!(parent: parent, "watch", debounce_ms = debounce.as_millis() as u64),
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn stats(&self) -> WatchStats {
        self.stats
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Consume events until shutdown or until the stream ends.
    pub async fn run(
        &mut self,
        mut events: mpsc::UnboundedReceiver<ChangeEvent>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> WatchStats {
        tracing::info!(parent: &self.span, "Watch loop started");

        while self.state != WatchState::Stopped {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!(parent: &self.span, "Watch loop received shutdown signal");
                    self.stop();
                }
                event = events.recv() => match event {
                    Some(event) => {
                        self.handle_event(event).await;
                    }
                    None => {
                        tracing::info!(parent: &self.span, "Notification stream closed");
                        self.stop();
                    }
                },
            }
        }

        tracing::info!(parent: &self.span, cycles = self.stats.cycles, "Stopped watching");
        self.stats
    }

    /// Apply one event to the state machine.
    pub async fn handle_event(&mut self, event: ChangeEvent) -> EventDisposition {
        if self.state == WatchState::Stopped
            || event.is_directory
            || !has_monitored_extension(&event.path, &self.extensions)
        {
            self.stats.ignored += 1;
            return EventDisposition::Ignored;
        }

        if !self.debouncer.ready(Instant::now()) {
            tracing::debug!(parent: &self.span, path = %event.path.display(), "Change inside debounce window, skipping");
            self.stats.debounced += 1;
            return EventDisposition::Debounced;
        }

        tracing::info!(parent: &self.span, "Detected change in: {}", event.path.display());
        self.state = WatchState::Running;
        if let Err(e) = self.runner.run_cycle().await {
            tracing::error!(parent: &self.span, error = %e, "Error in watch cycle");
            self.stats.failed_cycles += 1;
        }
        self.stats.cycles += 1;
        // Events queued during a slow cycle fall inside the window.
        self.debouncer.record(Instant::now());
        self.state = WatchState::Idle;

        EventDisposition::Triggered
    }

    /// Move to `Stopped`. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.state = WatchState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        runs: u32,
    }

    #[async_trait]
    impl CycleRunner for Counting {
        async fn run_cycle(&mut self) -> Result<(), GuardianError> {
            self.runs += 1;
            Ok(())
        }
    }

    fn trigger(window_ms: u64) -> WatchTrigger<Counting> {
        WatchTrigger::new(
            Counting::default(),
            vec!["yaml".into(), "yml".into()],
            Duration::from_millis(window_ms),
            &Span::none(),
        )
    }

    #[test]
    fn test_debouncer_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));

        assert!(debouncer.ready(start));
        debouncer.record(start);
        assert!(!debouncer.ready(start + Duration::from_millis(100)));
        assert!(!debouncer.ready(start + Duration::from_millis(999)));
        assert!(debouncer.ready(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_debouncer_measures_from_last_record() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));

        debouncer.record(start);
        // Checking does not extend the window.
        assert!(!debouncer.ready(start + Duration::from_millis(900)));
        assert!(debouncer.ready(start + Duration::from_millis(1100)));

        // A trigger that finished late moves the window with it.
        debouncer.record(start + Duration::from_millis(1500));
        assert!(!debouncer.ready(start + Duration::from_millis(1600)));
        assert!(debouncer.ready(start + Duration::from_millis(2500)));
    }

    #[tokio::test]
    async fn test_burst_collapses_to_one_cycle() {
        let mut watch = trigger(1000);

        assert_eq!(watch.handle_event(ChangeEvent::file("svc.yaml")).await, EventDisposition::Triggered);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(watch.handle_event(ChangeEvent::file("svc.yaml")).await, EventDisposition::Debounced);

        assert_eq!(watch.runner().runs, 1);
        assert_eq!(watch.state(), WatchState::Idle);
    }

    #[tokio::test]
    async fn test_irrelevant_events_ignored() {
        let mut watch = trigger(10);

        assert_eq!(watch.handle_event(ChangeEvent::directory("conf.d.yaml")).await, EventDisposition::Ignored);
        assert_eq!(watch.handle_event(ChangeEvent::file("README.md")).await, EventDisposition::Ignored);
        assert_eq!(watch.handle_event(ChangeEvent::file("report.json")).await, EventDisposition::Ignored);
        assert_eq!(watch.runner().runs, 0);
        assert_eq!(watch.stats().ignored, 3);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_final() {
        let mut watch = trigger(10);
        watch.stop();
        watch.stop();
        assert_eq!(watch.state(), WatchState::Stopped);
        assert_eq!(watch.handle_event(ChangeEvent::file("a.yaml")).await, EventDisposition::Ignored);
        assert_eq!(watch.runner().runs, 0);
    }
}
