//! Destinations for profiling samples.
//!
//! A [`ProfilingSink`] is told when an active [`StopWatch`](crate::StopWatch)
//! starts and how it ends: either stopped with a label (a [`Sample`]) or
//! dropped without one. Sinks are shared across threads, so every method
//! takes `&self`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

/// One recorded measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Operation domain the watch was started for (e.g. `"count"`)
    pub domain: String,
    /// Human-readable description supplied on stop
    pub label: String,
    /// Time between start and stop
    pub elapsed: Duration,
}

impl Sample {
    /// Elapsed time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

/// Receives profiling events from active stopwatches.
pub trait ProfilingSink: Send + Sync {
    /// An active watch was started for `domain`.
    fn on_start(&self, _domain: &str) {}

    /// An active watch was stopped and produced a sample.
    fn on_stop(&self, sample: &Sample);

    /// An active watch was dropped without being stopped.
    fn on_discard(&self, _domain: &str, _elapsed: Duration) {}
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ProfilingSink for NoopSink {
    fn on_stop(&self, _sample: &Sample) {}
}

/// Sink that reports samples as `tracing` events.
///
/// Each sample becomes an `INFO` event on target `sonde::profiling` with the
/// message `"<ms>ms <label>"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProfilingSink for TracingSink {
    fn on_start(&self, domain: &str) {
        tracing::trace!(target: "sonde::profiling", domain, "stopwatch started");
    }

    fn on_stop(&self, sample: &Sample) {
        let ms = sample.elapsed_ms();
        tracing::info!(
            target: "sonde::profiling",
            domain = %sample.domain,
            elapsed_ms = ms,
            "{}ms {}",
            ms,
            sample.label
        );
    }

    fn on_discard(&self, domain: &str, elapsed: Duration) {
        tracing::trace!(
            target: "sonde::profiling",
            domain,
            elapsed_ms = elapsed.as_millis() as u64,
            "stopwatch closed without a label"
        );
    }
}

/// In-memory sink that keeps every sample and counts watch lifecycles.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sonde_profiling::{Profiling, ProfilingLevel, RecordingSink};
///
/// let sink = Arc::new(RecordingSink::new());
/// let profiling = Profiling::new(ProfilingLevel::Full, sink.clone());
///
/// profiling.start("count", ProfilingLevel::Full).stop("count request");
///
/// assert_eq!(sink.started(), 1);
/// assert_eq!(sink.samples()[0].label, "count request");
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    started: AtomicU64,
    discarded: AtomicU64,
    samples: Mutex<Vec<Sample>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active watches started.
    pub fn started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }

    /// Number of active watches stopped with a label.
    pub fn stopped(&self) -> u64 {
        self.samples.lock().len() as u64
    }

    /// Number of active watches dropped without a label.
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Number of active watches closed either way.
    pub fn closed(&self) -> u64 {
        self.stopped() + self.discarded()
    }

    /// Snapshot of every recorded sample, oldest first.
    pub fn samples(&self) -> Vec<Sample> {
        self.samples.lock().clone()
    }

    /// Sum of elapsed time over all samples.
    pub fn total_elapsed(&self) -> Duration {
        self.samples.lock().iter().map(|s| s.elapsed).sum()
    }
}

impl ProfilingSink for RecordingSink {
    fn on_start(&self, _domain: &str) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_stop(&self, sample: &Sample) {
        self.samples.lock().push(sample.clone());
    }

    fn on_discard(&self, _domain: &str, _elapsed: Duration) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }
}
