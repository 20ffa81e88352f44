//! Scoped stopwatch sessions

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::sink::{ProfilingSink, Sample};

/// A timer bound to one operation.
///
/// Obtained from [`Profiling::start`](crate::Profiling::start). An *active*
/// watch reports to its sink exactly once: a [`Sample`] when [`stop`] is
/// called, or a discard notification when it is dropped unstopped. An
/// *inactive* watch (profiling disabled for the requested level) never
/// touches a sink.
///
/// [`stop`]: StopWatch::stop
pub struct StopWatch {
    active: Option<Active>,
}

struct Active {
    domain: String,
    start: Instant,
    sink: Arc<dyn ProfilingSink>,
}

impl StopWatch {
    pub(crate) fn active(domain: impl Into<String>, sink: Arc<dyn ProfilingSink>) -> Self {
        let domain = domain.into();
        sink.on_start(&domain);
        Self {
            active: Some(Active {
                domain,
                start: Instant::now(),
                sink,
            }),
        }
    }

    /// A watch that records nothing.
    pub fn noop() -> Self {
        Self { active: None }
    }

    /// Whether stopping this watch will produce a sample.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Domain of an active watch.
    pub fn domain(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.domain.as_str())
    }

    /// Time since start, for active watches.
    pub fn elapsed(&self) -> Option<Duration> {
        self.active.as_ref().map(|a| a.start.elapsed())
    }

    /// Stop the watch and record `label` with the elapsed time.
    ///
    /// The label is only formatted when the watch is active. Returns the
    /// elapsed time for active watches and `None` otherwise.
    pub fn stop(mut self, label: impl fmt::Display) -> Option<Duration> {
        let active = self.active.take()?;
        let elapsed = active.start.elapsed();
        active.sink.on_stop(&Sample {
            domain: active.domain,
            label: label.to_string(),
            elapsed,
        });
        Some(elapsed)
    }
}

impl Drop for StopWatch {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.sink.on_discard(&active.domain, active.start.elapsed());
        }
    }
}

impl fmt::Debug for StopWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopWatch")
            .field("domain", &self.domain())
            .field("elapsed", &self.elapsed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;

    #[test]
    fn stop_records_one_sample() {
        let sink = Arc::new(RecordingSink::new());
        let watch = StopWatch::active("count", sink.clone());
        assert!(watch.is_active());
        assert_eq!(watch.domain(), Some("count"));

        let elapsed = watch.stop("count request");

        assert!(elapsed.is_some());
        assert_eq!(sink.started(), 1);
        assert_eq!(sink.stopped(), 1);
        assert_eq!(sink.discarded(), 0);
        let sample = &sink.samples()[0];
        assert_eq!(sample.domain, "count");
        assert_eq!(sample.label, "count request");
    }

    #[test]
    fn drop_without_stop_discards() {
        let sink = Arc::new(RecordingSink::new());
        {
            let _watch = StopWatch::active("count", sink.clone());
        }

        assert_eq!(sink.stopped(), 0);
        assert_eq!(sink.discarded(), 1);
        assert_eq!(sink.closed(), 1);
    }

    #[test]
    fn noop_watch_reports_nothing() {
        let watch = StopWatch::noop();
        assert!(!watch.is_active());
        assert_eq!(watch.elapsed(), None);
        assert_eq!(watch.stop("ignored"), None);
    }
}
