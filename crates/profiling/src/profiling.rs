//! The profiling facade handed to instrumented components

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::level::ProfilingLevel;
use crate::sink::{NoopSink, ProfilingSink, TracingSink};
use crate::watch::StopWatch;

/// Profiling configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    /// Highest level that gets recorded
    pub level: ProfilingLevel,
}

impl ProfilingConfig {
    /// Build a [`Profiling`] that reports through `tracing`.
    pub fn into_profiling(self) -> Profiling {
        Profiling::with_tracing(self.level)
    }
}

/// A configured level plus the sink samples go to.
///
/// Cheap to clone; clones share the sink.
///
/// # Examples
///
/// ```
/// use sonde_profiling::{Profiling, ProfilingLevel};
///
/// let profiling = Profiling::with_tracing(ProfilingLevel::Basic);
/// assert!(profiling.is_enabled(ProfilingLevel::Basic));
/// assert!(!profiling.is_enabled(ProfilingLevel::Full));
///
/// // Not enabled at FULL, so the watch is inactive.
/// let watch = profiling.start("count", ProfilingLevel::Full);
/// assert!(!watch.is_active());
/// ```
#[derive(Clone)]
pub struct Profiling {
    level: ProfilingLevel,
    sink: Arc<dyn ProfilingSink>,
}

impl Profiling {
    /// Create a profiler recording up to `level` into `sink`.
    pub fn new(level: ProfilingLevel, sink: Arc<dyn ProfilingSink>) -> Self {
        Self { level, sink }
    }

    /// Profiler that records through [`TracingSink`].
    pub fn with_tracing(level: ProfilingLevel) -> Self {
        Self::new(level, Arc::new(TracingSink))
    }

    /// Profiler that never records.
    pub fn disabled() -> Self {
        Self::new(ProfilingLevel::None, Arc::new(NoopSink))
    }

    /// Configured level.
    pub fn level(&self) -> ProfilingLevel {
        self.level
    }

    /// Whether operations at `level` are recorded.
    ///
    /// [`ProfilingLevel::None`] is never "enabled", whatever the configuration.
    pub fn is_enabled(&self, level: ProfilingLevel) -> bool {
        level != ProfilingLevel::None && self.level >= level
    }

    /// Start a watch for `domain` at `level`.
    ///
    /// Returns an active watch when [`is_enabled`](Self::is_enabled) holds for
    /// `level`, an inactive one otherwise.
    pub fn start(&self, domain: &str, level: ProfilingLevel) -> StopWatch {
        if self.is_enabled(level) {
            StopWatch::active(domain, Arc::clone(&self.sink))
        } else {
            StopWatch::noop()
        }
    }
}

impl Default for Profiling {
    fn default() -> Self {
        Self::disabled()
    }
}

impl From<ProfilingConfig> for Profiling {
    fn from(config: ProfilingConfig) -> Self {
        config.into_profiling()
    }
}

impl fmt::Debug for Profiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profiling")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
