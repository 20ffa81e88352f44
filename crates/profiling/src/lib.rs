//! # Sonde Profiling
//!
//! Leveled stopwatch profiling. A [`Profiling`] pairs a configured
//! [`ProfilingLevel`] with a [`ProfilingSink`]; instrumented code asks it for
//! a [`StopWatch`] per operation and stops the watch with a human-readable
//! label.
//!
//! ```rust
//! use std::sync::Arc;
//! use sonde_profiling::{Profiling, ProfilingLevel, RecordingSink};
//!
//! let sink = Arc::new(RecordingSink::new());
//! let profiling = Profiling::new(ProfilingLevel::Full, sink.clone());
//!
//! let watch = profiling.start("count", ProfilingLevel::Full);
//! // ... run the operation ...
//! if profiling.is_enabled(ProfilingLevel::Basic) {
//!     watch.stop("count request on collections 'logs'");
//! }
//!
//! assert_eq!(sink.samples().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod level;
mod profiling;
mod sink;
mod watch;

pub use level::{ProfilingError, ProfilingLevel};
pub use profiling::{Profiling, ProfilingConfig};
pub use sink::{NoopSink, ProfilingSink, RecordingSink, Sample, TracingSink};
pub use watch::StopWatch;
