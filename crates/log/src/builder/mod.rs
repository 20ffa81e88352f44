//! Logger builder implementation

// External dependencies
use tracing_subscriber::{
    EnvFilter, Registry, fmt, fmt::writer::BoxMakeWriter, layer::SubscriberExt,
    util::SubscriberInitExt,
};

// Internal crates
use crate::{
    LogError, LogResult,
    config::{Config, Format, Writer},
};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the logger alive
///
/// Holds the root span carrying the service name; dropping the guard exits
/// it.
#[derive(Debug)]
pub struct LoggerGuard {
    _root_span_guard: Option<tracing::span::EnteredSpan>,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::Filter(format!("{}: {}", &self.config.level, e)))?;

        let writer = make_writer(self.config.writer);
        let display = &self.config.display;
        let registry = Registry::default().with(filter);

        let installed = match self.config.format {
            Format::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_ansi(display.colors)
                        .with_target(display.target)
                        .with_file(display.source)
                        .with_line_number(display.source)
                        .with_thread_ids(display.thread_ids),
                )
                .try_init(),
            Format::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_ansi(display.colors)
                        .with_target(display.target)
                        .with_file(display.source)
                        .with_line_number(display.source)
                        .with_thread_ids(display.thread_ids),
                )
                .try_init(),
            Format::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(display.flatten)
                        .with_writer(writer)
                        .with_target(display.target)
                        .with_file(display.source)
                        .with_line_number(display.source)
                        .with_thread_ids(display.thread_ids),
                )
                .try_init(),
        };
        installed.map_err(|e| LogError::Config(format!("failed to install subscriber: {e}")))?;

        let root_span_guard = self
            .config
            .service
            .as_deref()
            .map(|service| tracing::info_span!("app", service).entered());

        Ok(LoggerGuard {
            _root_span_guard: root_span_guard,
        })
    }
}

fn make_writer(writer: Writer) -> BoxMakeWriter {
    match writer {
        Writer::Stderr => BoxMakeWriter::new(std::io::stderr),
        Writer::Stdout => BoxMakeWriter::new(std::io::stdout),
    }
}
