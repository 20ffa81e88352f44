//! # Sonde Log
//!
//! Logging setup shared by sonde binaries.
//!
//! ```rust,no_run
//! fn main() -> sonde_log::LogResult<()> {
//!     let _guard = sonde_log::auto_init()?;
//!     tracing::info!(port = 9200, "cluster reachable");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;

// Public API
pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, Writer};

/// Result type for logger operations
pub type LogResult<T> = Result<T, LogError>;

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filter parsing error
    #[error("Invalid filter: {0}")]
    Filter(String),
}

/// Pick a configuration from the environment and build type.
///
/// An explicit `SONDE_LOG`/`RUST_LOG` wins; otherwise debug builds get
/// [`Config::development`] and release builds [`Config::production`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    if std::env::var("SONDE_LOG").is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
