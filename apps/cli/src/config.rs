//! Layered configuration: defaults → TOML file → `SONDE_*` env → flags

use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};
use sonde_profiling::ProfilingConfig;
use sonde_search::TransportConfig;

const DEFAULT_CONFIG_FILE: &str = "sonde.toml";

/// Everything the binary can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: TransportConfig,
    pub profiling: ProfilingConfig,
    pub log: sonde_log::Config,
}

impl AppConfig {
    /// Load configuration, reading `path` if given (it must exist) or
    /// `./sonde.toml` if present.
    ///
    /// Environment keys use `__` as the nesting separator, e.g.
    /// `SONDE_SEARCH__URL` or `SONDE_PROFILING__LEVEL`. `SONDE_LOG` and
    /// `SONDE_LOG_FORMAT` are left to the logger.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) if !path.exists() => bail!("config file {} not found", path.display()),
            Some(path) => path,
            None => Path::new(DEFAULT_CONFIG_FILE),
        };

        Self::figment(file, Env::prefixed("SONDE_"))
            .extract()
            .with_context(|| format!("invalid configuration (file {})", file.display()))
    }

    fn figment(file: &Path, env: Env) -> Figment {
        let env = env
            .filter(|key| {
                let key = key.as_str();
                !key.eq_ignore_ascii_case("log")
                    && !key.eq_ignore_ascii_case("log_format")
                    && !key.eq_ignore_ascii_case("config")
            })
            .split("__");

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(env)
    }
}
