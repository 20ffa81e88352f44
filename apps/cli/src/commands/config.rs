//! `sonde config`

use crate::config::AppConfig;

/// Print the effective configuration.
pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
