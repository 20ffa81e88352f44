//! `sonde` binary

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let log = config.log.clone().with_env(|key| std::env::var(key).ok());
    let _guard = sonde_log::init_with(log)?;

    match cli.command {
        Command::Count(args) => commands::count::run(args, config),
        Command::Config => commands::config::run(&config),
    }
}
