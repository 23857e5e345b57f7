use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use sift_common::observability::{LogConfig, init_logging};
use sift_config::{DEFAULT_CONFIG_FILE, SiftConfig, SiftConfigLoader};
use std::path::Path;
use std::process::ExitCode;

mod cli;
mod commands;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1) Load config (env wins over files)
    let cfg = load_config(cli.config.as_deref())?;

    // 2) Logging goes to the rolling file, and to stderr with --verbose
    init_logging(LogConfig {
        app_name: "sift",
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cli.verbose || cfg.logging.stderr,
        format: cfg.logging.format,
        default_filter: cfg.logging.level.clone(),
    })
    .context("failed to initialise logging")?;

    let outcome = commands::run(cli.command, &cfg)?;
    Ok(outcome.into())
}

fn load_config(explicit: Option<&Path>) -> Result<SiftConfig> {
    let loader = match explicit {
        Some(path) => SiftConfigLoader::new().with_file(path),
        None => SiftConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    loader.load().context("failed to load configuration")
}
