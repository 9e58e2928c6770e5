// jmdeps/src/main.rs
use std::process;

use clap::Parser;
use colored::Colorize;
use jmdeps_common::config::Config;
use jmdeps_common::error::{JmdError, Result as JmdResult};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod cli;
mod manifest;

use cli::CliArgs;

fn init_logging(verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("JMDEPS_LOG")
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .without_time()
        .try_init();
}

fn run(cli_args: &CliArgs) -> JmdResult<()> {
    let config = Config::load()
        .map_err(|e| JmdError::Config(format!("Could not load config: {e}")))?;
    debug!("Running command with root {}", config.root().display());
    cli_args.command.run(&config)
}

fn main() {
    let cli_args = CliArgs::parse();
    init_logging(cli_args.verbose);

    if let Err(e) = run(&cli_args) {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
