//! CLI entrypoint for stalg.

mod check;
mod cli;
mod config;
mod dump;
mod input;
mod report;
mod style;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::{Config, Settings};
use style::Palette;

/// Exit code when any error diagnostic was reported.
const EXIT_DIAGNOSTICS: u8 = 1;
/// Exit code for configuration and I/O failures. Clap uses the same code
/// for usage errors.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(EXIT_DIAGNOSTICS),
        Err(err) => {
            eprintln!("{}", Palette::for_stderr().error(format!("Error: {err:#}")));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the command; `Ok(true)` means error diagnostics were reported.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let root = std::env::current_dir().context("failed to resolve working directory")?;
    let (config, config_path) = Config::load(cli.config.as_deref(), &root)?;
    if let Some(path) = &config_path {
        tracing::info!(path = %path.display(), "using config");
    }
    let settings = Settings::resolve(config, &cli);
    tracing::debug!(?settings, "resolved settings");

    match cli.command {
        Command::Check { paths } => {
            let summary = check::run_check(&paths, &settings)?;
            Ok(summary.files_with_errors > 0)
        }
        Command::Dump { path, compact } => dump::run_dump(&path, compact, &settings),
        Command::Tokens { path, trivia } => {
            dump::run_tokens(&path, trivia, Palette::for_stdout(settings.color))?;
            Ok(false)
        }
    }
}
