mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;
mod paths;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::CliConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter, e.g. `seleflow_core=debug`.
const LOG_FILTER_ENV: &str = "SELEFLOW_LOG";

fn main() {
    let cli = Cli::parse();
    let config = CliConfig::load();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = init_logging(&config, cli.verbose).ok();

    if let Err(err) = run(cli, &config) {
        error::handle_error(err);
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<()> {
    let format = config.output_format(cli.format);

    match cli.command {
        Commands::Actions => commands::actions::run(format),
        Commands::Render(args) => commands::render::run(args, format),
        Commands::Build(args) => commands::build::run(args, config, format),
        Commands::Shell(args) => commands::shell::run(args, config),
        Commands::Completions { shell } => {
            completions::generate_completions(shell);
            Ok(())
        }
    }
}

fn init_logging(config: &CliConfig, verbose: bool) -> Result<WorkerGuard> {
    let log_dir = paths::logs_dir()?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "seleflow.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let level = if verbose { "debug" } else { config.log.level.as_str() };
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {err}"))?;

    Ok(guard)
}
