//! Migrun CLI - print or apply a SQL migration against a hosted PostgreSQL database

use anyhow::Result;
use mr_core::CoreError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::common::{ExitCode, EXIT_BAD_CONFIG};
use commands::{apply, instructions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::try_parse_checked_from(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_logging(cli.global.verbose);

    match run(&cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code_for(&err);
            if err.downcast_ref::<ExitCode>().is_none() {
                eprintln!("Error: {:#}", err);
            }
            std::process::ExitCode::from(code)
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(cli::Commands::Instructions(args)) => instructions::execute(args, &cli.global).await,
        Some(cli::Commands::Apply(args)) => apply::execute(args, &cli.global).await,
        None => apply::execute(&cli.apply, &cli.global).await,
    }
}

/// Map a command error to the process exit status
fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
        return u8::try_from(*code).unwrap_or(1);
    }
    match err.downcast_ref::<CoreError>() {
        Some(
            CoreError::ConfigParseError { .. }
            | CoreError::ConfigInvalid { .. }
            | CoreError::TargetNotFound { .. },
        ) => EXIT_BAD_CONFIG as u8,
        _ => 1,
    }
}

/// Send log records to stderr; RUST_LOG overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
