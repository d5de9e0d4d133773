//! CLI argument definitions using clap derive API

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Top-level `ApplyArgs` ids, only meaningful when no subcommand is given
const DEFAULT_APPLY_ARG_IDS: [&str; 2] = ["database_url", "no_prompt"];

/// Migrun - print or apply a SQL migration against a hosted PostgreSQL database
///
/// Without a subcommand, Migrun runs `apply`.
#[derive(Parser, Debug)]
#[command(name = "migrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Options for the default `apply` run
    #[command(flatten)]
    pub apply: ApplyArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override the migration file (relative to the project directory)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Named target from migrun.yml (falls back to MIGRUN_TARGET)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Hosted project identifier used in dashboard links
    #[arg(long, global = true, env = "MIGRUN_PROJECT_REF")]
    pub project_ref: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print instructions for applying the migration by hand
    Instructions(InstructionsArgs),

    /// Execute the migration statement by statement
    Apply(ApplyArgs),
}

/// Arguments for the instructions command
#[derive(Args, Debug)]
pub struct InstructionsArgs {
    /// Number of migration lines to preview
    #[arg(long, default_value_t = 20)]
    pub preview_lines: usize,
}

/// Arguments for the apply command
#[derive(Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    /// Database connection string (postgresql://... or duckdb://...)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Never prompt for a connection string
    #[arg(long)]
    pub no_prompt: bool,
}

impl Cli {
    /// Parse arguments like [`Parser::try_parse_from`], additionally rejecting
    /// top-level apply options typed alongside a subcommand.
    ///
    /// Values taken from the environment (`DATABASE_URL`) are not rejected.
    pub fn try_parse_checked_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = Self::command();
        let matches = cmd.try_get_matches_from_mut(itr)?;

        if let Some((name, _)) = matches.subcommand() {
            for id in DEFAULT_APPLY_ARG_IDS {
                if matches.value_source(id) == Some(ValueSource::CommandLine) {
                    return Err(cmd.error(
                        ErrorKind::ArgumentConflict,
                        format!(
                            "'--{}' cannot be used before the '{}' subcommand",
                            id.replace('_', "-"),
                            name
                        ),
                    ));
                }
            }
        }

        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut cmd))
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
