//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod completions;
pub mod run;

/// gcs-backup - One-way checksum-driven backup to an object storage bucket
///
/// Mirrors the configured home-relative paths into a bucket, skipping files
/// whose stored CRC32C already matches the local content.
#[derive(Parser, Debug)]
#[command(name = "gcs-backup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a backup pass
    Run(run::RunArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Run(args) => run::execute(args, cli.config, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_with_dry_run() {
        let cli = Cli::try_parse_from(["gcs-backup", "run", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run(ref args) if args.dry_run));
        assert!(cli.config.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_parses_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "gcs-backup",
            "--config",
            "/tmp/alt.toml",
            "--quiet",
            "--no-color",
            "--no-progress",
            "run",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/alt.toml")));
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert!(cli.no_progress);
        assert!(matches!(cli.command, Commands::Run(ref args) if !args.dry_run));
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["gcs-backup", "restore"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["gcs-backup"]).is_err());
    }
}
