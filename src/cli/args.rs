//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::strategy::Mode;

/// rigup - build and install orchestrator for the netsim toolkit.
#[derive(Debug, Parser)]
#[command(name = "rigup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the netsim source root (overrides current directory)
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install netsim, selecting a strategy from the environment
    Install(InstallArgs),

    /// Remove build artifacts (and, with --env, the managed venv)
    Clean(CleanArgs),

    /// Show the probed environment and the strategy that would be used
    /// (default if no command specified)
    Status(StatusArgs),

    /// Compile the nsexec native helper
    BuildHelper,

    /// Generate man pages
    Man,

    /// Generate API documentation
    Doc,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Explicit install mode override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Install into the managed virtual environment
    Venv,
    /// Install into the shared system environment (asks for confirmation)
    System,
    /// Install into the per-user site
    User,
    /// Editable install from the live source tree
    Develop,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Venv => Mode::Venv,
            ModeArg::System => Mode::System,
            ModeArg::User => Mode::User,
            ModeArg::Develop => Mode::Develop,
        }
    }
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Install mode; omitted means infer from the environment
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Skip the system-install confirmation gate
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `clean` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CleanArgs {
    /// Also remove the managed virtual environment
    #[arg(long)]
    pub env: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_without_subcommand() {
        let cli = Cli::try_parse_from(["rigup"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn install_mode_values_match_the_documented_set() {
        for (value, expected) in [
            ("venv", ModeArg::Venv),
            ("system", ModeArg::System),
            ("user", ModeArg::User),
            ("develop", ModeArg::Develop),
        ] {
            let cli = Cli::try_parse_from(["rigup", "install", "--mode", value]).unwrap();
            match cli.command {
                Some(Commands::Install(args)) => assert_eq!(args.mode, Some(expected)),
                other => panic!("expected install command, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["rigup", "install", "--mode", "global"]).is_err());
    }

    #[test]
    fn clean_env_flag() {
        let cli = Cli::try_parse_from(["rigup", "clean", "--env"]).unwrap();
        match cli.command {
            Some(Commands::Clean(args)) => assert!(args.env),
            other => panic!("expected clean command, got {other:?}"),
        }
    }

    #[test]
    fn args_are_well_formed() {
        Cli::command().debug_assert();
    }
}
