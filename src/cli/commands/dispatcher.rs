//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::error::{Result, EXIT_DECLINED};
use crate::ui::Output;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, output: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero otherwise).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// The operator declined a confirmation gate. Non-zero, but distinct
    /// from failure and never reported as an error.
    pub fn declined() -> Self {
        Self {
            success: false,
            exit_code: EXIT_DECLINED,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    source_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given source root.
    pub fn new(source_root: PathBuf) -> Self {
        Self { source_root }
    }

    /// Get the source root path.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, `status` runs: it is the only operation that is
    /// always safe.
    pub fn dispatch(&self, cli: &Cli, output: &Output) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => {
                let cmd = super::install::InstallCommand::new(&self.source_root, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Clean(args)) => {
                let cmd = super::clean::CleanCommand::new(&self.source_root, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(&self.source_root, args.clone());
                cmd.execute(output)
            }
            Some(Commands::BuildHelper) => {
                let cmd = super::build_helper::BuildHelperCommand::new(&self.source_root);
                cmd.execute(output)
            }
            Some(Commands::Man) => {
                let cmd = super::man::ManCommand::new(&self.source_root);
                cmd.execute(output)
            }
            Some(Commands::Doc) => {
                let cmd = super::doc::DocCommand::new(&self.source_root);
                cmd.execute(output)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(output)
            }
            None => {
                let cmd =
                    super::status::StatusCommand::new(&self.source_root, StatusArgs::default());
                cmd.execute(output)
            }
        }
    }
}
