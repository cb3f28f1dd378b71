//! Clean command implementation.
//!
//! Removes generated build artifacts; with `--env`, also tears down the
//! managed virtual environment. Idempotent throughout: cleaning an already
//! clean tree succeeds.

use std::path::{Path, PathBuf};

use crate::cli::args::CleanArgs;
use crate::config::{self, Settings};
use crate::error::Result;
use crate::executor::clean_artifacts;
use crate::shell::{SystemRunner, ToolRunner};
use crate::ui::Output;
use crate::venv::{VenvDescriptor, VenvManager};

use super::dispatcher::{Command, CommandResult};

/// The clean command implementation.
pub struct CleanCommand {
    source_root: PathBuf,
    args: CleanArgs,
}

impl CleanCommand {
    /// Create a new clean command.
    pub fn new(source_root: &Path, args: CleanArgs) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            args,
        }
    }

    /// Run the clean with explicit dependencies (the testable entry point).
    pub fn execute_with(
        &self,
        settings: &Settings,
        runner: &dyn ToolRunner,
        output: &Output,
    ) -> Result<CommandResult> {
        let removed = clean_artifacts(&self.source_root, output)?;

        if self.args.env {
            let descriptor = VenvDescriptor::new(config::venv_root(&self.source_root));
            VenvManager::new(&settings.python, runner).destroy(&descriptor)?;
        }

        if removed.is_empty() && !self.args.env {
            output.message("Nothing to clean.");
        } else {
            output.success("Clean complete.");
        }
        Ok(CommandResult::success())
    }
}

impl Command for CleanCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let settings = Settings::from_env();
        let runner = SystemRunner;
        self.execute_with(&settings, &runner, output)
    }
}
