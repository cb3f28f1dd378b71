//! Install command implementation.
//!
//! Orchestrates the full flow: confirmation gate (system mode only), probe,
//! strategy selection, managed-venv provisioning when the strategy needs it,
//! then the package-manager sequence and artifact installation.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::config::{self, Settings};
use crate::error::Result;
use crate::executor::{install_artifacts, InstallExecutor};
use crate::probe::Prober;
use crate::shell::{platform, SystemRunner, ToolRunner};
use crate::strategy::{select, Mode};
use crate::ui::{self, Output};
use crate::venv::{VenvDescriptor, VenvManager};

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    source_root: PathBuf,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(source_root: &Path, args: InstallArgs) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            args,
        }
    }

    /// Run the flow with explicit dependencies (the testable entry point).
    ///
    /// `gate` is only consulted for a system-mode install without `--yes`;
    /// `interactive` gates whether asking is possible at all.
    pub fn execute_with(
        &self,
        settings: &Settings,
        runner: &dyn ToolRunner,
        gate: &dyn Fn(&str) -> Result<bool>,
        interactive: bool,
        output: &Output,
    ) -> Result<CommandResult> {
        let mode = self.args.mode.map(Mode::from);

        // The gate runs before anything else does, probing included: a
        // declined system install must not have touched the package manager
        // at all.
        if matches!(mode, Some(Mode::System)) && !self.args.yes && !self.args.dry_run {
            if !interactive {
                output.message(
                    "System install needs confirmation; re-run with --yes in non-interactive sessions.",
                );
                return Ok(CommandResult::declined());
            }
            let question = format!(
                "Install {} into the shared system environment?",
                config::PACKAGE_NAME
            );
            if !gate(&question)? {
                output.message("System install not confirmed; nothing was changed.");
                return Ok(CommandResult::declined());
            }
        }

        let ctx = Prober::new(&settings.python, runner).probe();
        output.detail(&format!(
            "interpreter {} | virtual env: {} | pip major: {} | elevated: {}",
            ctx.interpreter.display(),
            ctx.in_virtual_env,
            ctx.pip_major
                .map_or_else(|| "unknown".to_string(), |v| v.to_string()),
            ctx.elevated,
        ));

        let strategy = select(&ctx, mode);

        let descriptor = VenvDescriptor::new(config::venv_root(&self.source_root));
        let pip_python = if strategy.needs_managed_venv() {
            if self.args.dry_run {
                output.message(&format!(
                    "Would ensure virtual environment at {}",
                    descriptor.root().display()
                ));
            } else {
                VenvManager::new(&settings.python, runner).ensure(&descriptor)?;
            }
            descriptor.python()
        } else {
            settings.python.clone()
        };

        let executor =
            InstallExecutor::new(pip_python, runner, output).dry_run(self.args.dry_run);
        executor.apply(&strategy, &self.source_root)?;

        if !self.args.dry_run {
            let (bindir, mandir) = if strategy.needs_managed_venv() {
                (descriptor.bin(), descriptor.root().join("share/man/man1"))
            } else {
                (settings.bindir(), settings.mandir())
            };
            install_artifacts(&self.source_root, &bindir, &mandir, output)?;
        }

        Ok(CommandResult::success())
    }
}

impl Command for InstallCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let settings = Settings::from_env();
        let runner = SystemRunner;
        let interactive =
            !platform::is_ci() && console::Term::stderr().features().is_attended();
        self.execute_with(&settings, &runner, &ui::confirm, interactive, output)
    }
}
