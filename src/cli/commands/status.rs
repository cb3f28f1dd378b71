//! Status command implementation.
//!
//! Shows the probed environment and the strategy an inferred install would
//! use, without changing anything. This is the transparency contract in
//! read-only form.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::config::{self, Settings, HELPER_BINARY, MAN_PAGES};
use crate::error::Result;
use crate::probe::Prober;
use crate::shell::{SystemRunner, ToolRunner};
use crate::strategy::select;
use crate::ui::Output;
use crate::venv::VenvDescriptor;

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    source_root: PathBuf,
    args: StatusArgs,
}

/// Snapshot reported by `status`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Interpreter that was probed.
    pub interpreter: String,
    /// Whether it runs inside a virtual environment.
    pub in_virtual_env: bool,
    /// pip major version, if known.
    pub pip_major: Option<u32>,
    /// Whether we hold elevated privileges.
    pub elevated: bool,
    /// Strategy an inferred install would select.
    pub strategy: &'static str,
    /// Why that strategy would be selected.
    pub justification: &'static str,
    /// Managed venv root.
    pub venv_root: String,
    /// Whether the managed venv is provisioned.
    pub venv_provisioned: bool,
    /// Whether the native helper has been built.
    pub helper_built: bool,
    /// Man pages present at the source root.
    pub man_pages: Vec<String>,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(source_root: &Path, args: StatusArgs) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            args,
        }
    }

    /// Build the report with explicit dependencies (the testable entry point).
    pub fn report(&self, settings: &Settings, runner: &dyn ToolRunner) -> StatusReport {
        let ctx = Prober::new(&settings.python, runner).probe();
        let strategy = select(&ctx, None);
        let descriptor = VenvDescriptor::new(config::venv_root(&self.source_root));

        let man_pages = MAN_PAGES
            .iter()
            .map(|page| format!("{}.1", page.name))
            .filter(|name| self.source_root.join(name).is_file())
            .collect();

        StatusReport {
            interpreter: ctx.interpreter.display().to_string(),
            in_virtual_env: ctx.in_virtual_env,
            pip_major: ctx.pip_major,
            elevated: ctx.elevated,
            strategy: strategy.name(),
            justification: strategy.justification(),
            venv_root: descriptor.root().display().to_string(),
            venv_provisioned: descriptor.is_provisioned(),
            helper_built: self.source_root.join(HELPER_BINARY).is_file(),
            man_pages,
        }
    }

    fn render(&self, report: &StatusReport, output: &Output) -> Result<()> {
        if self.args.json {
            println!("{}", serde_json::to_string_pretty(report).map_err(anyhow::Error::from)?);
            return Ok(());
        }

        output.message(&format!("Interpreter:      {}", report.interpreter));
        output.message(&format!("Virtual env:      {}", report.in_virtual_env));
        output.message(&format!(
            "pip major:        {}",
            report
                .pip_major
                .map_or_else(|| "unknown".to_string(), |v| v.to_string())
        ));
        output.message(&format!("Elevated:         {}", report.elevated));
        output.message(&format!(
            "Would install as: {} ({})",
            report.strategy, report.justification
        ));
        output.message(&format!(
            "Managed venv:     {} ({})",
            report.venv_root,
            if report.venv_provisioned {
                "provisioned"
            } else {
                "absent"
            }
        ));
        output.message(&format!("Helper built:     {}", report.helper_built));
        if !report.man_pages.is_empty() {
            output.message(&format!("Man pages:        {}", report.man_pages.join(", ")));
        }
        Ok(())
    }
}

impl Command for StatusCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let settings = Settings::from_env();
        let runner = SystemRunner;
        let report = self.report(&settings, &runner);
        self.render(&report, output)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{RecordingRunner, ToolOutput};
    use std::fs;
    use tempfile::TempDir;

    fn settings() -> Settings {
        Settings::from_lookup(|_| None)
    }

    #[test]
    fn report_reflects_probe_and_selection() {
        let temp = TempDir::new().unwrap();
        let cmd = StatusCommand::new(temp.path(), StatusArgs::default());
        let runner = RecordingRunner::new()
            .respond("import sys", ToolOutput::success("1\n", ""))
            .respond("pip --version", ToolOutput::success("pip 24.0 from x", ""));

        let report = cmd.report(&settings(), &runner);

        assert!(report.in_virtual_env);
        assert_eq!(report.pip_major, Some(24));
        assert_eq!(report.strategy, "active-environment");
        assert!(!report.venv_provisioned);
        assert!(!report.helper_built);
    }

    #[test]
    fn report_sees_built_artifacts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(HELPER_BINARY), "bin").unwrap();
        fs::write(temp.path().join("netsim.1"), "page").unwrap();
        let cmd = StatusCommand::new(temp.path(), StatusArgs::default());
        let runner = RecordingRunner::new();

        let report = cmd.report(&settings(), &runner);

        assert!(report.helper_built);
        assert_eq!(report.man_pages, vec!["netsim.1"]);
    }

    #[test]
    fn report_serializes_to_json() {
        let temp = TempDir::new().unwrap();
        let cmd = StatusCommand::new(temp.path(), StatusArgs { json: true });
        let runner = RecordingRunner::new()
            .respond("pip --version", ToolOutput::success("pip 22.1 from x", ""));

        let report = cmd.report(&settings(), &runner);
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"pip_major\":22"));
        assert!(json.contains("\"strategy\":\"user-site\""));
    }
}
