//! End-to-end install flows through the library API, with every external
//! tool replaced by the recording runner.

use std::path::PathBuf;

use rigup::cli::args::InstallArgs;
use rigup::cli::commands::install::InstallCommand;
use rigup::config::Settings;
use rigup::error::{Result, EXIT_DECLINED};
use rigup::probe::ExecutionContext;
use rigup::shell::{RecordingRunner, ToolOutput};
use rigup::strategy::{select, InstallStrategy};
use rigup::ui::{Output, OutputMode};
use tempfile::TempDir;

fn settings() -> Settings {
    Settings::from_lookup(|_| None)
}

fn quiet() -> Output {
    Output::new(OutputMode::Quiet)
}

fn ctx(in_virtual_env: bool, pip_major: Option<u32>) -> ExecutionContext {
    ExecutionContext {
        interpreter: PathBuf::from("python3"),
        in_virtual_env,
        pip_major,
        elevated: false,
    }
}

fn runner_for(venv_answer: &str, pip_banner: ToolOutput) -> RecordingRunner {
    RecordingRunner::new()
        .respond("import sys", ToolOutput::success(format!("{venv_answer}\n"), ""))
        .respond("pip --version", pip_banner)
}

#[test]
fn selection_properties_hold_across_the_context_space() {
    // Inside a venv, pip version is irrelevant.
    for pip in [None, Some(1), Some(22), Some(23), Some(40)] {
        assert_eq!(select(&ctx(true, pip), None), InstallStrategy::ActiveEnv);
    }
    // Outside, the pip version decides.
    for pip in 23..40 {
        assert_eq!(
            select(&ctx(false, Some(pip)), None),
            InstallStrategy::BreakSystem
        );
    }
    for pip in 1..23 {
        assert_eq!(
            select(&ctx(false, Some(pip)), None),
            InstallStrategy::UserSite
        );
    }
    // Unknown version never guesses a destructive flag.
    let fallback = select(&ctx(false, None), None);
    assert!(fallback.needs_managed_venv());
    assert!(fallback.environment_flags().is_empty());
}

#[test]
fn modern_pip_flow_runs_uninstall_then_install_with_override_flag() {
    let temp = TempDir::new().unwrap();
    let cmd = InstallCommand::new(temp.path(), InstallArgs::default());
    let runner = runner_for("0", ToolOutput::success("pip 24.0 from /usr/lib", ""));
    let output = quiet();
    let gate = |_q: &str| -> Result<bool> { panic!("no gate for inferred installs") };

    let result = cmd
        .execute_with(&settings(), &runner, &gate, true, &output)
        .unwrap();
    assert!(result.success);

    let lines = runner.command_lines();
    // probe venv, probe pip, uninstall, install, in that order.
    assert_eq!(lines.len(), 4);
    assert!(lines[2].contains("pip uninstall --break-system-packages -y netsim"));
    assert!(lines[3].contains("pip install --break-system-packages"));
}

#[test]
fn venv_flow_provisions_then_installs_with_the_venv_interpreter() {
    let temp = TempDir::new().unwrap();
    let cmd = InstallCommand::new(temp.path(), InstallArgs::default());
    // pip missing entirely: conservative fallback.
    let runner = runner_for("0", ToolOutput::failure(Some(1), "", "No module named pip"));
    let output = quiet();
    let gate = |_q: &str| -> Result<bool> { panic!("no gate for inferred installs") };

    cmd.execute_with(&settings(), &runner, &gate, true, &output)
        .unwrap();

    let lines = runner.command_lines();
    let venv_python = temp.path().join("netsim-venv/bin/python");
    let create = lines.iter().position(|l| l.contains("-m venv")).unwrap();
    let upgrade = lines
        .iter()
        .position(|l| l.contains("install --upgrade pip"))
        .unwrap();
    let install = lines
        .iter()
        .position(|l| l.contains("pip install") && !l.contains("--upgrade"))
        .unwrap();
    assert!(create < upgrade && upgrade < install);
    assert!(lines[install].starts_with(&venv_python.display().to_string()));
}

#[test]
fn develop_mode_in_a_venv_needs_no_protection_flag() {
    let temp = TempDir::new().unwrap();
    let cmd = InstallCommand::new(
        temp.path(),
        InstallArgs {
            mode: Some(rigup::cli::args::ModeArg::Develop),
            ..Default::default()
        },
    );
    let runner = runner_for("1", ToolOutput::success("pip 24.0 from /venv/lib", ""));
    let output = quiet();
    let gate = |_q: &str| -> Result<bool> { panic!("develop mode is not gated") };

    cmd.execute_with(&settings(), &runner, &gate, true, &output)
        .unwrap();

    assert!(runner.saw("pip install --editable"));
    assert!(!runner.saw("--break-system-packages"));
}

#[test]
fn declined_system_install_reports_the_distinct_exit_code() {
    let temp = TempDir::new().unwrap();
    let cmd = InstallCommand::new(
        temp.path(),
        InstallArgs {
            mode: Some(rigup::cli::args::ModeArg::System),
            ..Default::default()
        },
    );
    let runner = RecordingRunner::new();
    let output = quiet();
    let gate = |_q: &str| -> Result<bool> { Ok(false) };

    let result = cmd
        .execute_with(&settings(), &runner, &gate, true, &output)
        .unwrap();

    assert_eq!(result.exit_code, EXIT_DECLINED);
    assert!(runner.calls().is_empty());
}

#[test]
fn failing_install_surfaces_the_tool_failure() {
    let temp = TempDir::new().unwrap();
    let cmd = InstallCommand::new(temp.path(), InstallArgs::default());
    let runner = RecordingRunner::new()
        .respond("import sys", ToolOutput::success("1\n", ""))
        .respond("pip --version", ToolOutput::success("pip 24.0 from x", ""))
        .respond("pip install", ToolOutput::failure(Some(1), "", "resolution failed"));
    let output = quiet();
    let gate = |_q: &str| -> Result<bool> { Ok(true) };

    let err = cmd
        .execute_with(&settings(), &runner, &gate, true, &output)
        .unwrap_err();
    assert!(matches!(err, rigup::RigupError::ToolFailed { .. }));
}
