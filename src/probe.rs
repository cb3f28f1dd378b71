//! Environment prober.
//!
//! Classifies the execution context before any install decision is made:
//! whether the interpreter is already inside a virtual environment, which
//! major pip version is available, and whether we hold elevated privileges.
//!
//! Probing is side-effect free and never fails: a signal that cannot be
//! determined is recorded as its most conservative value (`false`, or an
//! unknown version), never escalated as an error. Results are not cached:
//! the environment may change between a build step and an install step of
//! the same session, so every invocation re-probes.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use crate::shell::{platform, Invocation, RunOptions, ToolRunner};

/// One-liner handed to the interpreter to detect a virtual environment.
///
/// A venv reports a `base_prefix` different from the effective prefix;
/// legacy virtualenv instead sets `real_prefix`. Either signal is
/// authoritative.
const VENV_CHECK: &str = "import sys; \
print(1 if getattr(sys, 'real_prefix', None) or sys.base_prefix != sys.prefix else 0)";

/// Classification of the current execution context.
///
/// Immutable once probed; strategy selection is a pure function of this
/// value plus the requested mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionContext {
    /// Interpreter the probe ran against.
    pub interpreter: PathBuf,
    /// Whether the interpreter is inside a virtual environment.
    pub in_virtual_env: bool,
    /// Leading major version of pip, if pip was found and parsable.
    pub pip_major: Option<u32>,
    /// Whether we are running with elevated privileges (best-effort).
    pub elevated: bool,
}

/// Probes the running interpreter and installed package manager.
pub struct Prober<'a> {
    python: &'a Path,
    runner: &'a dyn ToolRunner,
}

impl<'a> Prober<'a> {
    /// Create a prober for the given interpreter.
    pub fn new(python: &'a Path, runner: &'a dyn ToolRunner) -> Self {
        Self { python, runner }
    }

    /// Probe the environment.
    pub fn probe(&self) -> ExecutionContext {
        self.probe_with(platform::is_elevated())
    }

    /// Probe with an explicit elevation flag (for testing).
    pub fn probe_with(&self, elevated: bool) -> ExecutionContext {
        let in_virtual_env = self.detect_virtual_env();
        let pip_major = self.detect_pip_major();

        tracing::debug!(
            in_virtual_env,
            pip_major = ?pip_major,
            elevated,
            "probed execution context"
        );

        ExecutionContext {
            interpreter: self.python.to_path_buf(),
            in_virtual_env,
            pip_major,
            elevated,
        }
    }

    fn detect_virtual_env(&self) -> bool {
        let inv = Invocation::new(self.python.display().to_string(), ["-c", VENV_CHECK]);
        match self.runner.run(&inv, &RunOptions::captured()) {
            Ok(out) if out.success => out.stdout.trim() == "1",
            Ok(out) => {
                tracing::debug!(code = ?out.exit_code, "virtual-env check exited non-zero");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "virtual-env check could not run");
                false
            }
        }
    }

    fn detect_pip_major(&self) -> Option<u32> {
        let inv = Invocation::new(
            self.python.display().to_string(),
            ["-m", "pip", "--version"],
        );
        match self.runner.run(&inv, &RunOptions::captured()) {
            Ok(out) if out.success => parse_pip_major(&out.stdout),
            Ok(out) => {
                tracing::debug!(code = ?out.exit_code, "pip version query exited non-zero");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "pip version query could not run");
                None
            }
        }
    }
}

/// Parse the leading major version from pip's version banner.
///
/// pip prints e.g. `pip 24.0 from /usr/lib/python3/dist-packages/pip`.
/// Anything that does not match is treated as unknown, identical to pip not
/// being present at all.
pub fn parse_pip_major(stdout: &str) -> Option<u32> {
    let re = Regex::new(r"^pip (\d+)").ok()?;
    re.captures(stdout.trim_start())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{RecordingRunner, ToolOutput};

    fn probe_against(runner: &RecordingRunner) -> ExecutionContext {
        let python = PathBuf::from("python3");
        Prober::new(&python, runner).probe_with(false)
    }

    #[test]
    fn parse_pip_major_reads_leading_integer() {
        assert_eq!(
            parse_pip_major("pip 24.0 from /usr/lib/python3/dist-packages/pip (python 3.12)\n"),
            Some(24)
        );
        assert_eq!(parse_pip_major("pip 9.0.3 from somewhere"), Some(9));
    }

    #[test]
    fn parse_pip_major_rejects_non_numeric() {
        assert_eq!(parse_pip_major("pip dev from /tmp"), None);
        assert_eq!(parse_pip_major(""), None);
        assert_eq!(parse_pip_major("not pip at all"), None);
    }

    #[test]
    fn detects_virtual_env_from_interpreter_answer() {
        let runner = RecordingRunner::new()
            .respond("import sys", ToolOutput::success("1\n", ""))
            .respond("pip --version", ToolOutput::success("pip 24.0 from x", ""));
        let ctx = probe_against(&runner);
        assert!(ctx.in_virtual_env);
        assert_eq!(ctx.pip_major, Some(24));
    }

    #[test]
    fn interpreter_failure_is_conservative_not_fatal() {
        let runner = RecordingRunner::new().refuse_to_launch("python3");
        let ctx = probe_against(&runner);
        assert!(!ctx.in_virtual_env);
        assert_eq!(ctx.pip_major, None);
    }

    #[test]
    fn missing_pip_yields_unknown_version() {
        let runner = RecordingRunner::new()
            .respond("import sys", ToolOutput::success("0\n", ""))
            .respond(
                "pip --version",
                ToolOutput::failure(Some(1), "", "No module named pip"),
            );
        let ctx = probe_against(&runner);
        assert_eq!(ctx.pip_major, None);
    }

    #[test]
    fn garbled_pip_banner_is_unknown_version() {
        let runner = RecordingRunner::new()
            .respond("import sys", ToolOutput::success("0\n", ""))
            .respond("pip --version", ToolOutput::success("pip unknown.dev0", ""));
        let ctx = probe_against(&runner);
        assert_eq!(ctx.pip_major, None);
    }

    #[test]
    fn probe_has_no_side_effects_and_is_repeatable() {
        let runner = RecordingRunner::new()
            .respond("import sys", ToolOutput::success("0\n", ""))
            .respond("pip --version", ToolOutput::success("pip 22.3 from x", ""));
        let first = probe_against(&runner);
        let second = probe_against(&runner);
        assert_eq!(first, second);
        // Two probes, two interpreter checks and two pip queries: no caching.
        assert_eq!(runner.calls().len(), 4);
    }
}
