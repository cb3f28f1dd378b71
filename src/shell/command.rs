//! External tool invocation.
//!
//! Every external process call goes through the [`ToolRunner`] trait. This is
//! the single most important seam for testability: production code uses
//! [`SystemRunner`], tests substitute a recording fake and never touch a real
//! package manager or compiler.
//!
//! Tools are invoked directly (program + argument vector), never through a
//! shell, so argument boundaries survive paths with spaces.

use crate::error::{Result, RigupError};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A single external tool invocation: a program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path.
    pub program: String,
    /// Arguments, one element per argument.
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation from a program and its arguments.
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Render the command line for display and error messages.
    ///
    /// Arguments containing whitespace are quoted so the rendered line can be
    /// pasted into a shell.
    pub fn render(&self) -> String {
        let mut line = quote(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote(arg));
        }
        line
    }
}

fn quote(word: &str) -> String {
    if word.is_empty() || word.chars().any(char::is_whitespace) {
        format!("'{}'", word.replace('\'', "'\\''"))
    } else {
        word.to_string()
    }
}

/// Captured result of a tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty when inherited).
    pub stdout: String,

    /// Standard error (empty when inherited).
    pub stderr: String,

    /// Whether the tool exited zero.
    pub success: bool,
}

impl ToolOutput {
    /// A zero-exit result with the given streams.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: true,
        }
    }

    /// A non-zero-exit result with the given streams.
    pub fn failure(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: false,
        }
    }

    /// Both streams concatenated, stdout first.
    ///
    /// Used for the version query, where the entry point may write to either
    /// stream.
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined
    }
}

/// Options for a tool invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout/stderr (if false, the child inherits ours, so the
    /// operator sees the tool's own output live).
    pub capture: bool,
}

impl RunOptions {
    /// Capture both streams.
    pub fn captured() -> Self {
        Self {
            cwd: None,
            capture: true,
        }
    }

    /// Let the child write straight to the terminal.
    pub fn streamed() -> Self {
        Self {
            cwd: None,
            capture: false,
        }
    }

    /// Set the working directory.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Capability interface for running external tools.
///
/// A non-zero exit is NOT an `Err` at this layer; callers decide whether it
/// is fatal (uninstalling an absent package is tolerated, a failing install
/// is not). `Err` means the tool could not be launched at all.
pub trait ToolRunner {
    /// Run a tool to completion, blocking.
    fn run(&self, invocation: &Invocation, options: &RunOptions) -> Result<ToolOutput>;
}

/// Runner that executes real processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, options: &RunOptions) -> Result<ToolOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        if options.capture {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }

        tracing::debug!("running: {}", invocation.render());

        let output = cmd.output().map_err(|e| RigupError::ToolNotFound {
            tool: invocation.program.clone(),
            message: e.to_string(),
        })?;

        let stdout = if options.capture {
            String::from_utf8_lossy(&output.stdout).to_string()
        } else {
            String::new()
        };
        let stderr = if options.capture {
            String::from_utf8_lossy(&output.stderr).to_string()
        } else {
            String::new()
        };

        if output.status.success() {
            Ok(ToolOutput::success(stdout, stderr))
        } else {
            Ok(ToolOutput::failure(output.status.code(), stdout, stderr))
        }
    }
}
