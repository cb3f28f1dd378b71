//! Recording fake for [`ToolRunner`].
//!
//! Tests script tool behavior with substring rules matched against the
//! rendered command line, and afterwards assert on the exact sequence of
//! invocations. No real tool is ever launched.

use std::cell::RefCell;

use crate::error::{Result, RigupError};
use crate::shell::command::{Invocation, RunOptions, ToolOutput, ToolRunner};

/// A scripted response rule.
struct Rule {
    needle: String,
    output: ToolOutput,
    launch_failure: bool,
}

/// A [`ToolRunner`] that records invocations and replays scripted outputs.
///
/// Rules are checked in registration order against the rendered command line;
/// first match wins. Unmatched invocations succeed with empty output.
#[derive(Default)]
pub struct RecordingRunner {
    rules: Vec<Rule>,
    calls: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    /// A runner where every invocation succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for command lines containing `needle`.
    pub fn respond(mut self, needle: &str, output: ToolOutput) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            output,
            launch_failure: false,
        });
        self
    }

    /// Script a launch failure (tool not found) for command lines containing
    /// `needle`.
    pub fn refuse_to_launch(mut self, needle: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            output: ToolOutput::failure(None, "", ""),
            launch_failure: true,
        });
        self
    }

    /// All invocations seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines seen so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::render).collect()
    }

    /// Whether any recorded command line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.command_lines().iter().any(|line| line.contains(needle))
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, _options: &RunOptions) -> Result<ToolOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let line = invocation.render();
        for rule in &self.rules {
            if line.contains(&rule.needle) {
                if rule.launch_failure {
                    return Err(RigupError::ToolNotFound {
                        tool: invocation.program.clone(),
                        message: "scripted launch failure".to_string(),
                    });
                }
                return Ok(rule.output.clone());
            }
        }
        Ok(ToolOutput::success("", ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_invocations_succeed() {
        let runner = RecordingRunner::new();
        let out = runner
            .run(
                &Invocation::new("anything", ["at", "all"]),
                &RunOptions::captured(),
            )
            .unwrap();
        assert!(out.success);
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn first_matching_rule_wins() {
        let runner = RecordingRunner::new()
            .respond("pip --version", ToolOutput::success("pip 24.0", ""))
            .respond("pip", ToolOutput::failure(Some(1), "", "broken"));

        let out = runner
            .run(
                &Invocation::new("python3", ["-m", "pip", "--version"]),
                &RunOptions::captured(),
            )
            .unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "pip 24.0");
    }

    #[test]
    fn scripted_launch_failure_is_err() {
        let runner = RecordingRunner::new().refuse_to_launch("help2man");
        let err = runner
            .run(
                &Invocation::new("help2man", ["-N"]),
                &RunOptions::captured(),
            )
            .unwrap_err();
        assert!(matches!(err, RigupError::ToolNotFound { .. }));
    }

    #[test]
    fn saw_matches_rendered_lines() {
        let runner = RecordingRunner::new();
        let _ = runner.run(
            &Invocation::new("python3", ["-m", "venv", "netsim-venv"]),
            &RunOptions::captured(),
        );
        assert!(runner.saw("-m venv"));
        assert!(!runner.saw("pip install"));
    }
}
