//! Error types for rigup operations.
//!
//! This module defines [`RigupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe uncertainty (pip missing, interpreter odd) is never an error: the
//!   prober maps it to conservative context values instead.
//! - External tool failures are fatal only for the step that invoked them,
//!   and always carry the full command line and exit code.
//! - A declined confirmation is not a failure; it gets its own exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a declined confirmation gate.
///
/// Distinct from the generic failure code so callers can tell "the operator
/// said no" apart from "something broke".
pub const EXIT_DECLINED: i32 = 2;

/// Core error type for rigup operations.
#[derive(Debug, Error)]
pub enum RigupError {
    /// An external tool could not be launched at all (not on PATH, not
    /// executable, or the spawn failed).
    #[error("Failed to launch '{tool}': {message}")]
    ToolNotFound { tool: String, message: String },

    /// An external tool ran and exited non-zero where that is fatal.
    #[error("Command failed with exit code {code:?}: {command}")]
    ToolFailed { command: String, code: Option<i32> },

    /// The package entry point answered the version query with nothing.
    ///
    /// The helper's version identity must never silently default to empty,
    /// so this aborts the build before the compiler is invoked.
    #[error("Version query produced no output: {command}")]
    EmptyVersion { command: String },

    /// Environment creation partially succeeded and was left in place.
    #[error(
        "Virtual environment at {root} is in a partial state: {message}. \
         Inspect it, or delete the directory and re-run."
    )]
    PartialEnvironment { root: PathBuf, message: String },

    /// Documentation generation failed for one or more artifacts.
    #[error("Documentation generation failed for: {artifacts}")]
    DocGeneration { artifacts: String },

    /// The operator declined a confirmation gate.
    #[error("Declined by operator")]
    Declined,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RigupError {
    /// Process exit code for this error.
    ///
    /// A failing external tool propagates its own exit code; everything else
    /// is the generic failure code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Declined => EXIT_DECLINED,
            Self::ToolFailed {
                code: Some(code), ..
            } if *code > 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for rigup operations.
pub type Result<T> = std::result::Result<T, RigupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_displays_tool_and_message() {
        let err = RigupError::ToolNotFound {
            tool: "help2man".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("help2man"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn tool_failed_displays_command_and_code() {
        let err = RigupError::ToolFailed {
            command: "python3 -m pip install .".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3 -m pip install ."));
        assert!(msg.contains("1"));
    }

    #[test]
    fn partial_environment_tells_operator_what_to_do() {
        let err = RigupError::PartialEnvironment {
            root: PathBuf::from("/src/netsim-venv"),
            message: "pip upgrade exited with code 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/src/netsim-venv"));
        assert!(msg.contains("delete the directory"));
    }

    #[test]
    fn declined_maps_to_distinct_exit_code() {
        assert_eq!(RigupError::Declined.exit_code(), EXIT_DECLINED);
    }

    #[test]
    fn failing_tool_propagates_its_exit_code() {
        assert_eq!(
            RigupError::ToolFailed {
                command: "cc".into(),
                code: Some(127),
            }
            .exit_code(),
            127
        );
        // A signal-killed tool has no code to propagate.
        assert_eq!(
            RigupError::ToolFailed {
                command: "cc".into(),
                code: None,
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn empty_version_displays_command() {
        let err = RigupError::EmptyVersion {
            command: "python3 bin/netsim --version".into(),
        };
        assert!(err.to_string().contains("bin/netsim"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RigupError = io_err.into();
        assert!(matches!(err, RigupError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RigupError::Declined)
        }
        assert!(returns_error().is_err());
    }
}
