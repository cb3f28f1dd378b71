//! Virtual-environment lifecycle.
//!
//! `ensure` is idempotent: an existing root with a valid interpreter is left
//! untouched; otherwise the environment is created and its pip upgraded.
//! A partial creation (interpreter present, pip upgrade failed) is reported
//! loudly and left in place for the operator to inspect, never auto-deleted.
//!
//! Descriptors are not shared across concurrent invocations; there is no
//! locking, so two installs racing on the same root is an operational error,
//! not one this module defends against.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, RigupError};
use crate::shell::{Invocation, RunOptions, ToolRunner};

/// Paths of a managed virtual environment, derived from its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvDescriptor {
    root: PathBuf,
}

impl VenvDescriptor {
    /// Describe a venv rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The environment root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Executable directory inside the environment.
    pub fn bin(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    /// Interpreter inside the environment.
    pub fn python(&self) -> PathBuf {
        self.bin().join("python")
    }

    /// pip executable inside the environment.
    pub fn pip(&self) -> PathBuf {
        self.bin().join("pip")
    }

    /// Activation script inside the environment.
    pub fn activate(&self) -> PathBuf {
        self.bin().join("activate")
    }

    /// Whether the root exists and holds a valid interpreter.
    pub fn is_provisioned(&self) -> bool {
        self.python().is_file()
    }
}

/// Creates, upgrades, and tears down managed virtual environments.
pub struct VenvManager<'a> {
    python: &'a Path,
    runner: &'a dyn ToolRunner,
}

impl<'a> VenvManager<'a> {
    /// Create a manager that provisions environments with `python`.
    pub fn new(python: &'a Path, runner: &'a dyn ToolRunner) -> Self {
        Self { python, runner }
    }

    /// Ensure the environment exists and carries a current pip.
    ///
    /// No-op when the descriptor is already provisioned. Creation failure is
    /// fatal; a failed pip upgrade after successful creation is reported as
    /// [`RigupError::PartialEnvironment`] with the root left in place.
    pub fn ensure(&self, descriptor: &VenvDescriptor) -> Result<()> {
        if descriptor.is_provisioned() {
            tracing::debug!(root = %descriptor.root().display(), "virtual environment already provisioned");
            return Ok(());
        }

        let create = Invocation::new(
            self.python.display().to_string(),
            [
                "-m".to_string(),
                "venv".to_string(),
                descriptor.root().display().to_string(),
            ],
        );
        tracing::info!(root = %descriptor.root().display(), "creating virtual environment");
        let out = self.runner.run(&create, &RunOptions::streamed())?;
        if !out.success {
            return Err(RigupError::ToolFailed {
                command: create.render(),
                code: out.exit_code,
            });
        }

        let upgrade = Invocation::new(
            descriptor.python().display().to_string(),
            ["-m", "pip", "install", "--upgrade", "pip"],
        );
        tracing::info!("upgrading pip inside the new environment");
        match self.runner.run(&upgrade, &RunOptions::streamed()) {
            Ok(out) if out.success => Ok(()),
            Ok(out) => Err(RigupError::PartialEnvironment {
                root: descriptor.root().to_path_buf(),
                message: format!("pip upgrade exited with code {:?}", out.exit_code),
            }),
            Err(e) => Err(RigupError::PartialEnvironment {
                root: descriptor.root().to_path_buf(),
                message: format!("pip upgrade could not run: {e}"),
            }),
        }
    }

    /// Remove the environment root recursively. Absent root is success.
    pub fn destroy(&self, descriptor: &VenvDescriptor) -> Result<()> {
        match fs::remove_dir_all(descriptor.root()) {
            Ok(()) => {
                tracing::info!(root = %descriptor.root().display(), "removed virtual environment");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
