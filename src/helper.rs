//! Native helper builder.
//!
//! Compiles `nsexec` from a single C source file, embedding a version string
//! obtained by asking the package's own entry point. That ordering is a hard
//! invariant: the scripting sources must answer the version query before the
//! compiler is invoked, and the helper's version identity never silently
//! defaults to empty.

use std::path::{Path, PathBuf};

use crate::config::{Settings, HELPER_BINARY, HELPER_SOURCE, VERSION_ENTRY_POINT};
use crate::error::{Result, RigupError};
use crate::shell::{Invocation, RunOptions, ToolRunner};
use crate::ui::Output;

/// Builds the native helper executable.
pub struct HelperBuilder<'a> {
    settings: &'a Settings,
    runner: &'a dyn ToolRunner,
    output: &'a Output,
}

impl<'a> HelperBuilder<'a> {
    /// Create a builder using the compiler and flags from `settings`.
    pub fn new(settings: &'a Settings, runner: &'a dyn ToolRunner, output: &'a Output) -> Self {
        Self {
            settings,
            runner,
            output,
        }
    }

    /// Ask the package entry point for its version string.
    ///
    /// Captures stdout and stderr combined, since the entry point may write
    /// version info to either stream. Fails on non-zero exit or empty
    /// output.
    pub fn query_version(&self, source_root: &Path) -> Result<String> {
        let inv = Invocation::new(
            self.settings.python_str(),
            [VERSION_ENTRY_POINT, "--version"],
        );
        let options = RunOptions::captured().in_dir(source_root);
        let out = self.runner.run(&inv, &options)?;
        if !out.success {
            return Err(RigupError::ToolFailed {
                command: inv.render(),
                code: out.exit_code,
            });
        }
        let version = out.combined().trim().to_string();
        if version.is_empty() {
            return Err(RigupError::EmptyVersion {
                command: inv.render(),
            });
        }
        tracing::debug!(version, "entry point answered version query");
        Ok(version)
    }

    /// Build the helper, returning the path of the produced executable.
    pub fn build(&self, source_root: &Path) -> Result<PathBuf> {
        let version = self.query_version(source_root)?;

        let artifact = source_root.join(HELPER_BINARY);
        let mut args = self.settings.cflags.clone();
        args.push(format!("-DVERSION=\"{version}\""));
        args.push(source_root.join(HELPER_SOURCE).display().to_string());
        args.push("-o".to_string());
        args.push(artifact.display().to_string());
        let compile = Invocation::new(self.settings.cc.clone(), args);

        self.output.command(&compile.render());
        let out = self.runner.run(&compile, &RunOptions::streamed())?;
        if !out.success {
            return Err(RigupError::ToolFailed {
                command: compile.render(),
                code: out.exit_code,
            });
        }

        self.output
            .success(&format!("Built {} (version {version})", artifact.display()));
        Ok(artifact)
    }
}
