//! Build-helper command implementation.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::Result;
use crate::helper::HelperBuilder;
use crate::shell::SystemRunner;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The build-helper command implementation.
pub struct BuildHelperCommand {
    source_root: PathBuf,
}

impl BuildHelperCommand {
    /// Create a new build-helper command.
    pub fn new(source_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
        }
    }
}

impl Command for BuildHelperCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let settings = Settings::from_env();
        let runner = SystemRunner;
        let builder = HelperBuilder::new(&settings, &runner, output);
        builder.build(&self.source_root)?;
        Ok(CommandResult::success())
    }
}
