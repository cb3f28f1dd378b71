//! Doc command implementation.

use std::path::{Path, PathBuf};

use crate::docs::DocGenerator;
use crate::error::Result;
use crate::shell::SystemRunner;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The doc command implementation.
pub struct DocCommand {
    source_root: PathBuf,
}

impl DocCommand {
    /// Create a new doc command.
    pub fn new(source_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
        }
    }
}

impl Command for DocCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let runner = SystemRunner;
        let generator = DocGenerator::new(&runner, output);
        generator.generate_api_docs(&self.source_root)?;
        Ok(CommandResult::success())
    }
}
