//! Man command implementation.

use std::path::{Path, PathBuf};

use crate::docs::DocGenerator;
use crate::error::Result;
use crate::shell::SystemRunner;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The man command implementation.
pub struct ManCommand {
    source_root: PathBuf,
}

impl ManCommand {
    /// Create a new man command.
    pub fn new(source_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
        }
    }
}

impl Command for ManCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let runner = SystemRunner;
        let generator = DocGenerator::new(&runner, output);
        generator.generate_man_pages(&self.source_root)?;
        Ok(CommandResult::success())
    }
}
