//! Documentation generation.
//!
//! Pure external-tool invocation: help2man for man pages, doxygen for API
//! docs. Man pages and API docs are independent failure domains: a failing
//! page is reported and skipped, the remaining pages are still attempted,
//! and neither artifact blocks the other.

use std::path::{Path, PathBuf};

use crate::config::{API_DOC_DIR, DOXYGEN_CONFIG, MAN_PAGES};
use crate::error::{Result, RigupError};
use crate::shell::{Invocation, RunOptions, ToolRunner};
use crate::ui::Output;

/// Generates man pages and API docs via external tools.
pub struct DocGenerator<'a> {
    runner: &'a dyn ToolRunner,
    output: &'a Output,
}

impl<'a> DocGenerator<'a> {
    /// Create a generator.
    pub fn new(runner: &'a dyn ToolRunner, output: &'a Output) -> Self {
        Self { runner, output }
    }

    /// Generate a man page for every entry point, at the source root.
    ///
    /// All pages are attempted; the operation fails if any page failed,
    /// naming every failure.
    pub fn generate_man_pages(&self, source_root: &Path) -> Result<Vec<PathBuf>> {
        let mut generated = Vec::new();
        let mut failed = Vec::new();

        for page in MAN_PAGES {
            let target = source_root.join(format!("{}.1", page.name));
            let inv = Invocation::new(
                "help2man",
                [
                    "-N".to_string(),
                    "-n".to_string(),
                    page.blurb.to_string(),
                    source_root.join(page.path).display().to_string(),
                    "-o".to_string(),
                    target.display().to_string(),
                ],
            );
            self.output.command(&inv.render());

            match self.runner.run(&inv, &RunOptions::captured()) {
                Ok(out) if out.success => {
                    self.output.success(&format!("Wrote {}", target.display()));
                    generated.push(target);
                }
                Ok(out) => {
                    self.output.warning(&format!(
                        "man page for {} failed (exit {:?})",
                        page.name, out.exit_code
                    ));
                    failed.push(page.name.to_string());
                }
                Err(e) => {
                    self.output
                        .warning(&format!("man page for {} failed: {e}", page.name));
                    failed.push(page.name.to_string());
                }
            }
        }

        if failed.is_empty() {
            Ok(generated)
        } else {
            Err(RigupError::DocGeneration {
                artifacts: failed.join(", "),
            })
        }
    }

    /// Generate API docs, returning the output directory.
    pub fn generate_api_docs(&self, source_root: &Path) -> Result<PathBuf> {
        let inv = Invocation::new("doxygen", [DOXYGEN_CONFIG]);
        self.output.command(&inv.render());

        let options = RunOptions::streamed().in_dir(source_root);
        let out = self.runner.run(&inv, &options)?;
        if !out.success {
            return Err(RigupError::ToolFailed {
                command: inv.render(),
                code: out.exit_code,
            });
        }

        let dir = source_root.join(API_DOC_DIR);
        self.output
            .success(&format!("API docs written to {}", dir.display()));
        Ok(dir)
    }
}
