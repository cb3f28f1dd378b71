//! Install executor.
//!
//! Translates a selected [`InstallStrategy`] into the concrete package-manager
//! sequence: uninstall-if-present, then install. Every command line is
//! announced before it runs: the operator must be able to see what will
//! happen before it happens; this is a transparency contract, not optional
//! logging.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{self, HELPER_BINARY, MAN_PAGES, PACKAGE_NAME};
use crate::error::{Result, RigupError};
use crate::shell::{Invocation, RunOptions, ToolRunner};
use crate::strategy::InstallStrategy;
use crate::ui::Output;

/// Runs the package-manager sequence for a strategy.
pub struct InstallExecutor<'a> {
    python: PathBuf,
    runner: &'a dyn ToolRunner,
    output: &'a Output,
    dry_run: bool,
}

impl<'a> InstallExecutor<'a> {
    /// Create an executor driving the package manager of `python`.
    ///
    /// For a managed-venv strategy this is the environment's own interpreter;
    /// for everything else, the probed one.
    pub fn new(python: PathBuf, runner: &'a dyn ToolRunner, output: &'a Output) -> Self {
        Self {
            python,
            runner,
            output,
            dry_run: false,
        }
    }

    /// Preview commands without executing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The uninstall invocation for a strategy.
    pub fn plan_uninstall(&self, strategy: &InstallStrategy) -> Invocation {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "uninstall".to_string()];
        args.extend(strategy.environment_flags().iter().map(|f| f.to_string()));
        args.push("-y".to_string());
        args.push(PACKAGE_NAME.to_string());
        Invocation::new(self.python.display().to_string(), args)
    }

    /// The install invocation for a strategy.
    pub fn plan_install(&self, strategy: &InstallStrategy, source_root: &Path) -> Invocation {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        args.extend(strategy.install_flags().iter().map(|f| f.to_string()));
        args.push(source_root.display().to_string());
        Invocation::new(self.python.display().to_string(), args)
    }

    /// Apply the strategy: announce, uninstall-if-present, install.
    ///
    /// A non-zero uninstall is tolerated (the package may simply not be
    /// installed yet); a non-zero install is fatal with the full command
    /// line and exit code.
    pub fn apply(&self, strategy: &InstallStrategy, source_root: &Path) -> Result<()> {
        self.output.message(&format!(
            "Install strategy: {} ({})",
            strategy.name(),
            strategy.justification()
        ));

        let uninstall = self.plan_uninstall(strategy);
        let install = self.plan_install(strategy, source_root);
        self.output.command(&uninstall.render());
        self.output.command(&install.render());

        if self.dry_run {
            self.output.message("Dry run: nothing executed.");
            return Ok(());
        }

        let out = self.runner.run(&uninstall, &RunOptions::streamed())?;
        if !out.success {
            tracing::debug!(code = ?out.exit_code, "uninstall reported nothing to remove");
            self.output
                .detail(&format!("{PACKAGE_NAME} was not previously installed"));
        }

        let out = self.runner.run(&install, &RunOptions::streamed())?;
        if !out.success {
            return Err(RigupError::ToolFailed {
                command: install.render(),
                code: out.exit_code,
            });
        }

        self.output
            .success(&format!("Installed {PACKAGE_NAME} ({})", strategy.name()));
        Ok(())
    }
}

/// Copy built artifacts (helper binary, man pages) into their install
/// directories. Artifacts that have not been built are skipped.
///
/// Returns the installed paths.
pub fn install_artifacts(
    source_root: &Path,
    bindir: &Path,
    mandir: &Path,
    output: &Output,
) -> Result<Vec<PathBuf>> {
    let mut installed = Vec::new();

    let helper = source_root.join(HELPER_BINARY);
    if helper.is_file() {
        fs::create_dir_all(bindir)?;
        let target = bindir.join(HELPER_BINARY);
        fs::copy(&helper, &target)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(0o755))?;
        }
        output.message(&format!("Installed {}", target.display()));
        installed.push(target);
    }

    for page in MAN_PAGES {
        let source = source_root.join(format!("{}.1", page.name));
        if source.is_file() {
            fs::create_dir_all(mandir)?;
            let target = mandir.join(format!("{}.1", page.name));
            fs::copy(&source, &target)?;
            output.message(&format!("Installed {}", target.display()));
            installed.push(target);
        }
    }

    if installed.is_empty() {
        tracing::debug!("no built artifacts to install");
    }
    Ok(installed)
}

/// Remove generated artifacts from the source root: helper binary, man
/// pages, API doc output. Missing artifacts are skipped silently.
pub fn clean_artifacts(source_root: &Path, output: &Output) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    let helper = source_root.join(HELPER_BINARY);
    if helper.is_file() {
        fs::remove_file(&helper)?;
        removed.push(helper);
    }

    for page in MAN_PAGES {
        let path = source_root.join(format!("{}.1", page.name));
        if path.is_file() {
            fs::remove_file(&path)?;
            removed.push(path);
        }
    }

    let api_docs = source_root.join(config::API_DOC_DIR);
    if api_docs.is_dir() {
        fs::remove_dir_all(&api_docs)?;
        removed.push(api_docs);
    }

    for path in &removed {
        output.message(&format!("Removed {}", path.display()));
    }
    Ok(removed)
}
