//! Install-strategy selection.
//!
//! Maps a probed [`ExecutionContext`] and an optional operator override to
//! exactly one [`InstallStrategy`]. The inference rules live in [`RULES`],
//! an ordered table of (predicate, strategy) pairs evaluated first-match-wins,
//! so the priority contract is data a test can walk rather than control flow
//! a reader has to re-derive.
//!
//! The ordering is a correctness contract, not a style choice: reordering
//! changes which installs happen on real machines.

use crate::probe::ExecutionContext;

/// pip major version that first refuses to install into a distro-managed
/// environment without an explicit override flag.
pub const PIP_PROTECTED_MAJOR: u32 = 23;

/// Explicit operator override for the install mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Install into the managed virtual environment.
    Venv,
    /// Install into the shared system environment (confirmation-gated).
    System,
    /// Install into the per-user site.
    User,
    /// Editable install: the live source tree becomes the installed package.
    Develop,
}

/// One of the closed set of installation strategies.
///
/// Each variant carries the concrete flag set for the package-manager
/// invocation and a human-readable justification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStrategy {
    /// Install into the active environment with no extra flags. Selected when
    /// the interpreter is already sandboxed in a virtual environment, or when
    /// the operator forces a system install on a pip old enough not to
    /// protect the system environment.
    ActiveEnv,
    /// Shared-environment install on pip >= 23, which refuses without
    /// `--break-system-packages`.
    BreakSystem,
    /// Per-user site install for older pips.
    UserSite,
    /// Editable/development install.
    Editable {
        /// Whether the surrounding environment needs the protection override.
        break_system: bool,
    },
    /// Create (or reuse) the managed virtual environment and install there.
    ManagedVenv,
}

impl InstallStrategy {
    /// Short machine-friendly name, used in status output and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActiveEnv => "active-environment",
            Self::BreakSystem => "break-system-packages",
            Self::UserSite => "user-site",
            Self::Editable { .. } => "develop-editable",
            Self::ManagedVenv => "managed-venv",
        }
    }

    /// Why this strategy was chosen; shown to the operator before anything
    /// runs.
    pub fn justification(&self) -> &'static str {
        match self {
            Self::ActiveEnv => "the active interpreter environment accepts installs directly",
            Self::BreakSystem => {
                "pip >= 23 protects the system environment; overriding with an explicit flag"
            }
            Self::UserSite => {
                "pip predates system-environment protection; installing into the per-user site"
            }
            Self::Editable { .. } => {
                "development install: the live source tree becomes the installed package"
            }
            Self::ManagedVenv => {
                "pip version unknown; using the managed virtual environment instead of guessing"
            }
        }
    }

    /// Flags that apply to every package-manager invocation under this
    /// strategy, uninstall included.
    pub fn environment_flags(&self) -> &'static [&'static str] {
        match self {
            Self::BreakSystem | Self::Editable { break_system: true } => {
                &["--break-system-packages"]
            }
            _ => &[],
        }
    }

    /// Flags for the install invocation: environment flags plus any
    /// install-only flags.
    pub fn install_flags(&self) -> Vec<&'static str> {
        let mut flags: Vec<&'static str> = self.environment_flags().to_vec();
        match self {
            Self::UserSite => flags.push("--user"),
            Self::Editable { .. } => flags.push("--editable"),
            _ => {}
        }
        flags
    }

    /// Whether this strategy installs into the managed virtual environment,
    /// which must be ensured before the executor runs.
    pub fn needs_managed_venv(&self) -> bool {
        matches!(self, Self::ManagedVenv)
    }
}

/// One row of the selection table.
pub struct SelectionRule {
    /// Rule name, used in logs and tests.
    pub name: &'static str,
    applies: fn(&ExecutionContext) -> bool,
    choose: fn(&ExecutionContext) -> InstallStrategy,
}

impl SelectionRule {
    /// Whether this rule matches the context.
    pub fn applies(&self, ctx: &ExecutionContext) -> bool {
        (self.applies)(ctx)
    }

    /// The strategy this rule selects.
    pub fn choose(&self, ctx: &ExecutionContext) -> InstallStrategy {
        (self.choose)(ctx)
    }
}

/// The inference rules, in priority order. First match wins; the final rule
/// is a catch-all, so evaluation is total.
pub const RULES: &[SelectionRule] = &[
    SelectionRule {
        name: "inside-virtual-env",
        applies: |ctx| ctx.in_virtual_env,
        choose: |_| InstallStrategy::ActiveEnv,
    },
    SelectionRule {
        name: "pip-protects-system",
        applies: |ctx| ctx.pip_major.is_some_and(|major| major >= PIP_PROTECTED_MAJOR),
        choose: |_| InstallStrategy::BreakSystem,
    },
    SelectionRule {
        name: "pip-pre-protection",
        applies: |ctx| ctx.pip_major.is_some_and(|major| major < PIP_PROTECTED_MAJOR),
        choose: |_| InstallStrategy::UserSite,
    },
    SelectionRule {
        name: "pip-version-unknown",
        applies: |_| true,
        choose: |_| InstallStrategy::ManagedVenv,
    },
];

/// Select the installation strategy for a probed context.
///
/// An explicit mode is honored unconditionally (the `System` confirmation
/// gate is enforced by the install command before anything executes, not
/// here); otherwise the rule table decides.
pub fn select(ctx: &ExecutionContext, requested: Option<Mode>) -> InstallStrategy {
    if let Some(mode) = requested {
        let strategy = for_mode(ctx, mode);
        tracing::debug!(mode = ?mode, strategy = strategy.name(), "explicit mode override");
        return strategy;
    }

    for rule in RULES {
        if rule.applies(ctx) {
            let strategy = rule.choose(ctx);
            tracing::debug!(rule = rule.name, strategy = strategy.name(), "selection rule matched");
            return strategy;
        }
    }

    // The last rule is a catch-all.
    InstallStrategy::ManagedVenv
}

fn for_mode(ctx: &ExecutionContext, mode: Mode) -> InstallStrategy {
    let protected = ctx
        .pip_major
        .is_some_and(|major| major >= PIP_PROTECTED_MAJOR);
    match mode {
        Mode::Venv => InstallStrategy::ManagedVenv,
        Mode::User => InstallStrategy::UserSite,
        Mode::Develop => InstallStrategy::Editable {
            break_system: !ctx.in_virtual_env && protected,
        },
        Mode::System => {
            if protected {
                InstallStrategy::BreakSystem
            } else {
                InstallStrategy::ActiveEnv
            }
        }
    }
}
