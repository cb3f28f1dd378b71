//! rigup - build and install orchestrator for the netsim toolkit.
//!
//! rigup compiles netsim's native helper, generates its documentation
//! artifacts, and installs the package into an isolated or shared
//! environment, adapting to whatever it finds at run time: virtual-env
//! presence, installed pip version, elevated privileges.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings from the environment and fixed layout names
//! - [`docs`] - Man page and API doc generation
//! - [`error`] - Error types and result aliases
//! - [`executor`] - The uninstall-then-install package-manager sequence
//! - [`helper`] - Native helper compilation with embedded version string
//! - [`probe`] - Execution-context probing
//! - [`shell`] - External tool invocation (and its recording fake)
//! - [`strategy`] - Install-strategy selection rules
//! - [`ui`] - Terminal output and the confirmation gate
//! - [`venv`] - Managed virtual-environment lifecycle
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use rigup::probe::ExecutionContext;
//! use rigup::strategy::{select, InstallStrategy};
//!
//! // Outside a venv, with a pip new enough to protect the system
//! // environment, the selector reaches for the override flag.
//! let ctx = ExecutionContext {
//!     interpreter: PathBuf::from("python3"),
//!     in_virtual_env: false,
//!     pip_major: Some(24),
//!     elevated: false,
//! };
//! assert_eq!(select(&ctx, None), InstallStrategy::BreakSystem);
//! ```

pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod executor;
pub mod helper;
pub mod probe;
pub mod shell;
pub mod strategy;
pub mod ui;
pub mod venv;

pub use error::{Result, RigupError};
