//! The confirmation gate.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::{Result, RigupError};

/// Convert dialoguer errors to RigupError.
fn map_dialoguer_err(e: dialoguer::Error) -> RigupError {
    RigupError::Io(e.into())
}

/// Ask the operator a yes/no question on the terminal.
///
/// Defaults to "no": only an affirmative answer proceeds, anything else
/// declines. Used exclusively to gate system-wide destructive installs.
pub fn confirm(question: &str) -> Result<bool> {
    let term = Term::stderr();
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(question)
        .default(false)
        .interact_on(&term)
        .map_err(map_dialoguer_err)
}
