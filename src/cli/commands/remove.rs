//! `dotp remove`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::{DotpError, Result};

/// Execute the `remove` command.
///
/// The label is compared against the stored label as-is (ignoring
/// case); percent-escapes are not decoded.
pub fn execute(cli: &Cli, passwords: &PasswordSource, label: &str, force: bool) -> Result<()> {
    let (mut vault, password, _) = open_vault(cli, passwords)?;

    // Unless --force is set, ask for confirmation before removing.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove entry '{label}'?"))
            .default(false)
            .interact()
            .map_err(|e| DotpError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    if !vault.remove_entry(label) {
        return Err(DotpError::EntryNotFound(label.to_string()));
    }
    vault.save(&password)?;

    output::success(&format!("Removed entry '{label}' ({} left)", vault.len()));
    Ok(())
}
