//! `dotp get`: print the current code for one entry.

use crate::cli::clipboard;
use crate::cli::output;
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::{DotpError, Result};
use crate::otp;

/// Execute the `get` command.
pub fn execute(cli: &Cli, passwords: &PasswordSource, label: &str, copy: bool) -> Result<()> {
    let (vault, _, settings) = open_vault(cli, passwords)?;

    // Exact label first, then the first label starting with the input.
    let entry = vault
        .get_entry(label)
        .ok_or_else(|| DotpError::EntryNotFound(label.to_string()))?;

    let code = otp::generate(entry)?;

    if copy {
        clipboard::copy(&code, &settings)?;
    }

    // Bare code when scripted so the output can be piped.
    let bare = passwords.is_environment();
    output::print_code(&code, bare);
    if copy && !bare {
        output::success(&format!("Copied code for '{}'", entry.display_label()));
    }

    Ok(())
}
