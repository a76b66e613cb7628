//! `dotp list`: show every entry with its current code.

use crate::cli::output::{self, CodeRow};
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::Result;
use crate::otp;
use crate::vault::{Entry, DEFAULT_PERIOD};

/// Execute the `list` command.
pub fn execute(cli: &Cli, passwords: &PasswordSource) -> Result<()> {
    let (vault, _, _) = open_vault(cli, passwords)?;

    let entries = vault.list_entries();
    if entries.is_empty() {
        output::info("No entries in vault");
        output::tip("Run `dotp add <LABEL>` to add your first entry.");
        return Ok(());
    }

    let title = format!("Valid until: {}", otp::valid_until(DEFAULT_PERIOD)?);
    output::print_codes_table(&title, &code_rows(&entries));

    Ok(())
}

/// Build table rows; an entry whose code cannot be computed shows the
/// reason instead of failing the whole listing.
pub fn code_rows<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Vec<CodeRow> {
    entries
        .into_iter()
        .map(|entry| CodeRow {
            label: entry.display_label(),
            code: otp::generate(entry).unwrap_or_else(|e| format!("({e})")),
        })
        .collect()
}
