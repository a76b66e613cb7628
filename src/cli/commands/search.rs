//! `dotp search`: list entries whose label contains a query.

use crate::cli::commands::list::code_rows;
use crate::cli::output;
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::Result;
use crate::otp;
use crate::vault::DEFAULT_PERIOD;

/// Execute the `search` command.
pub fn execute(cli: &Cli, passwords: &PasswordSource, query: &str) -> Result<()> {
    let (vault, _, _) = open_vault(cli, passwords)?;

    let matches = vault.search_entries(query);
    if matches.is_empty() {
        output::info(&format!("No entries match '{query}'"));
        return Ok(());
    }

    let title = format!(
        "{} match(es), valid until: {}",
        matches.len(),
        otp::valid_until(DEFAULT_PERIOD)?
    );
    output::print_codes_table(&title, &code_rows(matches));

    Ok(())
}
