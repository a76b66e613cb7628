//! `dotp add`: add a new TOTP entry to the vault.

use crate::cli::output;
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::{DotpError, Result};
use crate::vault::Entry;

/// Parameters of the `add` command.
pub struct AddArgs<'a> {
    pub label: Option<&'a str>,
    pub secret: Option<&'a str>,
    pub digits: u32,
    pub algorithm: &'a str,
    pub period: u64,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, passwords: &PasswordSource, args: AddArgs<'_>) -> Result<()> {
    // Ask for whatever was not given on the command line.
    let label = match args.label {
        Some(l) => l.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Label")
            .interact_text()
            .map_err(|e| DotpError::CommandFailed(format!("input prompt: {e}")))?,
    };
    let secret = match args.secret {
        Some(s) => {
            output::warning("Secret provided on command line; it may appear in shell history.");
            s.to_string()
        }
        None => dialoguer::Password::new()
            .with_prompt("Secret")
            .interact()
            .map_err(|e| DotpError::CommandFailed(format!("input prompt: {e}")))?,
    };

    let label = label.trim().to_string();
    if label.is_empty() {
        return Err(DotpError::CommandFailed("label cannot be empty".into()));
    }

    let (mut vault, password, _) = open_vault(cli, passwords)?;

    // Exact match only: a prefix of another label is a fine new label.
    if vault.get_entry_exact(&label).is_some() {
        return Err(DotpError::DuplicateEntry(label));
    }

    let entry = Entry::new(label.clone(), secret.trim())
        .with_digits(args.digits)
        .with_algorithm(args.algorithm)
        .with_period(args.period);
    vault.add_entry(entry);
    vault.save(&password)?;

    output::success(&format!("Added entry '{label}' ({} total)", vault.len()));
    Ok(())
}
