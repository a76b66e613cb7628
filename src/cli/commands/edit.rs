//! `dotp edit`: change an entry's label or code parameters.

use crate::cli::output;
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::{DotpError, Result};
use crate::otp;

/// Requested changes; `None` keeps the current value.
#[derive(Default)]
pub struct EditArgs<'a> {
    pub new_label: Option<&'a str>,
    pub new_secret: bool,
    pub digits: Option<u32>,
    pub algorithm: Option<&'a str>,
    pub period: Option<u64>,
}

impl EditArgs<'_> {
    fn is_empty(&self) -> bool {
        self.new_label.is_none()
            && !self.new_secret
            && self.digits.is_none()
            && self.algorithm.is_none()
            && self.period.is_none()
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, passwords: &PasswordSource, label: &str, args: EditArgs<'_>) -> Result<()> {
    if args.is_empty() {
        output::info("Nothing to change.");
        output::tip("Pass --label, --secret, --digits, --algorithm or --period.");
        return Ok(());
    }

    let (mut vault, password, _) = open_vault(cli, passwords)?;

    let current = vault
        .get_entry(label)
        .cloned()
        .ok_or_else(|| DotpError::EntryNotFound(label.to_string()))?;

    let mut updated = current.clone();

    if let Some(new_label) = args.new_label {
        let new_label = new_label.trim();
        if new_label.is_empty() {
            return Err(DotpError::CommandFailed("label cannot be empty".into()));
        }
        // Renaming onto another entry's label would make it unreachable.
        if let Some(existing) = vault.get_entry_exact(new_label) {
            if *existing != current {
                return Err(DotpError::DuplicateEntry(new_label.to_string()));
            }
        }
        updated.label = new_label.to_string();
    }

    if args.new_secret {
        let secret = dialoguer::Password::new()
            .with_prompt("New secret")
            .interact()
            .map_err(|e| DotpError::CommandFailed(format!("input prompt: {e}")))?;
        updated.secret = secret.trim().to_string();
    }
    if let Some(digits) = args.digits {
        updated.digits = digits;
    }
    if let Some(algorithm) = args.algorithm {
        updated.algorithm = algorithm.to_string();
    }
    if let Some(period) = args.period {
        updated.period = period;
    }

    // Refuse to store parameters that cannot produce a code.
    otp::generate(&updated)?;

    vault.replace_entry(label, updated);
    vault.save(&password)?;

    output::success(&format!("Updated entry '{}'", current.display_label()));
    Ok(())
}
