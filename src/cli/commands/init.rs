//! `dotp init`: create a new encrypted vault.

use std::fs;

use crate::cli::output;
use crate::cli::{PasswordSource, Cli};
use crate::config::Settings;
use crate::errors::{DotpError, Result};
use crate::vault::Vault;

/// Execute the `init` command.
///
/// Without `--vault`/`DOTP_VAULT` the vault goes to the application
/// config directory; the config file's `vault_path` is not consulted.
pub fn execute(cli: &Cli, passwords: &PasswordSource) -> Result<()> {
    let vault_path = match &cli.vault {
        Some(path) => path.clone(),
        None => Settings::default_vault_path(&Settings::app_dir()?),
    };

    // 1. Refuse to clobber an existing vault.
    let mut vault = Vault::new(vault_path);
    if vault.exists() {
        output::tip("Use `dotp add` to add entries to the existing vault.");
        return Err(DotpError::AlreadyExists(vault.path().to_path_buf()));
    }

    output::info(&format!("Starting new vault at {}", vault.path().display()));

    // 2. Get a new password (validated, confirmed when prompting).
    let password = passwords.new_vault_password()?;

    // 3. Create the parent directory and write the empty vault.
    if let Some(parent) = vault.path().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    vault.create(&password)?;

    output::success("Vault created and encrypted");
    output::tip("Run `dotp add <LABEL>` to add your first entry.");
    output::tip("Run `dotp import <FILE>` to bring in otpauth:// URIs or an Aegis backup.");

    Ok(())
}
