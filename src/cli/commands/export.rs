//! `dotp export`: write every entry to an otpauth:// URI list or an
//! Aegis backup.
//!
//! The export file holds plaintext secrets.

use std::path::Path;

use crate::cli::output;
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::{DotpError, Result};
use crate::transfer::{self, TransferFormat};

/// Execute the `export` command.
pub fn execute(cli: &Cli, passwords: &PasswordSource, file: &Path, aegis: bool) -> Result<()> {
    let (vault, _, _) = open_vault(cli, passwords)?;

    check_destination(file, vault.path())?;

    let format = if aegis {
        TransferFormat::Aegis
    } else {
        TransferFormat::OtpauthText
    };

    transfer::export_file(file, vault.entries(), format)?;

    output::success(&format!(
        "Exported {} entries to {}",
        vault.len(),
        file.display()
    ));
    output::warning("The export is not encrypted. Keep it safe and delete it when done.");

    Ok(())
}

/// Refuse to write plaintext over a vault file.
fn check_destination(dest: &Path, vault_path: &Path) -> Result<()> {
    if dest
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dotp"))
    {
        return Err(DotpError::CommandFailed(
            "refusing to export over a .dotp vault file".into(),
        ));
    }

    // Only an existing destination can be the vault itself.
    if let (Ok(dest), Ok(vault)) = (dest.canonicalize(), vault_path.canonicalize()) {
        if dest == vault {
            return Err(DotpError::CommandFailed(format!(
                "refusing to export over the open vault {}",
                vault.display()
            )));
        }
    }

    Ok(())
}
