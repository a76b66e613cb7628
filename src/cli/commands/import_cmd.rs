//! `dotp import`: add entries from an otpauth:// URI list or an Aegis
//! backup.

use std::path::Path;

use crate::cli::output;
use crate::cli::{open_vault, Cli, PasswordSource};
use crate::errors::{DotpError, Result};
use crate::transfer::{self, TransferFormat};
use crate::vault::Vault;

/// Counts reported after an import.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
    pub malformed: usize,
}

/// Execute the `import` command.
pub fn execute(cli: &Cli, passwords: &PasswordSource, file: &Path, aegis: bool) -> Result<()> {
    if !file.exists() {
        return Err(DotpError::CommandFailed(format!(
            "import file not found: {}",
            file.display()
        )));
    }

    let format = if aegis {
        TransferFormat::Aegis
    } else {
        TransferFormat::OtpauthText
    };

    let (mut vault, password, _) = open_vault(cli, passwords)?;
    let report = transfer::import_file(file, format)?;

    let summary = merge(&mut vault, report);
    if summary.added > 0 {
        vault.save(&password)?;
    }

    output::success(&format!(
        "Imported {} entr{} from {}",
        summary.added,
        if summary.added == 1 { "y" } else { "ies" },
        file.display()
    ));
    if summary.duplicates > 0 {
        output::info(&format!(
            "Skipped {} entr{} whose label already exists",
            summary.duplicates,
            if summary.duplicates == 1 { "y" } else { "ies" }
        ));
    }
    if summary.malformed > 0 {
        output::warning(&format!(
            "Skipped {} malformed record(s)",
            summary.malformed
        ));
    }

    Ok(())
}

/// Add imported entries whose label is not already in the vault.
pub fn merge(vault: &mut Vault, report: transfer::ImportReport) -> ImportSummary {
    let mut summary = ImportSummary {
        malformed: report.skipped_malformed,
        ..ImportSummary::default()
    };

    for entry in report.entries {
        if vault.get_entry_exact(&entry.label).is_some() {
            summary.duplicates += 1;
            continue;
        }
        output::info(&format!("  + {}", entry.display_label()));
        vault.add_entry(entry);
        summary.added += 1;
    }

    summary
}
