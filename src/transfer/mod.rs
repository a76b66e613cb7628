//! Import and export adapters.
//!
//! Two formats are supported:
//! - plain text, one `otpauth://` URI per line (`uri`)
//! - Aegis Authenticator JSON backups (`aegis`)
//!
//! Imports never touch the vault: they return entries for the caller
//! to de-duplicate and add.

pub mod aegis;
pub mod uri;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::vault::format::write_private;
use crate::vault::Entry;

pub use aegis::{export_aegis, import_aegis};
pub use uri::{parse_otpauth_uri, to_otpauth_uri};

/// File formats understood by `import` and `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    /// One `otpauth://` URI per line.
    OtpauthText,
    /// Aegis plain JSON backup.
    Aegis,
}

/// Entries read from an import source.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Successfully parsed entries, in file order.
    pub entries: Vec<Entry>,
    /// Records that were recognised but could not be parsed.
    pub skipped_malformed: usize,
}

/// Parse a text document of `otpauth://` URIs.
///
/// Blank lines and lines that do not start with `otpauth://` are
/// ignored.  Malformed URIs are skipped and counted.
pub fn import_text(content: &str) -> ImportReport {
    let mut report = ImportReport::default();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if !line.starts_with(uri::OTPAUTH_PREFIX) {
            continue;
        }
        match parse_otpauth_uri(line) {
            Ok(entry) => report.entries.push(entry),
            Err(e) => {
                warn!(line = number + 1, "skipping URI: {e}");
                report.skipped_malformed += 1;
            }
        }
    }

    report
}

/// Render entries as a text document, one URI per line.
pub fn export_text(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&to_otpauth_uri(entry));
        out.push('\n');
    }
    out
}

/// Read and parse an import file.
pub fn import_file(path: &Path, format: TransferFormat) -> Result<ImportReport> {
    let content = fs::read_to_string(path)?;
    let report = match format {
        TransferFormat::OtpauthText => import_text(&content),
        TransferFormat::Aegis => import_aegis(&content)?,
    };
    debug!(
        path = %path.display(),
        entries = report.entries.len(),
        skipped = report.skipped_malformed,
        "parsed import file"
    );
    Ok(report)
}

/// Write entries to an export file, replacing any existing file.
///
/// The export holds plaintext secrets; on Unix it is created owner-only.
pub fn export_file(path: &Path, entries: &[Entry], format: TransferFormat) -> Result<()> {
    let content = match format {
        TransferFormat::OtpauthText => export_text(entries),
        TransferFormat::Aegis => export_aegis(entries)?,
    };

    write_private(path, content.as_bytes())?;

    debug!(path = %path.display(), entries = entries.len(), "wrote export file");
    Ok(())
}
