//! On-disk vault file layout and atomic writes.
//!
//! A vault file has this layout:
//!
//! ```text
//! [salt: 16 bytes][ciphertext: nonce || AES-256-GCM output]
//! ```
//!
//! There is no magic number or version byte.  The ciphertext decrypts to
//! a UTF-8 JSON document `{"entries": [...]}`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::entry::Entry;
use crate::crypto::kdf::{Salt, SALT_LEN};
use crate::errors::{DotpError, Result};

/// The decrypted JSON payload as written to disk.
#[derive(Serialize)]
pub struct VaultDocument {
    pub entries: Vec<serde_json::Value>,
}

/// The decrypted JSON payload as read back, before entry validation.
#[derive(Deserialize)]
struct RawDocument {
    entries: Vec<serde_json::Value>,
}

impl VaultDocument {
    /// Build a document from entries in their current order.
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self {
            entries: entries.iter().map(Entry::to_record).collect(),
        }
    }

    /// Serialize the document to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| DotpError::SerializationError(format!("vault payload: {e}")))
    }
}

/// Parse decrypted payload bytes into entries.
///
/// Anything other than a UTF-8 JSON object with an `entries` array of
/// well-formed records is `CorruptVault`.  A single malformed record
/// spoils the whole document.
pub fn parse_document(plaintext: &[u8]) -> Result<Vec<Entry>> {
    let text = std::str::from_utf8(plaintext)
        .map_err(|_| DotpError::CorruptVault("payload is not valid UTF-8".into()))?;

    let raw: RawDocument = serde_json::from_str(text)
        .map_err(|e| DotpError::CorruptVault(format!("payload JSON: {e}")))?;

    raw.entries
        .iter()
        .enumerate()
        .map(|(i, record)| {
            Entry::from_record(record)
                .map_err(|e| DotpError::CorruptVault(format!("entry {i}: {e}")))
        })
        .collect()
}

/// Salt and ciphertext read from a vault file.
pub struct SealedVault {
    pub salt: Salt,
    pub ciphertext: Vec<u8>,
}

/// Read a vault file from disk and split it into salt and ciphertext.
///
/// A file too short to hold a salt cannot be authenticated and is
/// reported as `AuthenticationFailure`.
pub fn read_vault(path: &Path) -> Result<SealedVault> {
    if !path.exists() {
        return Err(DotpError::NotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    if data.len() < SALT_LEN {
        return Err(DotpError::AuthenticationFailure);
    }

    let (salt_bytes, ciphertext) = data.split_at(SALT_LEN);
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(salt_bytes);

    debug!(path = %path.display(), bytes = data.len(), "read vault file");
    Ok(SealedVault {
        salt,
        ciphertext: ciphertext.to_vec(),
    })
}

/// Write a vault file to disk **atomically**.
///
/// The bytes go to a temp file in the same directory which is then
/// renamed over the target, so readers never see a half-written vault.
pub fn write_vault(path: &Path, salt: &Salt, ciphertext: &[u8]) -> Result<()> {
    let mut buf = Vec::with_capacity(SALT_LEN + ciphertext.len());
    buf.extend_from_slice(salt);
    buf.extend_from_slice(ciphertext);

    let tmp_path = temp_path_for(path);
    if let Err(e) = write_private(&tmp_path, &buf) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    debug!(path = %path.display(), bytes = buf.len(), "wrote vault file");
    Ok(())
}

/// Write `bytes` to `path`, replacing any existing content.
///
/// On Unix a new file is created with mode `0o600`, and an existing one
/// is narrowed to `0o600` before anything is written to it.
pub fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

/// Sibling temp path used during atomic writes: `.<name>.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}
