//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The vault key is derived from the user's password and a per-write
//! random salt.  The iteration count is fixed; it is not stored in the
//! vault file, so changing it would make existing vaults unreadable.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{DotpError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count (OWASP recommendation for HMAC-SHA256).
pub const PBKDF2_ITERATIONS: u32 = 480_000;

/// A salt as stored at the start of a vault file.
pub type Salt = [u8; SALT_LEN];

/// A 32-byte symmetric key that is wiped from memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([redacted])")
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// Deterministic: the same password and salt always produce the same
/// key.  The salt is always supplied by the caller so that it can be
/// persisted next to the ciphertext and reused on decrypt.
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if salt.len() != SALT_LEN {
        return Err(DotpError::KeyDerivationFailed(format!(
            "salt must be {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }

    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut bytes);
    let key = DerivedKey { bytes };
    bytes.zeroize();

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
