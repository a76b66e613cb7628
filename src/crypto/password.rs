//! Password-level envelope: salt generation, key derivation and
//! authenticated encryption in one call.
//!
//! `encrypt_with_password` returns the ciphertext and the salt that was
//! used; the caller persists both.  `decrypt_with_password` re-derives
//! the key from the stored salt.

use tracing::trace;

use super::encryption;
use super::kdf::{derive_key, generate_salt, Salt};
use crate::errors::Result;

/// Encrypt `plaintext` under `password` with a fresh random salt.
///
/// Two calls with identical inputs produce different salts and
/// different ciphertexts.
pub fn encrypt_with_password(plaintext: &[u8], password: &str) -> Result<(Vec<u8>, Salt)> {
    let salt = generate_salt();
    let key = derive_key(password.as_bytes(), &salt)?;
    let ciphertext = encryption::encrypt(&key, plaintext)?;
    trace!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "sealed payload"
    );
    Ok((ciphertext, salt))
}

/// Decrypt `ciphertext` with the key derived from `password` and `salt`.
///
/// Fails with `AuthenticationFailure` on a wrong password or tampered
/// ciphertext.
pub fn decrypt_with_password(ciphertext: &[u8], password: &str, salt: &[u8]) -> Result<Vec<u8>> {
    let key = derive_key(password.as_bytes(), salt)?;
    encryption::decrypt(&key, ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DotpError;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let (ciphertext, salt) = encrypt_with_password(b"test data", "123456").unwrap();
        let plaintext = decrypt_with_password(&ciphertext, "123456", &salt).unwrap();
        assert_eq!(plaintext, b"test data");
    }

    #[test]
    fn wrong_salt_fails_closed() {
        let (ciphertext, mut salt) = encrypt_with_password(b"test data", "123456").unwrap();
        salt[0] ^= 0xFF;
        let result = decrypt_with_password(&ciphertext, "123456", &salt);
        assert!(matches!(result, Err(DotpError::AuthenticationFailure)));
    }
}
