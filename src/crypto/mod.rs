//! Cryptographic primitives for the DOTP vault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption with a derived key (`encryption`)
//! - The password-level envelope used by the vault store (`password`)

pub mod encryption;
pub mod kdf;
pub mod password;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, generate_salt, DerivedKey, Salt, SALT_LEN};
pub use password::{decrypt_with_password, encrypt_with_password};
