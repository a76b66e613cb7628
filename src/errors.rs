use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in DOTP.
#[derive(Debug, Error)]
pub enum DotpError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Wrong password or damaged vault: the vault could not be decrypted")]
    AuthenticationFailure,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    NotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Vault content is corrupt: {0}")]
    CorruptVault(String),

    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Entry with label '{0}' already exists")]
    DuplicateEntry(String),

    // --- One-time password errors ---
    #[error("Cannot generate code: {0}")]
    CodeGeneration(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Import/export errors ---
    #[error("Import failed: {0}")]
    ImportFailed(String),

    // --- CLI errors ---
    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for DOTP results.
pub type Result<T> = std::result::Result<T, DotpError>;
