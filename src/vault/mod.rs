//! Vault module: encrypted TOTP entry storage.
//!
//! This module provides:
//! - The `Entry` credential record (`entry`)
//! - Label matching rules (`lookup`)
//! - The on-disk file layout and JSON payload (`format`)
//! - The `Vault` store with load/save and lookup operations (`store`)

pub mod entry;
pub mod format;
pub mod lookup;
pub mod store;

pub use entry::{Entry, DEFAULT_ALGORITHM, DEFAULT_DIGITS, DEFAULT_PERIOD};
pub use store::{Vault, VaultState};
