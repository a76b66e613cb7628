//! User configuration and vault path resolution.

pub mod settings;

pub use settings::{resolve_vault_path, Settings};
