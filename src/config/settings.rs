use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{DotpError, Result};

/// User-level configuration, loaded from `<config_dir>/dotp/config.toml`.
///
/// Every field has a default so DOTP works without any config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file to use when neither `--vault` nor `DOTP_VAULT` is given.
    #[serde(default)]
    pub vault_path: Option<PathBuf>,

    /// Command that receives copied codes on stdin (e.g. `wl-copy`).
    /// When unset the system clipboard is used directly.
    #[serde(default)]
    pub clipboard_command: Option<String>,
}

impl Settings {
    /// Application directory name under the user config directory.
    pub const APP_DIR: &'static str = "dotp";

    /// Name of the config file inside the application directory.
    const FILE_NAME: &'static str = "config.toml";

    /// File name of the default vault.
    pub const VAULT_FILE_NAME: &'static str = ".vault.dotp";

    /// The platform config directory for DOTP (`$XDG_CONFIG_HOME/dotp`
    /// on Linux).
    pub fn app_dir() -> Result<PathBuf> {
        let base = directories::BaseDirs::new().ok_or_else(|| {
            DotpError::ConfigError("cannot determine the user config directory".into())
        })?;
        Ok(base.config_dir().join(Self::APP_DIR))
    }

    /// Load settings from `<app_dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let config_path = app_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            DotpError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// The vault created by `init` when no path is given.
    pub fn default_vault_path(app_dir: &Path) -> PathBuf {
        app_dir.join(Self::VAULT_FILE_NAME)
    }
}

/// Pick the vault file to operate on.
///
/// Lookup order:
/// 1. `explicit` (the `--vault` flag or `DOTP_VAULT`)
/// 2. `vault_path` from the config file
/// 3. `.vault.dotp` in `cwd`, if it exists
/// 4. `.vault.dotp` in the application config directory
pub fn resolve_vault_path(
    explicit: Option<&Path>,
    settings: &Settings,
    cwd: &Path,
    app_dir: &Path,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(path) = &settings.vault_path {
        return path.clone();
    }

    let local = cwd.join(Settings::VAULT_FILE_NAME);
    if local.exists() {
        return local;
    }

    Settings::default_vault_path(app_dir)
}

// ── Tests ────────────────────────────────────────────────────────────
