//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{resolve_vault_path, Settings};
use crate::errors::{DotpError, Result};
use crate::vault::{Vault, DEFAULT_ALGORITHM, DEFAULT_DIGITS, DEFAULT_PERIOD};

/// Required length of a vault password (a numeric PIN).
const PASSWORD_LEN: usize = 6;

/// DOTP CLI: encrypted TOTP vault.
#[derive(Parser)]
#[command(name = "dotp", about = "Dank One Time Password manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vault file
    #[arg(long, env = "DOTP_VAULT", global = true)]
    pub vault: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new encrypted vault
    Init,

    /// Add a new TOTP entry
    Add {
        /// Label for the entry (omit for interactive prompt)
        label: Option<String>,
        /// Base32 secret (omit for hidden prompt)
        secret: Option<String>,
        /// Number of code digits
        #[arg(long, default_value_t = DEFAULT_DIGITS)]
        digits: u32,
        /// Hash algorithm (SHA1, SHA256, SHA512)
        #[arg(long, default_value = DEFAULT_ALGORITHM)]
        algorithm: String,
        /// Code period in seconds
        #[arg(long, default_value_t = DEFAULT_PERIOD)]
        period: u64,
    },

    /// List all entries with their current codes
    List,

    /// Print the current code for one entry (exact label or prefix)
    Get {
        /// Label, or the start of one
        label: String,
        /// Copy the code to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Show entries whose label contains the query
    Search {
        /// Case-insensitive text to look for
        query: String,
    },

    /// Remove an entry
    Remove {
        /// Label of the entry as stored
        label: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change an entry's label or parameters
    Edit {
        /// Label, or the start of one
        label: String,
        /// New label
        #[arg(long = "label", value_name = "NEW_LABEL")]
        new_label: Option<String>,
        /// Prompt for a new secret
        #[arg(long)]
        secret: bool,
        /// New number of code digits
        #[arg(long)]
        digits: Option<u32>,
        /// New hash algorithm
        #[arg(long)]
        algorithm: Option<String>,
        /// New code period in seconds
        #[arg(long)]
        period: Option<u64>,
    },

    /// Import entries from a file of otpauth:// URIs or an Aegis backup
    Import {
        /// File to import from
        file: PathBuf,
        /// Read an Aegis JSON backup
        #[arg(long)]
        aegis: bool,
    },

    /// Export entries to a file of otpauth:// URIs or an Aegis backup
    Export {
        /// File to export to
        file: PathBuf,
        /// Write an Aegis JSON backup
        #[arg(long)]
        aegis: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Password source
// ---------------------------------------------------------------------------

/// Where vault passwords come from for this process.
///
/// Built once in `main`; the vault and crypto layers only ever receive
/// the password as an argument.
pub enum PasswordSource {
    /// Taken from `DOTP_PASSWD` (scripts, piping).
    Environment(Zeroizing<String>),
    /// Asked for interactively.
    Prompt,
}

impl PasswordSource {
    /// Environment variable holding a non-interactive password.
    pub const ENV_VAR: &'static str = "DOTP_PASSWD";

    /// Read `DOTP_PASSWD`; an unset or empty variable means prompting.
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(pw) if !pw.is_empty() => Self::Environment(Zeroizing::new(pw)),
            _ => Self::Prompt,
        }
    }

    /// `true` when the password came from the environment.
    pub fn is_environment(&self) -> bool {
        matches!(self, Self::Environment(_))
    }

    /// Password to unlock an existing vault.
    pub fn vault_password(&self) -> Result<Zeroizing<String>> {
        match self {
            Self::Environment(pw) => Ok(pw.clone()),
            Self::Prompt => {
                let pw = dialoguer::Password::new()
                    .with_prompt("Enter vault password")
                    .interact()
                    .map_err(|e| DotpError::CommandFailed(format!("password prompt: {e}")))?;
                Ok(Zeroizing::new(pw))
            }
        }
    }

    /// Password for a new vault, validated and (when prompting) confirmed.
    pub fn new_vault_password(&self) -> Result<Zeroizing<String>> {
        if let Self::Environment(pw) = self {
            validate_password(pw).map_err(|e| {
                DotpError::InvalidPassword(format!("{}: {e}", Self::ENV_VAR))
            })?;
            return Ok(pw.clone());
        }

        loop {
            let password = dialoguer::Password::new()
                .with_prompt("Type a 6 digit password to encrypt your vault")
                .with_confirmation("Repeat", "Passwords do not match, try again")
                .interact()
                .map_err(|e| DotpError::CommandFailed(format!("password prompt: {e}")))?;
            let password = Zeroizing::new(password);

            if let Err(e) = validate_password(&password) {
                output::warning(&format!("{e}. Try again."));
                continue;
            }

            return Ok(password);
        }
    }
}

/// A vault password must be exactly six ASCII digits.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() == PASSWORD_LEN && password.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DotpError::InvalidPassword(format!(
            "password must be exactly {PASSWORD_LEN} digits"
        )))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load the user settings from the platform config directory.
pub fn load_settings() -> Result<(Settings, PathBuf)> {
    let app_dir = Settings::app_dir()?;
    let settings = Settings::load(&app_dir)?;
    Ok((settings, app_dir))
}

/// Resolve the vault file for commands that operate on an existing vault.
pub fn vault_path(cli: &Cli, settings: &Settings, app_dir: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(resolve_vault_path(
        cli.vault.as_deref(),
        settings,
        &cwd,
        app_dir,
    ))
}

/// Locate, unlock and load the vault.
///
/// Returns the loaded vault together with the password used, so the
/// caller can save changes under the same password.
pub fn open_vault(
    cli: &Cli,
    passwords: &PasswordSource,
) -> Result<(Vault, Zeroizing<String>, Settings)> {
    let (settings, app_dir) = load_settings()?;
    let path = vault_path(cli, &settings, &app_dir)?;

    let mut vault = Vault::new(path);
    if !vault.exists() {
        output::tip("Run `dotp init` to create a new vault.");
        return Err(DotpError::NotFound(vault.path().to_path_buf()));
    }

    let password = passwords.vault_password()?;
    vault.load(&password)?;
    Ok((vault, password, settings))
}
