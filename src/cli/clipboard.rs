//! Copying codes to the clipboard.
//!
//! A configured `clipboard_command` (e.g. `wl-copy`, `xclip -sel clip`)
//! receives the text on stdin.  Without one, the system clipboard is
//! set through `arboard`.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::Settings;
use crate::errors::{DotpError, Result};

/// Copy `text` using the configured command or the system clipboard.
pub fn copy(text: &str, settings: &Settings) -> Result<()> {
    match settings.clipboard_command.as_deref() {
        Some(command) if !command.trim().is_empty() => copy_with_command(text, command),
        _ => copy_with_system_clipboard(text),
    }
}

/// Run `command` (split on whitespace) and write `text` to its stdin.
pub fn copy_with_command(text: &str, command: &str) -> Result<()> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| DotpError::ClipboardError("clipboard command is empty".into()))?;

    debug!(program, "copying via clipboard command");
    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| DotpError::ClipboardError(format!("cannot run '{program}': {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| DotpError::ClipboardError(format!("write to '{program}': {e}")))?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(DotpError::ClipboardError(format!(
            "'{program}' exited with {status}"
        )));
    }
    Ok(())
}

fn copy_with_system_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| DotpError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| DotpError::ClipboardError(e.to_string()))
}
