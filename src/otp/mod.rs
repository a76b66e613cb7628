//! Time-based one-time password generation for vault entries.
//!
//! The RFC 6238 computation itself is delegated to `totp-rs`; this
//! module maps an `Entry` onto it and provides the display helpers for
//! the remaining validity window.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Local};
use totp_rs::{Algorithm, Secret, TOTP};

use crate::errors::{DotpError, Result};
use crate::vault::Entry;

/// Largest digit count whose modulus fits in a `u32`.
const MAX_DIGITS: u32 = 9;

/// Generate the code for `entry` at the current time.
pub fn generate(entry: &Entry) -> Result<String> {
    generate_at(entry, unix_now()?)
}

/// Generate the code for `entry` at `unix_seconds`.
pub fn generate_at(entry: &Entry, unix_seconds: u64) -> Result<String> {
    Ok(build(entry)?.generate(unix_seconds))
}

/// Seconds until the current `period`-second window rolls over.
///
/// Always in `1..=period`; a period of zero is treated as one second.
pub fn seconds_remaining(period: u64, unix_seconds: u64) -> u64 {
    let period = period.max(1);
    period - (unix_seconds % period)
}

/// Local wall-clock time (`HH:MM:SS`) at which the current window ends.
pub fn valid_until(period: u64) -> Result<String> {
    let remaining = seconds_remaining(period, unix_now()?);
    let remaining = i64::try_from(remaining)
        .map_err(|_| DotpError::CodeGeneration(format!("period {period} is too large")))?;
    let until = Local::now() + Duration::seconds(remaining);
    Ok(until.format("%H:%M:%S").to_string())
}

/// Parse an algorithm name (case-insensitive).
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    match name.to_ascii_uppercase().as_str() {
        "SHA1" => Ok(Algorithm::SHA1),
        "SHA256" => Ok(Algorithm::SHA256),
        "SHA512" => Ok(Algorithm::SHA512),
        other => Err(DotpError::CodeGeneration(format!(
            "unsupported algorithm '{other}' (use SHA1, SHA256 or SHA512)"
        ))),
    }
}

/// Decode a base32 secret, tolerating whitespace, padding and lower case.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if normalized.is_empty() {
        return Err(DotpError::CodeGeneration("secret is empty".into()));
    }

    Secret::Encoded(normalized)
        .to_bytes()
        .map_err(|_| DotpError::CodeGeneration("secret is not valid base32".into()))
}

fn build(entry: &Entry) -> Result<TOTP> {
    if entry.digits == 0 || entry.digits > MAX_DIGITS {
        return Err(DotpError::CodeGeneration(format!(
            "digits must be between 1 and {MAX_DIGITS} (got {})",
            entry.digits
        )));
    }
    if entry.period == 0 {
        return Err(DotpError::CodeGeneration(
            "period must be greater than zero".into(),
        ));
    }

    let algorithm = parse_algorithm(&entry.algorithm)?;
    let secret = decode_secret(&entry.secret)?;

    // Unchecked: many issuers still hand out 80-bit secrets.
    Ok(TOTP::new_unchecked(
        algorithm,
        entry.digits as usize,
        0,
        entry.period,
        secret,
    ))
}

fn unix_now() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| DotpError::CodeGeneration(format!("system clock: {e}")))
}
