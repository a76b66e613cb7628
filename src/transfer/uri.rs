//! `otpauth://` URI parsing and formatting.
//!
//! ```text
//! otpauth://totp/<label>?secret=<base32>&period=30&digits=6&algorithm=SHA1
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::errors::{DotpError, Result};
use crate::vault::lookup::decode_label;
use crate::vault::{Entry, DEFAULT_ALGORITHM, DEFAULT_DIGITS, DEFAULT_PERIOD};

/// URI scheme prefix recognised on import.
pub const OTPAUTH_PREFIX: &str = "otpauth://";

/// Characters escaped in the label path segment on export.
const LABEL_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Parse an `otpauth://totp/...` URI into an entry.
///
/// The label is the percent-decoded path.  Missing `period`, `digits`
/// and `algorithm` parameters take the usual defaults; a missing
/// secret or a non-numeric number is a `MalformedEntry`.
pub fn parse_otpauth_uri(uri: &str) -> Result<Entry> {
    let url = Url::parse(uri.trim())
        .map_err(|e| DotpError::MalformedEntry(format!("invalid URI: {e}")))?;

    if url.scheme() != "otpauth" {
        return Err(DotpError::MalformedEntry(format!(
            "unexpected scheme '{}'",
            url.scheme()
        )));
    }
    match url.host_str() {
        Some(kind) if kind.eq_ignore_ascii_case("totp") => {}
        other => {
            return Err(DotpError::MalformedEntry(format!(
                "unsupported OTP type '{}'",
                other.unwrap_or_default()
            )));
        }
    }

    let label = decode_label(url.path().trim_start_matches('/'));

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    let secret = param("secret")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DotpError::MalformedEntry(format!("'{label}' has no secret")))?;
    let digits = parse_number(param("digits"), "digits", DEFAULT_DIGITS)?;
    let period = parse_number(param("period"), "period", DEFAULT_PERIOD)?;
    let algorithm = param("algorithm").unwrap_or_else(|| DEFAULT_ALGORITHM.to_string());

    Ok(Entry::new(label, secret)
        .with_digits(digits)
        .with_algorithm(algorithm)
        .with_period(period))
}

fn parse_number<T: std::str::FromStr>(value: Option<String>, name: &str, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| DotpError::MalformedEntry(format!("{name} '{v}' is not a number"))),
    }
}

/// Format an entry as an `otpauth://totp/` URI.
pub fn to_otpauth_uri(entry: &Entry) -> String {
    let label = decode_label(&entry.label);
    format!(
        "otpauth://totp/{}?period={}&digits={}&algorithm={}&secret={}",
        utf8_percent_encode(&label, LABEL_ESCAPES),
        entry.period,
        entry.digits,
        entry.algorithm,
        entry.secret
    )
}
