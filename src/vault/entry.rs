//! The `Entry` value object: one TOTP credential record.
//!
//! Entries travel through the vault payload, the import adapters and
//! the CLI as a structured key-value record with exactly five fields:
//! `label`, `secret`, `digits`, `algorithm` and `period`.

use serde::{Deserialize, Serialize};

use crate::errors::{DotpError, Result};

/// Default number of code digits.
pub const DEFAULT_DIGITS: u32 = 6;

/// Default HMAC algorithm name.
pub const DEFAULT_ALGORITHM: &str = "SHA1";

/// Default time step in seconds.
pub const DEFAULT_PERIOD: u64 = 30;

/// A single TOTP credential stored in the vault.
///
/// No range validation happens here: `digits`, `algorithm` and
/// `period` are accepted as given and checked by whoever consumes them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display label, possibly still percent-encoded from a URI import.
    pub label: String,

    /// Base32 shared secret.  Opaque to the vault.
    pub secret: String,

    #[serde(default = "default_digits")]
    pub digits: u32,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_period")]
    pub period: u64,
}

fn default_digits() -> u32 {
    DEFAULT_DIGITS
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM.to_string()
}

fn default_period() -> u64 {
    DEFAULT_PERIOD
}

impl Entry {
    /// Create an entry with default digits, algorithm and period.
    pub fn new(label: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            secret: secret.into(),
            digits: DEFAULT_DIGITS,
            algorithm: default_algorithm(),
            period: DEFAULT_PERIOD,
        }
    }

    /// Builder-style override for the digit count.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// Builder-style override for the algorithm name.
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Builder-style override for the period.
    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    /// Convert to the structured record form.
    pub fn to_record(&self) -> serde_json::Value {
        serde_json::json!({
            "label": self.label,
            "secret": self.secret,
            "digits": self.digits,
            "algorithm": self.algorithm,
            "period": self.period,
        })
    }

    /// Build an entry from a structured record.
    ///
    /// Unknown keys are ignored and missing optional keys take their
    /// defaults.  A missing `label` or `secret`, or a field of the wrong
    /// type, is a `MalformedEntry` error.
    pub fn from_record(record: &serde_json::Value) -> Result<Self> {
        Self::deserialize(record).map_err(|e| DotpError::MalformedEntry(e.to_string()))
    }

    /// The label with percent-escapes decoded, as shown to users.
    pub fn display_label(&self) -> String {
        super::lookup::decode_label(&self.label)
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("label", &self.label)
            .field("secret", &"[redacted]")
            .field("digits", &self.digits)
            .field("algorithm", &self.algorithm)
            .field("period", &self.period)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_applies_defaults() {
        let entry = Entry::new("GitHub", "JBSWY3DPEHPK3PXP");
        assert_eq!(entry.digits, 6);
        assert_eq!(entry.algorithm, "SHA1");
        assert_eq!(entry.period, 30);
    }

    #[test]
    fn record_roundtrip_is_lossless() {
        let entry = Entry::new("GitHub:%20me", "SECRET")
            .with_digits(8)
            .with_algorithm("SHA256")
            .with_period(60);

        let record = entry.to_record();
        assert_eq!(record.as_object().unwrap().len(), 5);
        assert_eq!(Entry::from_record(&record).unwrap(), entry);
    }

    #[test]
    fn from_record_fills_missing_optionals() {
        let entry = Entry::from_record(&json!({"label": "A", "secret": "B"})).unwrap();
        assert_eq!(entry, Entry::new("A", "B"));
    }

    #[test]
    fn from_record_ignores_unknown_fields() {
        let record = json!({"label": "A", "secret": "B", "issuer": "x", "icon": null});
        assert!(Entry::from_record(&record).is_ok());
    }

    #[test]
    fn from_record_requires_label_and_secret() {
        let missing_label = Entry::from_record(&json!({"secret": "B"}));
        assert!(matches!(missing_label, Err(DotpError::MalformedEntry(_))));

        let missing_secret = Entry::from_record(&json!({"label": "A"}));
        assert!(matches!(missing_secret, Err(DotpError::MalformedEntry(_))));
    }

    #[test]
    fn from_record_rejects_wrong_types() {
        let record = json!({"label": "A", "secret": "B", "digits": "six"});
        assert!(matches!(
            Entry::from_record(&record),
            Err(DotpError::MalformedEntry(_))
        ));
    }

    #[test]
    fn from_record_accepts_out_of_range_values() {
        let record = json!({"label": "A", "secret": "B", "digits": 0, "period": 0});
        let entry = Entry::from_record(&record).unwrap();
        assert_eq!(entry.digits, 0);
        assert_eq!(entry.period, 0);
    }

    #[test]
    fn debug_hides_secret() {
        let entry = Entry::new("GitHub", "JBSWY3DPEHPK3PXP");
        let dbg = format!("{entry:?}");
        assert!(dbg.contains("GitHub"));
        assert!(!dbg.contains("JBSWY3DPEHPK3PXP"));
    }
}
