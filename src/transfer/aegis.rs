//! Aegis Authenticator plain-JSON backups (`version: 2`).
//!
//! Only unencrypted backups are supported; an encrypted backup stores
//! `database` as a base64 string and is rejected as a whole.

use serde::{Deserialize, Serialize};

use super::ImportReport;
use crate::errors::{DotpError, Result};
use crate::vault::lookup::decode_label;
use crate::vault::{Entry, DEFAULT_ALGORITHM, DEFAULT_DIGITS, DEFAULT_PERIOD};

/// Backup format version written on export.
const AEGIS_VERSION: u32 = 2;

#[derive(Debug, Deserialize)]
struct AegisBackupIn {
    #[serde(default)]
    database: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AegisEntryIn {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    issuer: Option<String>,
    #[serde(default)]
    info: AegisInfoIn,
}

#[derive(Debug, Default, Deserialize)]
struct AegisInfoIn {
    #[serde(default)]
    secret: Option<String>,
    #[serde(default)]
    digits: Option<u32>,
    #[serde(default)]
    period: Option<u64>,
    #[serde(default)]
    algorithm: Option<String>,
}

#[derive(Debug, Serialize)]
struct AegisBackupOut {
    version: u32,
    database: AegisDatabaseOut,
}

#[derive(Debug, Serialize)]
struct AegisDatabaseOut {
    entries: Vec<AegisEntryOut>,
    folders: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct AegisEntryOut {
    #[serde(rename = "type")]
    kind: &'static str,
    uuid: String,
    name: String,
    issuer: String,
    icon: String,
    info: AegisInfoOut,
    tags: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AegisInfoOut {
    secret: String,
    digits: u32,
    period: u64,
    algorithm: String,
}

/// Import TOTP entries from an Aegis JSON backup.
///
/// Non-TOTP entries are ignored.  Entries that fail to parse or carry no
/// secret are skipped and counted.  A document that is not JSON, or
/// whose database is encrypted, fails the whole import.
pub fn import_aegis(content: &str) -> Result<ImportReport> {
    let backup: AegisBackupIn = serde_json::from_str(content)
        .map_err(|e| DotpError::ImportFailed(format!("invalid Aegis JSON: {e}")))?;

    let records: &[serde_json::Value] = match &backup.database {
        serde_json::Value::Null => return Ok(ImportReport::default()),
        serde_json::Value::String(_) => {
            return Err(DotpError::ImportFailed(
                "encrypted Aegis backups are not supported; export without encryption".into(),
            ));
        }
        serde_json::Value::Object(db) => match db.get("entries") {
            Some(serde_json::Value::Array(items)) => items.as_slice(),
            Some(_) => {
                return Err(DotpError::ImportFailed(
                    "Aegis database entries is not a list".into(),
                ));
            }
            None => &[],
        },
        _ => {
            return Err(DotpError::ImportFailed(
                "Aegis database is not an object".into(),
            ));
        }
    };

    let mut report = ImportReport::default();
    for record in records {
        let item: AegisEntryIn = match serde_json::from_value(record.clone()) {
            Ok(item) => item,
            Err(_) => {
                report.skipped_malformed += 1;
                continue;
            }
        };
        if item.kind != "totp" {
            continue;
        }
        match entry_from_aegis(item) {
            Some(entry) => report.entries.push(entry),
            None => report.skipped_malformed += 1,
        }
    }

    Ok(report)
}

fn entry_from_aegis(item: AegisEntryIn) -> Option<Entry> {
    let secret = item.info.secret.filter(|s| !s.is_empty())?;

    let mut label = item.name.unwrap_or_else(|| "Unknown".to_string());
    if let Some(issuer) = item.issuer.filter(|i| !i.is_empty()) {
        if !label.contains(&issuer) {
            label = format!("{issuer}: {label}");
        }
    }

    Some(
        Entry::new(label, secret)
            .with_digits(item.info.digits.unwrap_or(DEFAULT_DIGITS))
            .with_algorithm(
                item.info
                    .algorithm
                    .unwrap_or_else(|| DEFAULT_ALGORITHM.to_string()),
            )
            .with_period(item.info.period.unwrap_or(DEFAULT_PERIOD)),
    )
}

/// Render entries as a pretty-printed Aegis JSON backup.
///
/// Labels of the form `issuer: name` are split on the first colon;
/// other labels are used as both issuer and name.
pub fn export_aegis(entries: &[Entry]) -> Result<String> {
    let backup = AegisBackupOut {
        version: AEGIS_VERSION,
        database: AegisDatabaseOut {
            entries: entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let label = decode_label(&entry.label);
                    let (issuer, name) = match label.split_once(':') {
                        Some((issuer, name)) => {
                            (issuer.trim().to_string(), name.trim().to_string())
                        }
                        None => (label.clone(), label.clone()),
                    };
                    AegisEntryOut {
                        kind: "totp",
                        uuid: format!("generated-{i:08x}"),
                        name,
                        issuer,
                        icon: String::new(),
                        info: AegisInfoOut {
                            secret: entry.secret.clone(),
                            digits: entry.digits,
                            period: entry.period,
                            algorithm: entry.algorithm.clone(),
                        },
                        tags: Vec::new(),
                    }
                })
                .collect(),
            folders: Vec::new(),
        },
    };

    serde_json::to_string_pretty(&backup)
        .map_err(|e| DotpError::SerializationError(format!("Aegis export: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backup(entries: serde_json::Value) -> String {
        json!({"version": 2, "database": {"entries": entries}}).to_string()
    }

    #[test]
    fn imports_totp_with_issuer_prefix() {
        let content = backup(json!([{
            "type": "totp",
            "name": "user@example.com",
            "issuer": "GitHub",
            "info": {"secret": "SECRET1", "digits": 6, "period": 30, "algorithm": "SHA1"}
        }]));

        let report = import_aegis(&content).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].label, "GitHub: user@example.com");
        assert_eq!(report.entries[0].secret, "SECRET1");
    }

    #[test]
    fn issuer_already_in_name_is_not_repeated() {
        let content = backup(json!([{
            "type": "totp", "name": "GitHub work", "issuer": "GitHub",
            "info": {"secret": "S"}
        }]));
        let report = import_aegis(&content).unwrap();
        assert_eq!(report.entries[0].label, "GitHub work");
    }

    #[test]
    fn skips_other_types_and_counts_broken_records() {
        let content = backup(json!([
            {"type": "hotp", "name": "counter", "info": {"secret": "S"}},
            {"type": "totp", "name": "no secret", "info": {}},
            {"type": "totp", "name": "bad digits", "info": {"secret": "S", "digits": "six"}},
            {"type": "totp", "info": {"secret": "S"}}
        ]));

        let report = import_aegis(&content).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].label, "Unknown");
        assert_eq!(report.skipped_malformed, 2);
    }

    #[test]
    fn rejects_encrypted_backup() {
        let content = json!({"version": 1, "database": "b64-ciphertext"}).to_string();
        assert!(matches!(
            import_aegis(&content),
            Err(DotpError::ImportFailed(_))
        ));
    }

    #[test]
    fn export_splits_issuer_and_name() {
        let entries = vec![
            Entry::new("GitHub: user@example.com", "SECRET1"),
            Entry::new("Plain", "SECRET2"),
        ];
        let value: serde_json::Value =
            serde_json::from_str(&export_aegis(&entries).unwrap()).unwrap();

        assert_eq!(value["version"], 2);
        let out = &value["database"]["entries"];
        assert_eq!(out[0]["type"], "totp");
        assert_eq!(out[0]["issuer"], "GitHub");
        assert_eq!(out[0]["name"], "user@example.com");
        assert_eq!(out[0]["uuid"], "generated-00000000");
        assert_eq!(out[0]["info"]["secret"], "SECRET1");
        assert_eq!(out[1]["issuer"], "Plain");
        assert_eq!(out[1]["name"], "Plain");
        assert_eq!(out[1]["uuid"], "generated-00000001");
    }
}
