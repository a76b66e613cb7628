//! High-level vault operations used by CLI commands.
//!
//! `Vault` owns the ordered entry list, persists it through the crypto
//! envelope, and implements the lookup rules from `lookup`.
//!
//! A vault starts **unloaded** with no entries.  `create` and `load` are
//! the only ways into the **loaded** state; there is no way back.  The
//! store is not synchronized and performs no file locking: the last
//! `save` wins.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::crypto::{decrypt_with_password, encrypt_with_password};
use crate::errors::Result;

use super::entry::Entry;
use super::format::{self, VaultDocument};
use super::lookup;

/// Whether the in-memory entries reflect a vault file yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    Unloaded,
    Loaded,
}

/// The vault handle.  Bind it to a path with `Vault::new`, then call
/// `create` or `load`.
#[derive(Debug)]
pub struct Vault {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Entries in insertion order.  The only copy between load and save.
    entries: Vec<Entry>,

    state: VaultState,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction and persistence
    // ------------------------------------------------------------------

    /// Bind an empty, unloaded vault to `path`.  Touches nothing on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            state: VaultState::Unloaded,
        }
    }

    /// Returns `true` if a file exists at the vault path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write an empty encrypted vault to the path.
    ///
    /// Overwrites unconditionally; callers that must not clobber an
    /// existing vault check `exists` first and report `AlreadyExists`.
    pub fn create(&mut self, password: &str) -> Result<()> {
        self.entries.clear();
        self.write(password)?;
        self.state = VaultState::Loaded;
        debug!(path = %self.path.display(), "created empty vault");
        Ok(())
    }

    /// Decrypt the vault file and replace the in-memory entries.
    ///
    /// On any error the in-memory state is left untouched.
    pub fn load(&mut self, password: &str) -> Result<()> {
        let sealed = format::read_vault(&self.path)?;
        let plaintext = decrypt_with_password(&sealed.ciphertext, password, &sealed.salt)?;
        let entries = format::parse_document(&plaintext)?;

        debug!(path = %self.path.display(), entries = entries.len(), "loaded vault");
        self.entries = entries;
        self.state = VaultState::Loaded;
        Ok(())
    }

    /// Encrypt the current entries under a fresh salt and replace the
    /// vault file atomically.
    pub fn save(&self, password: &str) -> Result<()> {
        self.write(password)?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "saved vault");
        Ok(())
    }

    fn write(&self, password: &str) -> Result<()> {
        let payload = VaultDocument::from_entries(&self.entries).to_bytes()?;
        let (ciphertext, salt) = encrypt_with_password(&payload, password)?;
        format::write_vault(&self.path, &salt, &ciphertext)
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Append an entry.  Duplicate labels are allowed at this layer.
    pub fn add_entry(&mut self, entry: Entry) {
        trace!(label = %entry.label, "add entry");
        self.entries.push(entry);
    }

    /// First entry whose decoded label equals `label`, ignoring case.
    pub fn get_entry_exact(&self, label: &str) -> Option<&Entry> {
        lookup::find_exact(&self.entries, label).map(|i| &self.entries[i])
    }

    /// Exact match if one exists, otherwise the first entry whose
    /// decoded label starts with `label` (case-insensitive).
    pub fn get_entry(&self, label: &str) -> Option<&Entry> {
        lookup::find_best(&self.entries, label).map(|i| &self.entries[i])
    }

    /// Snapshot of all entries in insertion order.
    pub fn list_entries(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Read-only view of the entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Remove the first entry whose **raw** label equals `label`,
    /// ignoring case.  Percent-escapes are not decoded here, unlike
    /// `get_entry`.  Returns whether an entry was removed.
    pub fn remove_entry(&mut self, label: &str) -> bool {
        let folded = lookup::fold(label);
        match self
            .entries
            .iter()
            .position(|e| lookup::raw_equals(e, &folded))
        {
            Some(i) => {
                self.entries.remove(i);
                trace!(label, index = i, "removed entry");
                true
            }
            None => false,
        }
    }

    /// All entries whose **raw** label contains `query`, ignoring case,
    /// in insertion order.
    pub fn search_entries(&self, query: &str) -> Vec<&Entry> {
        let folded = lookup::fold(query);
        self.entries
            .iter()
            .filter(|e| lookup::raw_contains(e, &folded))
            .collect()
    }

    /// Replace the entry `get_entry(label)` would return, keeping its
    /// position.  Returns whether an entry was replaced.
    pub fn replace_entry(&mut self, label: &str, replacement: Entry) -> bool {
        match lookup::find_best(&self.entries, label) {
            Some(i) => {
                self.entries[i] = replacement;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the vault has been created or loaded.
    pub fn state(&self) -> VaultState {
        self.state
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the vault holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_with(labels: &[&str]) -> Vault {
        let mut vault = Vault::new("unused.dotp");
        for label in labels {
            vault.add_entry(Entry::new(*label, "SECRET"));
        }
        vault
    }

    #[test]
    fn new_vault_is_unloaded_and_empty() {
        let vault = Vault::new("unused.dotp");
        assert_eq!(vault.state(), VaultState::Unloaded);
        assert!(vault.is_empty());
        assert!(vault.list_entries().is_empty());
    }

    #[test]
    fn exact_match_wins_over_prefix() {
        let vault = vault_with(&["GitHub: work", "GitHub"]);
        assert_eq!(vault.get_entry("GitHub").unwrap().label, "GitHub");
    }

    #[test]
    fn prefix_fallback() {
        let vault = vault_with(&["GitHub: user@example.com"]);
        assert_eq!(
            vault.get_entry("GitHub").unwrap().label,
            "GitHub: user@example.com"
        );
        assert!(vault.get_entry_exact("GitHub").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let vault = vault_with(&["GitHub"]);
        assert!(vault.get_entry("github").is_some());
        assert!(vault.get_entry_exact("GITHUB").is_some());
    }

    #[test]
    fn lookup_returns_none_without_match() {
        let vault = vault_with(&["GitHub"]);
        assert!(vault.get_entry("GitLab").is_none());
        assert!(vault.get_entry("GitHubX").is_none());
    }

    #[test]
    fn duplicates_are_allowed_and_first_wins() {
        let mut vault = Vault::new("unused.dotp");
        vault.add_entry(Entry::new("Dup", "FIRST"));
        vault.add_entry(Entry::new("dup", "SECOND"));
        assert_eq!(vault.len(), 2);
        assert_eq!(vault.get_entry_exact("DUP").unwrap().secret, "FIRST");
    }

    #[test]
    fn list_entries_is_a_snapshot() {
        let vault = vault_with(&["A"]);
        let mut snapshot = vault.list_entries();
        snapshot.push(Entry::new("B", "S"));
        snapshot[0].label = "changed".into();

        assert_eq!(vault.len(), 1);
        assert_eq!(vault.entries()[0].label, "A");
    }

    #[test]
    fn search_is_raw_substring_in_order() {
        let vault = vault_with(&["GitHub", "GitLab", "Bitbucket"]);
        let labels: Vec<&str> = vault
            .search_entries("git")
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, ["GitHub", "GitLab"]);
    }

    #[test]
    fn remove_is_case_insensitive_and_reports_result() {
        let mut vault = vault_with(&["GitHub"]);
        assert!(vault.remove_entry("github"));
        assert!(vault.is_empty());
        assert!(!vault.remove_entry("github"));
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut vault = vault_with(&["A", "a", "B"]);
        assert!(vault.remove_entry("A"));
        let labels: Vec<String> = vault.list_entries().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["a", "B"]);
    }

    // Lookup decodes percent-escapes but remove and search do not.
    #[test]
    fn raw_and_decoded_matching_differ() {
        let mut vault = vault_with(&["GitHub:%20user@example.com"]);

        assert!(vault.get_entry_exact("GitHub: user@example.com").is_some());
        assert!(vault.search_entries("github: user").is_empty());
        assert_eq!(vault.search_entries("%20user").len(), 1);

        assert!(!vault.remove_entry("GitHub: user@example.com"));
        assert!(vault.remove_entry("github:%20USER@example.com"));
        assert!(vault.is_empty());
    }

    #[test]
    fn replace_entry_keeps_position() {
        let mut vault = vault_with(&["A", "B", "C"]);
        assert!(vault.replace_entry("b", Entry::new("B2", "NEW")));
        let labels: Vec<String> = vault.list_entries().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["A", "B2", "C"]);
        assert!(!vault.replace_entry("zzz", Entry::new("Z", "S")));
    }
}
