//! The unposted set: identifiers confirmed absent from the site.
//!
//! Loaded once at run start, consulted by screening, and rewritten once at
//! run end from this run's hits and misses. The file is plain text, one
//! identifier per line, Shift_JIS. An absent file means "empty set" — and
//! reconciliation never writes an empty file, so "no file" stays
//! distinguishable from "empty file" for the next run's existence check.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::sjis;

#[derive(Debug)]
pub struct UnpostedSet {
    path: PathBuf,
    entries: Vec<String>,
    present_on_disk: bool,
}

impl UnpostedSet {
    /// Loads the set from `path`; an absent file yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.exists() {
            let entries = sjis::read_lines(&path)?;
            Ok(Self {
                path,
                entries,
                present_on_disk: true,
            })
        } else {
            Ok(Self {
                path,
                entries: Vec::new(),
                present_on_disk: false,
            })
        }
    }

    /// Whether a persisted file was found at load time.
    #[must_use]
    pub fn was_present(&self) -> bool {
        self.present_on_disk
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|entry| entry == identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes the next persisted set: this run's misses are appended,
    /// anything hit this run is dropped, duplicates collapse to their
    /// first occurrence. Pure; [`Self::persist_reconciled`] does the write.
    #[must_use]
    pub fn reconcile(&self, hits: &[String], misses: &[String]) -> Vec<String> {
        let hit_set: HashSet<&str> = hits.iter().map(String::as_str).collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut merged = Vec::new();
        for identifier in self.entries.iter().chain(misses.iter()) {
            if hit_set.contains(identifier.as_str()) {
                continue;
            }
            if seen.insert(identifier.as_str()) {
                merged.push(identifier.clone());
            }
        }
        merged
    }

    /// Reconciles and persists. Returns `true` if a file was written.
    ///
    /// An empty reconciled set never writes an empty file: if no file
    /// exists the path stays untouched, and if a stale file exists it is
    /// removed — a hit of this run must not survive in the persisted set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written or a stale
    /// file cannot be removed.
    pub fn persist_reconciled(
        &self,
        hits: &[String],
        misses: &[String],
    ) -> Result<bool, StoreError> {
        let merged = self.reconcile(hits, misses);
        if merged.is_empty() {
            if self.present_on_disk && self.path.exists() {
                std::fs::remove_file(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
            }
            return Ok(false);
        }
        let mut text = merged.join("\n");
        text.push('\n');
        sjis::write_string(&self.path, &text)?;
        Ok(true)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(entries: &[&str]) -> UnpostedSet {
        UnpostedSet {
            path: PathBuf::from("unused.csv"),
            entries: entries.iter().map(|s| (*s).to_owned()).collect(),
            present_on_disk: false,
        }
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn absent_file_loads_as_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = UnpostedSet::load(dir.path().join("unposted.csv")).unwrap();
        assert!(set.is_empty());
        assert!(!set.was_present());
    }

    #[test]
    fn reconcile_appends_misses_and_drops_hits() {
        let set = set_with(&["a", "b"]);
        let merged = set.reconcile(&owned(&["b"]), &owned(&["c"]));
        assert_eq!(merged, owned(&["a", "c"]));
    }

    #[test]
    fn reconcile_collapses_duplicates_keeping_first_occurrence() {
        let set = set_with(&["a", "b", "a"]);
        let merged = set.reconcile(&[], &owned(&["b", "c", "c"]));
        assert_eq!(merged, owned(&["a", "b", "c"]));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let set = set_with(&["a", "b"]);
        let hits = owned(&["b"]);
        let misses = owned(&["c", "d"]);

        let once = set.reconcile(&hits, &misses);

        let reloaded = UnpostedSet {
            path: PathBuf::from("unused.csv"),
            entries: once.clone(),
            present_on_disk: true,
        };
        let twice = reloaded.reconcile(&hits, &misses);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_hit_of_this_run_survives_in_the_persisted_set() {
        let set = set_with(&["a", "b", "c"]);
        let hits = owned(&["a", "c"]);
        let merged = set.reconcile(&hits, &owned(&["a"]));
        assert!(!merged.contains(&"a".to_owned()));
        assert!(!merged.contains(&"c".to_owned()));
    }

    #[test]
    fn empty_reconciled_set_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unposted.csv");
        let set = UnpostedSet::load(&path).unwrap();

        let wrote = set.persist_reconciled(&owned(&["a"]), &[]).unwrap();
        assert!(!wrote);
        assert!(!path.exists());
    }

    #[test]
    fn fully_hit_set_removes_the_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unposted.csv");
        std::fs::write(&path, "a\n").unwrap();

        let set = UnpostedSet::load(&path).unwrap();
        let wrote = set.persist_reconciled(&owned(&["a"]), &[]).unwrap();

        assert!(!wrote);
        assert!(!path.exists(), "stale file must not keep a hit identifier");
    }

    #[test]
    fn persisted_set_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unposted.csv");

        let set = UnpostedSet::load(&path).unwrap();
        let wrote = set.persist_reconciled(&[], &owned(&["x", "y"])).unwrap();
        assert!(wrote);

        let reloaded = UnpostedSet::load(&path).unwrap();
        assert!(reloaded.was_present());
        assert!(reloaded.contains("x"));
        assert!(reloaded.contains("y"));
        assert_eq!(reloaded.len(), 2);
    }
}
