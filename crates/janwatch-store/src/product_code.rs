//! The product-code cache: identifier → site-internal product code.
//!
//! Rows are `identifier,productCode,resolvedName,isMultiMatch(0/1)`,
//! Shift_JIS, naive-split — commas inside the resolved name are not
//! escaped, matching what the legacy consumers parse.
//!
//! Entries are append-only within a run, and [`ProductCodeCache::record`]
//! appends to the file immediately so a mid-run failure does not lose
//! already-resolved mappings. Once an identifier is present, the resolver
//! skips the name-search path for it in every future run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::sjis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCodeEntry {
    pub identifier: String,
    pub product_code: String,
    pub resolved_name: String,
    /// True when the name search that produced this entry had more than one
    /// result (the first listed result was taken).
    pub is_multi_match: bool,
}

#[derive(Debug)]
pub struct ProductCodeCache {
    path: PathBuf,
    entries: HashMap<String, ProductCodeEntry>,
    present_on_disk: bool,
}

/// Cache file path for a given input file: `<stem>_product_codes.csv`
/// next to the input file.
#[must_use]
pub fn cache_path_for_input(input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("input");
    input_path.with_file_name(format!("{stem}_product_codes.csv"))
}

impl ProductCodeCache {
    /// Loads the cache from `path`; an absent file yields an empty cache.
    /// Malformed rows are skipped with a logged warning.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: HashMap::new(),
                present_on_disk: false,
            });
        }

        let mut entries = HashMap::new();
        for (index, line) in sjis::read_lines(&path)?.into_iter().enumerate() {
            match parse_row(&line) {
                Some(entry) => {
                    // First occurrence wins, like the legacy lookup.
                    entries
                        .entry(entry.identifier.clone())
                        .or_insert(entry);
                }
                None => {
                    tracing::warn!(
                        path = %path.display(),
                        line_number = index + 1,
                        "skipping malformed product-code row"
                    );
                }
            }
        }

        Ok(Self {
            path,
            entries,
            present_on_disk: true,
        })
    }

    /// Whether a persisted file was found at load time.
    #[must_use]
    pub fn was_present(&self) -> bool {
        self.present_on_disk
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&ProductCodeEntry> {
        self.entries.get(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a resolved entry, appending it to the cache file at once.
    /// An identifier that is already cached is left untouched — entries are
    /// never evicted or overwritten during a run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the append fails. The in-memory map is
    /// only updated after the file write succeeds.
    pub fn record(&mut self, entry: ProductCodeEntry) -> Result<(), StoreError> {
        if self.entries.contains_key(&entry.identifier) {
            return Ok(());
        }
        let line = format!(
            "{},{},{},{}",
            entry.identifier,
            entry.product_code,
            entry.resolved_name,
            u8::from(entry.is_multi_match)
        );
        sjis::append_line(&self.path, &line)?;
        self.entries.insert(entry.identifier.clone(), entry);
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_row(line: &str) -> Option<ProductCodeEntry> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [identifier, product_code, resolved_name, is_multi] = fields.as_slice() else {
        return None;
    };
    let is_multi_match = match *is_multi {
        "1" => true,
        "0" => false,
        _ => return None,
    };
    if identifier.is_empty() || product_code.is_empty() {
        return None;
    }
    Some(ProductCodeEntry {
        identifier: (*identifier).to_owned(),
        product_code: (*product_code).to_owned(),
        resolved_name: (*resolved_name).to_owned(),
        is_multi_match,
    })
}
