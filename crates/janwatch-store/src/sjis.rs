//! Shift_JIS line-file primitives.

use std::fs;
use std::io::Write;
use std::path::Path;

use encoding_rs::SHIFT_JIS;

use crate::error::StoreError;

/// Reads a whole file and decodes it from Shift_JIS.
///
/// Undecodable byte sequences are replaced rather than rejected — the
/// legacy files occasionally carry stray bytes and a whole-file failure
/// would be worse than a mangled character.
pub(crate) fn read_to_string(path: &Path) -> Result<String, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let (text, _, _) = SHIFT_JIS.decode(&bytes);
    Ok(text.into_owned())
}

/// Reads a file as Shift_JIS and returns its non-empty lines.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>, StoreError> {
    Ok(read_to_string(path)?
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Encodes `text` as Shift_JIS and writes it, replacing any existing file.
pub(crate) fn write_string(path: &Path, text: &str) -> Result<(), StoreError> {
    let (bytes, _, _) = SHIFT_JIS.encode(text);
    fs::write(path, &bytes).map_err(|e| StoreError::io(path, e))
}

/// Appends one Shift_JIS-encoded line, creating the file if needed.
pub(crate) fn append_line(path: &Path, line: &str) -> Result<(), StoreError> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    let (bytes, _, _) = SHIFT_JIS.encode(line);
    file.write_all(&bytes)
        .and_then(|()| file.write_all(b"\n"))
        .map_err(|e| StoreError::io(path, e))
}
