//! Identifier input file reader.

use std::path::Path;

use janwatch_core::{InputError, InputRecord};

use crate::error::StoreError;
use crate::sjis;

/// A malformed input line: reported to the caller, never fatal to the file.
#[derive(Debug)]
pub struct LineError {
    /// 1-based line number in the input file.
    pub line_number: usize,
    pub error: InputError,
}

#[derive(Debug)]
pub struct InputFile {
    /// Well-formed records, in file order. Duplicates are kept.
    pub records: Vec<InputRecord>,
    pub line_errors: Vec<LineError>,
}

/// Reads and parses the identifier file (Shift_JIS, comma-separated).
///
/// Blank lines are skipped. Malformed lines are collected into
/// `line_errors` with their 1-based line numbers; parsing always continues
/// to the end of the file.
///
/// # Errors
///
/// Returns [`StoreError::Io`] only when the file itself cannot be read —
/// the fatal-run case.
pub fn read_input_file(path: &Path) -> Result<InputFile, StoreError> {
    let text = sjis::read_to_string(path)?;

    let mut records = Vec::new();
    let mut line_errors = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match InputRecord::parse_line(line) {
            Ok(record) => records.push(record),
            Err(error) => line_errors.push(LineError {
                line_number: index + 1,
                error,
            }),
        }
    }

    Ok(InputFile {
        records,
        line_errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sjis(path: &Path, text: &str) {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(text);
        std::fs::write(path, &bytes).unwrap();
    }

    #[test]
    fn reads_all_three_line_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.csv");
        write_sjis(
            &path,
            "4901234567891\n4901234567890,2099/01/01\n4901234567892,2020/06/01,プラレール S-01\n",
        );

        let file = read_input_file(&path).unwrap();
        assert_eq!(file.records.len(), 3);
        assert!(file.line_errors.is_empty());
        assert_eq!(file.records[0].identifier, "4901234567891");
        assert_eq!(file.records[2].display_name.as_deref(), Some("プラレール S-01"));
    }

    #[test]
    fn malformed_lines_are_reported_with_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.csv");
        write_sjis(&path, "4901234567891\na,b,c,d\n4901234567892\n");

        let file = read_input_file(&path).unwrap();
        assert_eq!(file.records.len(), 2);
        assert_eq!(file.line_errors.len(), 1);
        assert_eq!(file.line_errors[0].line_number, 2);
    }

    #[test]
    fn blank_lines_are_skipped_silently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes.csv");
        write_sjis(&path, "4901234567891\n\n\n4901234567892\n");

        let file = read_input_file(&path).unwrap();
        assert_eq!(file.records.len(), 2);
        assert!(file.line_errors.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_input_file(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
