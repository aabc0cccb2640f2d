//! Input record parsing.
//!
//! The identifier file is line-oriented, comma-separated, and allows three
//! shapes per line:
//!
//! - `identifier`
//! - `identifier,releaseDate`
//! - `identifier,releaseDate,displayName`
//!
//! The release-date column may be empty (meaning "no release date"). Dates
//! are accepted in `2018/04/27` and `2018-04-27` forms — both appear in
//! files produced by the upstream tooling.
//!
//! Parsing here is pure; reading and decoding the file itself lives in
//! `janwatch-store`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// One line of the identifier input file.
///
/// The identifier is the natural key but is not required to be unique;
/// duplicate lines are processed independently downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub identifier: String,
    pub release_date: Option<NaiveDate>,
    pub display_name: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unsupported column count {count} (expected 1, 2, or 3)")]
    UnsupportedColumnCount { count: usize },

    #[error("unparseable release date \"{value}\"")]
    InvalidReleaseDate { value: String },

    #[error("empty identifier")]
    EmptyIdentifier,
}

impl InputRecord {
    /// Parses a single input line into a record.
    ///
    /// Fields are trimmed. An empty release-date column yields `None`; an
    /// empty display-name column yields `None` (the resolver then searches
    /// by identifier instead).
    ///
    /// # Errors
    ///
    /// - [`InputError::UnsupportedColumnCount`] — more than three columns.
    /// - [`InputError::EmptyIdentifier`] — the first column is blank.
    /// - [`InputError::InvalidReleaseDate`] — a non-empty date column that
    ///   matches neither accepted format.
    pub fn parse_line(line: &str) -> Result<Self, InputError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let (identifier, release_date, display_name) = match fields.as_slice() {
            [id] => (*id, None, None),
            [id, date] => (*id, parse_release_date(date)?, None),
            [id, date, name] => (*id, parse_release_date(date)?, non_empty(name)),
            other => {
                return Err(InputError::UnsupportedColumnCount {
                    count: other.len(),
                })
            }
        };

        if identifier.is_empty() {
            return Err(InputError::EmptyIdentifier);
        }

        Ok(Self {
            identifier: identifier.to_owned(),
            release_date,
            display_name,
        })
    }
}

fn parse_release_date(raw: &str) -> Result<Option<NaiveDate>, InputError> {
    if raw.is_empty() {
        return Ok(None);
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(Some(date));
        }
    }
    Err(InputError::InvalidReleaseDate {
        value: raw.to_owned(),
    })
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}
