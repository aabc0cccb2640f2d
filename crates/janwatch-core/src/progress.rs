//! Progress event schema.
//!
//! Workers publish one of these per notable step; an external subscriber
//! (the interactive front end, or the CLI's log printer) consumes them.
//! Events are immutable values — publishing is fire-and-forget, and ordering
//! across different identifiers is not guaranteed under concurrent
//! strategies. Within one identifier the phase order is always
//! Start → zero-or-more Processing → End, because a single worker owns the
//! identifier end-to-end.
//!
//! These types are serialized across the process boundary, so the serde
//! representation is part of the contract.

use serde::{Deserialize, Serialize};

/// Pseudo-identifier for events about the input file.
pub const INPUT_SCOPE: &str = "input";
/// Pseudo-identifier for events about the unposted-set file.
pub const UNPOSTED_SCOPE: &str = "unposted";
/// Pseudo-identifier for events about the product-code cache file.
pub const CACHE_SCOPE: &str = "product-codes";
/// Pseudo-identifier for events about the output file.
pub const OUTPUT_SCOPE: &str = "output";
/// Pseudo-identifier for run-level events (e.g. the final completion event).
pub const RUN_SCOPE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Exception,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    Processing,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// The identifier this event concerns, or one of the `*_SCOPE` pseudo
    /// identifiers for run-level events.
    pub identifier: String,
    pub message: String,
    pub severity: Severity,
    pub phase: Phase,
}

impl ProgressEvent {
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        phase: Phase,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            message: message.into(),
            severity,
            phase,
        }
    }

    #[must_use]
    pub fn info(identifier: impl Into<String>, message: impl Into<String>, phase: Phase) -> Self {
        Self::new(identifier, message, Severity::Info, phase)
    }

    #[must_use]
    pub fn warning(
        identifier: impl Into<String>,
        message: impl Into<String>,
        phase: Phase,
    ) -> Self {
        Self::new(identifier, message, Severity::Warning, phase)
    }

    #[must_use]
    pub fn error(identifier: impl Into<String>, message: impl Into<String>, phase: Phase) -> Self {
        Self::new(identifier, message, Severity::Error, phase)
    }

    #[must_use]
    pub fn exception(
        identifier: impl Into<String>,
        message: impl Into<String>,
        phase: Phase,
    ) -> Self {
        Self::new(identifier, message, Severity::Exception, phase)
    }
}
