//! Conversion errors
//!
//! Everything except [`UnknownEventType`] is fatal to a conversion run. A
//! failed run leaves the report unterminated.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Syntax error, missing required key or wrong value type
    #[error("Invalid config file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Validation(String),
}

/// A trace line that cannot be turned into a node
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("{kind} line has {found} tokens, at least {required} required")]
    TooFewTokens { kind: &'static str, found: usize, required: usize },

    #[error("Malformed timestamp field: {0:?}")]
    BadTimestamp(String),

    #[error("Malformed {field} field: {value:?}")]
    BadField { field: &'static str, value: String },
}

/// Event type with no phase mapping; the line produces no event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown event type: {0}")]
pub struct UnknownEventType(pub String);

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Malformed trace line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("No view enabled (user, group and cpu are all off)")]
    NoActiveView,

    #[error("CPU usage period must be within 1..=1000 ms, got {0}")]
    InvalidPeriod(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
