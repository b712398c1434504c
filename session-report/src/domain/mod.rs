//! Domain model
//!
//! Identifier newtypes shared by parsing, analysis and export, and the
//! error types every layer reports through.

pub mod errors;
pub mod types;

pub use types::{CpuId, Pid, Tid, Timestamp};

pub use errors::{ConfigError, ConvertError, ParseError, UnknownEventType};
