//! Command-line interface

pub mod args;

pub use args::{Args, DEFAULT_CONFIG_FILE, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
