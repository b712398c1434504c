//! Path checks run before a conversion
//!
//! Validates the paths of a run before any output is created, with
//! actionable messages for the common mistakes.

use anyhow::{bail, Result};
use std::path::Path;

/// Run all pre-flight checks before converting
pub fn run_preflight_checks(config: &Path, input: &Path, output: &Path) -> Result<()> {
    check_readable_file(config, "Config file")?;
    check_readable_file(input, "Trace log")?;
    check_output_dir(output)?;
    Ok(())
}

fn check_readable_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!(
            "{what} not found: {}\n\n\
             Make sure the path is correct and the file exists.",
            path.display()
        );
    }
    if !path.is_file() {
        bail!("Not a file: {}\n\n{what} must be a regular file.", path.display());
    }
    Ok(())
}

/// The report's directory must already exist; it is not created
fn check_output_dir(output: &Path) -> Result<()> {
    if output.is_dir() {
        bail!(
            "Output path is a directory: {}\n\n\
             -o must name the JSON file to write.",
            output.display()
        );
    }
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => bail!(
            "Output directory not found: {}\n\n\
             Create it first or choose another -o path.",
            dir.display()
        ),
        _ => Ok(()),
    }
}

/// Dump directory for `--debug` runs; must exist when given
pub fn check_dump_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!(
            "Dump directory not found: {}\n\n\
             Create it first or drop --dump-dir.",
            dir.display()
        );
    }
    Ok(())
}
