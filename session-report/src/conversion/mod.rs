//! Trace log → Chrome trace conversion
//!
//! [`convert`] works on any reader/writer pair and is what the tests drive;
//! [`run`] opens the files named in [`RunOptions`] and writes the optional
//! debug dumps afterwards.

pub mod debug_dump;
pub mod event_processor;
pub mod host_info;
pub mod phase;

pub use debug_dump::{write_dumps, DebugSnapshot};
pub use event_processor::{ConversionSummary, EventProcessor, ProcessorOutput, RetainedNodes};
pub use phase::{EventType, Mapping};

use crate::config::{Configuration, RunOptions};
use crate::domain::ConvertError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Stream every line of `input` through an [`EventProcessor`]. Invalid
/// UTF-8 is replaced rather than rejected.
pub fn convert<R: BufRead, W: Write>(
    config: &Configuration,
    options: &RunOptions,
    mut input: R,
    output: W,
) -> Result<ProcessorOutput<W>, ConvertError> {
    let mut processor = EventProcessor::new(config, options, output)?;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        processor.process_line(line_no, &String::from_utf8_lossy(&buf))?;
    }

    processor.finish()
}

/// Convert `options.input` into `options.output`
pub fn run(config: &Configuration, options: &RunOptions) -> Result<ConversionSummary, ConvertError> {
    debug!(
        "converting {} → {}",
        options.input.display(),
        options.output.display()
    );
    let input = BufReader::new(File::open(&options.input)?);
    let output = BufWriter::new(File::create(&options.output)?);

    let ProcessorOutput { summary, snapshot, .. } = convert(config, options, input, output)?;

    if let Some(snapshot) = snapshot {
        let dir = options
            .dump_dir
            .as_deref()
            .or_else(|| options.output.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        write_dumps(dir, &snapshot);
    }

    info!("{summary}");
    Ok(summary)
}
