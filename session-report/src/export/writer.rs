//! Streaming trace document writer
//!
//! Writes `{"displayTimeUnit":"ms","traceEvents":[` up front, then one event
//! per line with the separator placed before every element but the first,
//! then the closing tokens in [`TraceWriter::finish`]. A run that fails
//! before `finish` leaves an unterminated document behind.

use super::TraceEvent;
use crate::domain::ConvertError;
use std::io::Write;

const DOCUMENT_HEADER: &[u8] = br#"{"displayTimeUnit":"ms","traceEvents":["#;
const DOCUMENT_FOOTER: &[u8] = b"\n]}\n";

pub struct TraceWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(mut out: W) -> Result<Self, ConvertError> {
        out.write_all(DOCUMENT_HEADER)?;
        Ok(Self { out, written: 0 })
    }

    pub fn write_event(&mut self, event: &TraceEvent) -> Result<(), ConvertError> {
        let separator: &[u8] = if self.written == 0 { b"\n" } else { b",\n" };
        self.out.write_all(separator)?;
        serde_json::to_writer(&mut self.out, event)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, events: I) -> Result<(), ConvertError>
    where
        I: IntoIterator<Item = &'a TraceEvent>,
    {
        for event in events {
            self.write_event(event)?;
        }
        Ok(())
    }

    /// Number of events written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Close the array and the document, flush, and hand back the writer
    pub fn finish(mut self) -> Result<W, ConvertError> {
        self.out.write_all(DOCUMENT_FOOTER)?;
        self.out.flush()?;
        Ok(self.out)
    }
}
