//! Trace export
//!
//! Chrome Trace Event Format output for chrome://tracing, Perfetto and
//! Catapult. Events are streamed as they are produced; nothing is buffered
//! beyond the underlying writer.

pub mod trace_event;
pub mod writer;

pub use trace_event::{Phase, TraceEvent};
pub use writer::TraceWriter;
