//! Line classification
//!
//! Decides which node kind a raw line becomes. The checks are plain
//! substring searches over the whole line, evaluated in priority order.

/// Substring identifying kernel scheduler-switch records
pub const KERNEL_SCHED_SWITCH: &str = "sched_switch";

/// All three must appear for a line to be a structured pmtrace record
const STRUCTURED_MARKERS: [&str; 3] = ["pmtrace", "cat", "payload"];

/// Binary-layout records emitted by the tracer itself; never converted
const AUXILIARY_MARKERS: [&str; 3] = ["bin_info", "build_id", "debug_link"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Kernel,
    LegacyUser,
    StructuredUser,
}

impl LineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Kernel => "kernel",
            LineKind::LegacyUser => "user",
            LineKind::StructuredUser => "structured user",
        }
    }
}

/// True for lines that are dropped before classification
pub fn is_auxiliary(line: &str) -> bool {
    AUXILIARY_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Classify a (non-auxiliary) line
pub fn classify(line: &str) -> LineKind {
    if line.contains(KERNEL_SCHED_SWITCH) {
        LineKind::Kernel
    } else {
        classify_user(line)
    }
}

/// User dialect of a line, ignoring the kernel marker
pub fn classify_user(line: &str) -> LineKind {
    if STRUCTURED_MARKERS.iter().all(|marker| line.contains(marker)) {
        LineKind::StructuredUser
    } else {
        LineKind::LegacyUser
    }
}

/// True when the provider token really is `sched_switch`. The kernel marker
/// may also show up inside a user event's payload.
pub fn is_sched_switch(tokens: &[&str]) -> bool {
    tokens
        .get(super::MSG_INDEX_PROVIDER_AND_EVENT)
        .and_then(|token| token.split(':').map(str::trim).find(|p| !p.is_empty()))
        == Some(KERNEL_SCHED_SWITCH)
}
