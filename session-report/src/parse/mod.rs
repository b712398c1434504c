//! Trace line parsing
//!
//! A line of the LTTng text dump is turned into a typed [`TraceNode`] in
//! three steps:
//!
//! 1. [`normalize_line`] + [`tokenize`] split the line into positional tokens
//! 2. [`classify`] picks the node kind from marker substrings; a kernel
//!    marker without the `sched_switch` provider falls back to [`classify_user`]
//! 3. [`TraceNode::parse`] reads the fixed-position fields and hands the
//!    trailing payload text to the kind-specific decoder in [`fields`]
//!
//! ```text
//! [1500000000.123456789] (+0.000001234) host pmtrace:before: { cpu_id = 1 },
//!  { procname = "App", vpid = 100, vtid = 101 }, { scope = "ns::Foo(int)" }
//!  ^0                    ^1              ^2   ^3               ^7
//!                 ^12                ^15          ^18  ^20.. payload
//! ```

pub mod classifier;
pub mod fields;
pub mod node;
pub mod timestamp;

use std::borrow::Cow;

pub use classifier::{classify, classify_user, is_auxiliary, is_sched_switch, LineKind};
pub use node::{KernelNode, LegacyUserNode, NodeHeader, StructuredUserNode, TraceNode};
pub use timestamp::Clock;

pub const MSG_INDEX_TIMESTAMP: usize = 0;
pub const MSG_INDEX_HOSTNAME: usize = 2;
pub const MSG_INDEX_PROVIDER_AND_EVENT: usize = 3;
pub const MSG_INDEX_CPU_ID: usize = 7;
pub const MSG_INDEX_PROCESS_NAME: usize = 12;
pub const MSG_INDEX_PROCESS_ID: usize = 15;
pub const MSG_INDEX_THREAD_ID: usize = 18;
/// Kernel lines carry only a tid, found where user lines keep the pid
pub const MSG_INDEX_KERNEL_THREAD_ID: usize = MSG_INDEX_PROCESS_ID;
pub const MSG_INDEX_MINIMUM_USER: usize = MSG_INDEX_THREAD_ID + 2;
pub const MSG_INDEX_MINIMUM_KERNEL: usize = MSG_INDEX_PROCESS_ID + 2;

/// Strip the line ending and collapse a padded timestamp bracket
/// (`[ 12.3]` → `[12.3]`) so token positions stay fixed.
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.as_bytes().get(1) == Some(&b' ') {
        let mut owned = String::with_capacity(line.len());
        owned.push_str(&line[..1]);
        owned.push_str(&line[2..]);
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(line)
    }
}

/// Split on TAB; the first chunk is further split on whitespace, later
/// chunks are kept whole.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut chunks = line.split('\t').filter(|chunk| !chunk.is_empty());
    let mut tokens: Vec<&str> = match chunks.next() {
        Some(first) => first.split_whitespace().collect(),
        None => Vec::new(),
    };
    tokens.extend(chunks);
    tokens
}
