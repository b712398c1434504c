//! # session-report - LTTng trace log to Chrome trace converter
//!
//! Reads the text dump of an LTTng session (babeltrace output with pmtrace
//! user-space events and kernel `sched_switch` records) and writes a Chrome
//! Trace Event Format document viewable in chrome://tracing, Perfetto or
//! Catapult. Besides re-emitting the user events it reconstructs per-core
//! CPU utilization from the scheduler switches and collects configured
//! signals onto synthetic "group" tracks.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                   lttng.txt (babeltrace text)                    │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │ one line at a time
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  parse: normalize → classify → tokenize → TraceNode              │
//! │         (Kernel | LegacyUser | StructuredUser)                   │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  conversion::EventProcessor                                      │
//! │                                                                  │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐          │
//! │  │   Metadata   │   │  CPU usage   │   │ Group view   │          │
//! │  │   tracker    │   │  windows     │   │  catalog     │          │
//! │  └──────────────┘   └──────────────┘   └──────────────┘          │
//! │            phase mapping (user / group / cpu views)              │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │ TraceEvent stream
//!                                 ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  export::TraceWriter → {"displayTimeUnit":"ms","traceEvents":[]} │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`config`]: JSON configuration (ignore rules, view toggles, groups) and
//!   the run options supplied by the command line
//! - [`parse`]: line normalization, classification and typed trace nodes
//! - [`analysis`]: track names, CPU utilization windows, group correlation
//! - [`conversion`]: the per-line driver, phase mapping, host information
//!   and debug dumps
//! - [`export`]: Chrome trace events and the streaming document writer
//! - [`cli`]: command-line arguments
//! - [`domain`]: core types (Pid, Tid, CpuId, Timestamp) and errors
//!
//! ## Track Layout
//!
//! | pid        | tid                  | content                            |
//! |------------|----------------------|------------------------------------|
//! | real pid   | real tid             | user view events                   |
//! | `-1`       | core index, `cores`  | per-core and total usage counters  |
//! | `-2`       | real tid             | scheduling intervals per thread    |
//! | `-3`, `-4` | `0`, `1`, ...        | group view, one track per signal   |
//!
//! Idle threads (`swapper/N`) are named under the pseudo tid `-1 - N` but
//! never emitted.
//!
//! ## Typical Usage
//!
//! ```bash
//! # Convert the default log captured on this device
//! session-report
//!
//! # Convert a copied log with an explicit config
//! session-report -c conf.json -i lttng.txt -o report.json
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod domain;
pub mod export;
pub mod parse;
pub mod preflight;
