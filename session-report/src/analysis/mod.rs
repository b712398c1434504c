//! Run-wide state derived from the node stream
//!
//! Pure bookkeeping, separated from parsing and output: track names for the
//! final metadata records, per-core CPU busy time, and the group catalog.

pub mod cpu_usage;
pub mod group_view;
pub mod metadata;

pub use cpu_usage::{CpuUsageAggregator, UsageWindow};
pub use group_view::{GroupCatalog, GroupEntry, GroupTrack};
pub use metadata::{swapper_tid, MetadataTracker};

use crate::domain::Pid;

/// Track of the per-core utilization counters
pub const CPU_CORE_VIEW_PID: Pid = Pid(-1);
/// Track of the per-process scheduling intervals
pub const CPU_PROCESS_VIEW_PID: Pid = Pid(-2);
/// First synthetic group pid; later groups count down from here
pub const GROUP_VIEW_PID_BASE: Pid = Pid(CPU_PROCESS_VIEW_PID.0 - 1);
