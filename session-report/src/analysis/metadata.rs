//! Track naming state
//!
//! Every node registers its process name, pid and tid. The maps are
//! last-write-wins: if a tid is reused by another process the final name is
//! the one reported. Kernel idle threads (`swapper/N`) only get a thread
//! entry under their per-core pseudo tid.

use crate::domain::{Pid, Tid};
use std::collections::BTreeMap;

const SWAPPER_PREFIX: &str = "swapper";

/// Pseudo tid for an idle thread name: `swapper/N` → `-1 - N`.
/// `None` for every other name.
pub fn swapper_tid(process_name: &str) -> Option<Tid> {
    let rest = process_name.strip_prefix(SWAPPER_PREFIX)?;
    let core: i64 = rest
        .strip_prefix('/')
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);
    Some(Tid(-1 - core))
}

#[derive(Debug, Default, Clone)]
pub struct MetadataTracker {
    pid_names: BTreeMap<Pid, String>,
    tid_names: BTreeMap<Tid, String>,
    tid_pids: BTreeMap<Tid, Pid>,
}

impl MetadataTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, process_name: &str, pid: Pid, tid: Tid) {
        if let Some(idle) = swapper_tid(process_name) {
            self.tid_names.insert(idle, process_name.to_string());
            return;
        }
        self.pid_names.insert(pid, process_name.to_string());
        self.tid_names.insert(tid, process_name.to_string());
        self.tid_pids.insert(tid, pid);
    }

    pub fn process_names(&self) -> impl Iterator<Item = (Pid, &str)> {
        self.pid_names.iter().map(|(pid, name)| (*pid, name.as_str()))
    }

    pub fn thread_names(&self) -> impl Iterator<Item = (Tid, &str)> {
        self.tid_names.iter().map(|(tid, name)| (*tid, name.as_str()))
    }

    pub fn thread_pids(&self) -> impl Iterator<Item = (Tid, Pid)> + '_ {
        self.tid_pids.iter().map(|(tid, pid)| (*tid, *pid))
    }

    /// Threads with a known owning process, labelled `name(tid)`
    pub fn labelled_threads(&self) -> impl Iterator<Item = (Pid, Tid, String)> + '_ {
        self.tid_names.iter().filter_map(|(tid, name)| {
            self.tid_pids
                .get(tid)
                .map(|pid| (*pid, *tid, format!("{name}({})", tid.0)))
        })
    }
}
