//! Per-core CPU utilization from scheduler switches
//!
//! Busy time is credited to the core a thread ran on when it is switched
//! out, or when a window boundary is crossed while it is still running.
//! Windows are fixed length; the first one starts at the first switch seen.
//!
//! ```text
//!   window_end - period            window_end
//!        │  tid 55 on core 1          │
//!        │  ├──────────────┤          │  switch-out credits core 1
//!        │            tid 60 on core 0 ├──────  running at boundary: credited
//!        │            ├────────────────┤        up to the crossing switch
//! ```

use crate::domain::{CpuId, Tid, Timestamp};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Utilization of one finished window, percentages in `[0, 100]`
#[derive(Debug, Clone, PartialEq)]
pub struct UsageWindow {
    pub end: Timestamp,
    pub per_core: Vec<f64>,
    pub total: f64,
}

#[derive(Debug)]
pub struct CpuUsageAggregator {
    period_micros: u64,
    /// Busy microseconds per core in the current window, never above the period
    busy: Vec<u64>,
    window_end: Option<Timestamp>,
    /// Threads currently on a core: tid → (core, credited-up-to)
    running: BTreeMap<Tid, (CpuId, Timestamp)>,
}

impl CpuUsageAggregator {
    /// `period_micros` must be non-zero; the caller validates it
    pub fn new(core_count: usize, period_micros: u64) -> Self {
        Self {
            period_micros: period_micros.max(1),
            busy: vec![0; core_count.max(1)],
            window_end: None,
            running: BTreeMap::new(),
        }
    }

    pub fn core_count(&self) -> usize {
        self.busy.len()
    }

    /// End of the current window; zero before the first switch
    pub fn window_end(&self) -> Timestamp {
        self.window_end.unwrap_or_default()
    }

    /// Open the first window at the first observed switch
    pub fn observe(&mut self, now: Timestamp) {
        if self.window_end.is_none() {
            self.window_end = Some(now.add_micros(self.period_micros));
        }
    }

    /// Thread leaves its core: credit the time since it was scheduled
    pub fn switch_out(&mut self, tid: Tid, now: Timestamp) {
        if let Some((cpu, since)) = self.running.remove(&tid) {
            self.credit(cpu, now.micros_since(since));
        }
    }

    /// Thread starts running on `cpu`
    pub fn switch_in(&mut self, tid: Tid, cpu: CpuId, now: Timestamp) {
        if cpu.index() >= self.busy.len() {
            warn!(
                "{cpu} is outside the {} configured cores, {tid} not tracked",
                self.busy.len()
            );
            return;
        }
        if let Some((previous, _)) = self.running.insert(tid, (cpu, now)) {
            debug!("{tid} scheduled on {cpu} while still running on {previous}");
        }
    }

    /// Close the window if `now` reached its end. Threads still running are
    /// credited up to `now` and restart from there in the next window.
    pub fn roll_window(&mut self, now: Timestamp) -> Option<UsageWindow> {
        let end = self.window_end?;
        if end > now {
            return None;
        }

        let running: Vec<(CpuId, u64)> = self
            .running
            .values_mut()
            .map(|(cpu, since)| {
                let elapsed = now.micros_since(*since);
                *since = now;
                (*cpu, elapsed)
            })
            .collect();
        for (cpu, elapsed) in running {
            self.credit(cpu, elapsed);
        }

        let window = self.usage(end);
        self.busy.iter_mut().for_each(|b| *b = 0);
        self.window_end = Some(now.add_micros(self.period_micros));
        Some(window)
    }

    #[allow(clippy::cast_precision_loss)]
    fn usage(&self, end: Timestamp) -> UsageWindow {
        let period = self.period_micros as f64;
        let per_core: Vec<f64> = self
            .busy
            .iter()
            .map(|busy| clamp_percent(*busy as f64 * 100.0 / period))
            .collect();
        let total_busy: u64 = self.busy.iter().sum();
        let total = clamp_percent(total_busy as f64 * 100.0 / period / self.busy.len() as f64);
        UsageWindow { end, per_core, total }
    }

    fn credit(&mut self, cpu: CpuId, micros: u64) {
        let period = self.period_micros;
        if let Some(busy) = self.busy.get_mut(cpu.index()) {
            *busy = busy.saturating_add(micros).min(period);
        } else {
            warn!("busy time for unknown {cpu} dropped");
        }
    }
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
