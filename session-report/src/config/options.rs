//! Run-time options handed to the converter by the command-line layer

use clap::ValueEnum;
use std::path::PathBuf;

use super::Configuration;
use crate::domain::ConvertError;

/// Default CPU usage sampling period (10 ms)
pub const DEFAULT_CPU_PERIOD_MS: u64 = 10;

const CPU_PERIOD_RANGE_MS: std::ops::RangeInclusive<u64> = 1..=1000;

/// A selectable output view
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Every user-space event on its real process/thread track
    User,
    /// Configured signals collected onto synthetic group tracks
    Group,
    /// Scheduler activity and per-core usage counters
    Cpu,
}

/// Set of enabled views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSet {
    pub user: bool,
    pub group: bool,
    pub cpu: bool,
}

impl ViewSet {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            user: config.user_view.enable,
            group: config.group_view.enable,
            cpu: config.cpu_view.enable,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.user || self.group || self.cpu)
    }
}

impl FromIterator<View> for ViewSet {
    fn from_iter<I: IntoIterator<Item = View>>(iter: I) -> Self {
        let mut set = ViewSet::default();
        for view in iter {
            match view {
                View::User => set.user = true,
                View::Group => set.group = true,
                View::Cpu => set.cpu = true,
            }
        }
        set
    }
}

/// Options for one conversion run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Boot time in seconds; only set when it is known to match the trace
    pub boot_time: Option<u64>,
    /// Overrides the views enabled in the config file
    pub views: Option<ViewSet>,
    /// Only emit events of these processes
    pub processes: Option<Vec<String>>,
    pub cpu_period_ms: u64,
    pub core_count: usize,
    /// Keep every parsed node in memory for the post-run dumps
    pub retain_nodes: bool,
    pub dump_dir: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            boot_time: None,
            views: None,
            processes: None,
            cpu_period_ms: DEFAULT_CPU_PERIOD_MS,
            core_count: 1,
            retain_nodes: false,
            dump_dir: None,
        }
    }

    /// Views to render: the override if present, otherwise the config's
    pub fn resolve_views(&self, config: &Configuration) -> Result<ViewSet, ConvertError> {
        let views = self.views.unwrap_or_else(|| ViewSet::from_config(config));
        if views.is_empty() {
            return Err(ConvertError::NoActiveView);
        }
        Ok(views)
    }

    /// CPU sampling period in microseconds
    pub fn cpu_period_micros(&self) -> Result<u64, ConvertError> {
        if !CPU_PERIOD_RANGE_MS.contains(&self.cpu_period_ms) {
            return Err(ConvertError::InvalidPeriod(self.cpu_period_ms));
        }
        Ok(self.cpu_period_ms * 1_000)
    }
}
