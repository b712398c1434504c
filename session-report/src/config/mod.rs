//! Session-report configuration
//!
//! The config file is JSON with four required sections:
//!
//! ```json
//! {
//!   "catapultIgnoreEvents": [{ "process": "foo" }, { "provider": "bar" }],
//!   "catapultUserView": { "enable": true },
//!   "catapultGroupView": {
//!     "enable": true,
//!     "groups": [{
//!       "name": "Input",
//!       "enable": true,
//!       "catapultEvents": [{ "process": "A", "physical": "touch", "logical": "Touch" }]
//!     }]
//!   },
//!   "catapultCPUView": { "enable": true }
//! }
//! ```
//!
//! Every required key is checked while loading; a missing key or a value of
//! the wrong type aborts the run. Nothing falls back to a default.

pub mod options;

use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::domain::ConfigError;

pub use options::{RunOptions, View, ViewSet, DEFAULT_CPU_PERIOD_MS};

/// Validated session-report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Events to drop from the user and group views
    #[serde(rename = "catapultIgnoreEvents")]
    pub ignore_events: Vec<IgnoreRule>,

    #[serde(rename = "catapultUserView")]
    pub user_view: ViewToggle,

    #[serde(rename = "catapultGroupView")]
    pub group_view: GroupViewConfig,

    #[serde(rename = "catapultCPUView")]
    pub cpu_view: ViewToggle,
}

/// Ignore rule. A rule with both keys matches only when both match; a rule
/// with neither key matches nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgnoreRule {
    pub process: Option<String>,
    pub provider: Option<String>,
}

impl IgnoreRule {
    fn matches(&self, process: &str, provider: &str) -> bool {
        match (&self.process, &self.provider) {
            (Some(proc_name), Some(prov)) => proc_name == process && prov == provider,
            (Some(proc_name), None) => proc_name == process,
            (None, Some(prov)) => prov == provider,
            (None, None) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewToggle {
    pub enable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupViewConfig {
    pub enable: bool,
    pub groups: Vec<GroupConfig>,
}

/// One logical group of signals collected onto its own synthetic process
#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub enable: bool,
    #[serde(rename = "catapultEvents")]
    pub events: Vec<GroupEventConfig>,
}

/// Maps a signal observed in `process` to a named lane in its group
#[derive(Debug, Clone, Deserialize)]
pub struct GroupEventConfig {
    pub process: String,
    pub physical: String,
    pub logical: String,
}

impl Configuration {
    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data, path)
    }

    /// Parse and validate config text; `origin` is only used in error messages
    pub fn parse(data: &str, origin: &Path) -> Result<Self, ConfigError> {
        let invalid = |source| ConfigError::Invalid { path: origin.to_path_buf(), source };

        let value: serde_json::Value = serde_json::from_str(data).map_err(invalid)?;
        debug!("config {}: {value}", origin.display());

        let config: Configuration = serde_json::from_value(value).map_err(invalid)?;
        config.validate()?;
        Ok(config)
    }

    /// Check constraints the JSON shape alone cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for group in &self.group_view.groups {
            if group.name.is_empty() {
                return Err(ConfigError::Validation(
                    "catapultGroupView.groups[].name must not be empty".to_string(),
                ));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate group name in catapultGroupView.groups: {}",
                    group.name
                )));
            }
        }
        Ok(())
    }

    /// False when an ignore rule matches the process and/or provider
    pub fn is_valid_event(&self, process: &str, provider: &str) -> bool {
        !self.ignore_events.iter().any(|rule| rule.matches(process, provider))
    }

    /// `Some(enable)` for a configured group, `None` for an unknown name
    pub fn is_enabled_group(&self, name: &str) -> Option<bool> {
        self.group_view.groups.iter().find(|g| g.name == name).map(|g| g.enable)
    }

    /// Groups that take part in the group view, in configuration order
    pub fn enabled_groups(&self) -> impl Iterator<Item = &GroupConfig> {
        self.group_view.groups.iter().filter(|g| g.enable)
    }
}
