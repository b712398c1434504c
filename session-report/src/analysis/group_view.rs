//! Group view correlation
//!
//! Each enabled group in the configuration becomes a synthetic process
//! track (`-3`, `-4`, ... in configuration order), and each of its events a
//! synthetic thread (`0`, `1`, ... across all enabled groups). A user event
//! lands on an entry's track when its process name and physical signal
//! match.

use super::GROUP_VIEW_PID_BASE;
use crate::config::Configuration;
use crate::domain::{Pid, Tid};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTrack {
    pub name: String,
    pub pid: Pid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub group: String,
    pub process: String,
    pub physical: String,
    pub logical: String,
    pub tid: Tid,
}

#[derive(Debug, Default, Clone)]
pub struct GroupCatalog {
    groups: Vec<GroupTrack>,
    entries: Vec<GroupEntry>,
    /// `(process, physical)` pairs that produced at least one group event
    observed: BTreeSet<(String, String)>,
}

impl GroupCatalog {
    pub fn from_config(config: &Configuration) -> Self {
        let mut catalog = Self::default();
        let mut next_tid = 0;

        for (index, group) in config.enabled_groups().enumerate() {
            let offset = i64::try_from(index).unwrap_or(i64::MAX);
            catalog.groups.push(GroupTrack {
                name: group.name.clone(),
                pid: Pid(GROUP_VIEW_PID_BASE.0.saturating_sub(offset)),
            });
            for event in &group.events {
                catalog.entries.push(GroupEntry {
                    group: group.name.clone(),
                    process: event.process.clone(),
                    physical: event.physical.clone(),
                    logical: event.logical.clone(),
                    tid: Tid(next_tid),
                });
                next_tid += 1;
            }
        }
        catalog
    }

    pub fn groups(&self) -> &[GroupTrack] {
        &self.groups
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    /// First matching entry of every group, in group order. Spaces in the
    /// observed signal are ignored.
    pub fn matches<'a>(
        &'a self,
        process: &'a str,
        physical: &str,
    ) -> impl Iterator<Item = (&'a GroupTrack, &'a GroupEntry)> + 'a {
        let physical: String = physical.chars().filter(|c| *c != ' ').collect();
        self.groups.iter().filter_map(move |group| {
            self.entries
                .iter()
                .find(|entry| {
                    entry.group == group.name
                        && entry.process == process
                        && entry.physical == physical
                })
                .map(|entry| (group, entry))
        })
    }

    pub fn record_match(&mut self, process: &str, physical: &str) {
        let physical: String = physical.chars().filter(|c| *c != ' ').collect();
        self.observed.insert((process.to_string(), physical));
    }

    /// Group pid of `name`
    pub fn group_pid(&self, name: &str) -> Option<Pid> {
        self.groups.iter().find(|g| g.name == name).map(|g| g.pid)
    }

    /// Entries that matched at least once, with their group pid
    pub fn observed_entries(&self) -> impl Iterator<Item = (Pid, &GroupEntry)> {
        self.entries.iter().filter_map(|entry| {
            let key = (entry.process.clone(), entry.physical.clone());
            if !self.observed.contains(&key) {
                return None;
            }
            self.group_pid(&entry.group).map(|pid| (pid, entry))
        })
    }
}
