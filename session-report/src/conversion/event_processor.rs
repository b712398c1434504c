//! Conversion driver
//!
//! Takes one raw line at a time through normalize → classify → parse, feeds
//! the run-wide state (track names, CPU windows, group matches) and writes
//! the resulting events straight to the output document. Track metadata is
//! only known at the end and is written by [`EventProcessor::finish`].

use super::debug_dump::DebugSnapshot;
use super::phase::{EventType, Mapping};
use crate::analysis::{
    swapper_tid, CpuUsageAggregator, GroupCatalog, MetadataTracker, UsageWindow,
    CPU_CORE_VIEW_PID, CPU_PROCESS_VIEW_PID,
};
use crate::config::{Configuration, RunOptions, ViewSet};
use crate::domain::{ConvertError, Pid, Tid, Timestamp};
use crate::export::trace_event::string_args;
use crate::export::{Phase, TraceEvent, TraceWriter};
use crate::parse::{
    self, Clock, KernelNode, LegacyUserNode, LineKind, NodeHeader, StructuredUserNode, TraceNode,
};
use log::{debug, trace};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;

/// Value of the fixed-scale reference counters written with the metadata
const USAGE_REFERENCE_MAX: f64 = 100.0;

const CPU_CORE_VIEW_LABEL: &str = "[CUSTOM] CPU usages/core";
const CPU_PROCESS_VIEW_LABEL: &str = "[CUSTOM] CPU usages/ps";

/// Counters for one conversion run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub lines_read: usize,
    pub blank_skipped: usize,
    pub auxiliary_skipped: usize,
    pub kernel_nodes: usize,
    pub legacy_nodes: usize,
    pub structured_nodes: usize,
    /// User nodes dropped by an ignore rule
    pub ignored_nodes: usize,
    pub unknown_event_types: usize,
    /// User lines carrying the kernel marker in their payload
    pub rerouted_user_lines: usize,
    /// Everything in `traceEvents`, metadata included
    pub events_written: usize,
    /// Closed CPU usage windows
    pub cpu_samples: usize,
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines ({} kernel, {} user, {} structured user, {} auxiliary, {} blank), \
             {} ignored, {} unknown type, {} rerouted, {} events written, {} CPU samples",
            self.lines_read,
            self.kernel_nodes,
            self.legacy_nodes,
            self.structured_nodes,
            self.auxiliary_skipped,
            self.blank_skipped,
            self.ignored_nodes,
            self.unknown_event_types,
            self.rerouted_user_lines,
            self.events_written,
            self.cpu_samples
        )
    }
}

/// Parsed nodes kept for the debug dumps
#[derive(Debug, Default, Clone)]
pub struct RetainedNodes {
    pub legacy: Vec<LegacyUserNode>,
    pub structured: Vec<StructuredUserNode>,
    pub kernel: Vec<KernelNode>,
}

/// Result of a finished run
pub struct ProcessorOutput<W> {
    pub summary: ConversionSummary,
    /// The flushed output writer
    pub output: W,
    /// Present when node retention was requested
    pub snapshot: Option<DebugSnapshot>,
}

pub struct EventProcessor<'a, W: Write> {
    config: &'a Configuration,
    views: ViewSet,
    /// `-p` allow-list; `None` lets every process through
    processes: Option<BTreeSet<String>>,
    clock: Clock,
    metadata: MetadataTracker,
    cpu: CpuUsageAggregator,
    groups: GroupCatalog,
    writer: TraceWriter<W>,
    summary: ConversionSummary,
    retained: Option<RetainedNodes>,
}

impl<'a, W: Write> EventProcessor<'a, W> {
    /// Validate the run options against `config` and write the document header
    pub fn new(config: &'a Configuration, options: &RunOptions, output: W) -> Result<Self, ConvertError> {
        let views = options.resolve_views(config)?;
        let period = options.cpu_period_micros()?;
        debug!(
            "views: user={} group={} cpu={}, period {period}us, {} cores, boot time {:?}",
            views.user, views.group, views.cpu, options.core_count, options.boot_time
        );

        let groups = if views.group {
            GroupCatalog::from_config(config)
        } else {
            GroupCatalog::default()
        };
        for entry in groups.entries() {
            debug!(
                "group {} entry {}: {} / {} → {}",
                entry.group, entry.tid, entry.process, entry.physical, entry.logical
            );
        }

        Ok(Self {
            config,
            views,
            processes: options.processes.as_ref().map(|p| p.iter().cloned().collect()),
            clock: Clock::new(options.boot_time),
            metadata: MetadataTracker::new(),
            cpu: CpuUsageAggregator::new(options.core_count, period),
            groups,
            writer: TraceWriter::new(output)?,
            summary: ConversionSummary::default(),
            retained: options.retain_nodes.then(RetainedNodes::default),
        })
    }

    /// Convert one input line; `line_no` is 1-based and only used in errors
    pub fn process_line(&mut self, line_no: usize, raw: &str) -> Result<(), ConvertError> {
        self.summary.lines_read += 1;

        let line = parse::normalize_line(raw);
        if line.trim().is_empty() {
            self.summary.blank_skipped += 1;
            return Ok(());
        }
        if parse::is_auxiliary(&line) {
            self.summary.auxiliary_skipped += 1;
            return Ok(());
        }

        let tokens = parse::tokenize(&line);
        let mut kind = parse::classify(&line);
        if kind == LineKind::Kernel && !parse::is_sched_switch(&tokens) {
            debug!("line {line_no}: sched_switch mentioned outside a kernel record, read as user event");
            self.summary.rerouted_user_lines += 1;
            kind = parse::classify_user(&line);
        }
        let node = TraceNode::parse(kind, &tokens, &self.clock)
            .map_err(|source| ConvertError::MalformedLine { line: line_no, source })?;
        trace!("line {line_no}: {node}");

        match node {
            TraceNode::Kernel(node) => self.handle_kernel(line_no, node),
            TraceNode::LegacyUser(node) => self.handle_legacy(node),
            TraceNode::StructuredUser(node) => self.handle_structured(node),
        }
    }

    /// Write track metadata, close the document and hand back the results
    pub fn finish(mut self) -> Result<ProcessorOutput<W>, ConvertError> {
        let metadata = self.metadata_events();
        self.writer.write_all(&metadata)?;

        self.summary.events_written = self.writer.written();
        let output = self.writer.finish()?;
        let snapshot = self.retained.map(|nodes| DebugSnapshot {
            nodes,
            metadata: self.metadata,
            groups: self.groups,
        });

        Ok(ProcessorOutput {
            summary: self.summary,
            output,
            snapshot,
        })
    }

    fn is_selected(&self, process_name: &str) -> bool {
        self.processes
            .as_ref()
            .map_or(true, |allowed| allowed.contains(process_name))
    }

    fn write(&mut self, event: &TraceEvent) -> Result<(), ConvertError> {
        self.writer.write_event(event)
    }

    // ---------------------------------------------------------------------
    // Kernel scheduler switches → CPU views
    // ---------------------------------------------------------------------

    fn handle_kernel(&mut self, line_no: usize, node: KernelNode) -> Result<(), ConvertError> {
        self.summary.kernel_nodes += 1;
        if !self.views.cpu {
            debug!("line {line_no}: CPU view disabled, sched_switch skipped");
            return Ok(());
        }

        let header = &node.header;
        let now = header.timestamp;
        self.metadata
            .register(&header.process_name, header.process_id, header.thread_id);
        self.cpu.observe(now);

        let args = string_args([("cpu_id", header.cpu.as_str())]);

        let prev = header.process_name.as_str();
        if swapper_tid(prev).is_none() {
            if self.is_selected(prev) {
                let event =
                    TraceEvent::new("cpu", Phase::End, prev, CPU_PROCESS_VIEW_PID, header.thread_id, now)
                        .with_args(args.clone());
                self.write(&event)?;
            }
            self.cpu.switch_out(header.thread_id, now);
        }

        let next = node.next_comm();
        if swapper_tid(next).is_none() {
            let next_tid = node
                .next_tid()
                .map_err(|source| ConvertError::MalformedLine { line: line_no, source })?;
            if self.is_selected(next) {
                let event = TraceEvent::new("cpu", Phase::Begin, next, CPU_PROCESS_VIEW_PID, next_tid, now)
                    .with_args(args);
                self.write(&event)?;
            }
            self.cpu.switch_in(next_tid, header.cpu_id, now);
        }

        if let Some(window) = self.cpu.roll_window(now) {
            self.write_usage(&window)?;
        }

        if let Some(retained) = &mut self.retained {
            retained.kernel.push(node);
        }
        Ok(())
    }

    fn write_usage(&mut self, window: &UsageWindow) -> Result<(), ConvertError> {
        for (core, value) in window.per_core.iter().enumerate() {
            let event = TraceEvent::counter(
                format!("Core #{core}"),
                CPU_CORE_VIEW_PID,
                core_tid(core),
                window.end,
                *value,
            );
            self.write(&event)?;
        }
        let total = TraceEvent::counter(
            "Total",
            CPU_CORE_VIEW_PID,
            core_tid(window.per_core.len()),
            window.end,
            window.total,
        );
        self.write(&total)?;
        self.summary.cpu_samples += 1;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // User events → user and group views
    // ---------------------------------------------------------------------

    /// Register the node's names; false when an ignore rule drops it
    fn admit(&mut self, header: &NodeHeader) -> bool {
        self.metadata
            .register(&header.process_name, header.process_id, header.thread_id);
        if self.config.is_valid_event(&header.process_name, &header.provider) {
            return true;
        }
        debug!(
            "ignored {}:{} from {}",
            header.provider, header.event_type, header.process_name
        );
        self.summary.ignored_nodes += 1;
        false
    }

    /// Event type of an admitted node, `None` (logged, counted) when unknown
    /// or when the process is filtered out
    fn resolve_type(&mut self, kind: LineKind, header: &NodeHeader) -> Option<EventType> {
        match EventType::for_line(kind, &header.event_type) {
            Ok(event_type) => self.is_selected(&header.process_name).then_some(event_type),
            Err(e) => {
                debug!("{} event from {}: {e}", kind.as_str(), header.process_name);
                self.summary.unknown_event_types += 1;
                None
            }
        }
    }

    fn handle_legacy(&mut self, node: LegacyUserNode) -> Result<(), ConvertError> {
        self.summary.legacy_nodes += 1;
        if !self.admit(&node.header) {
            return Ok(());
        }

        if let Some(event_type) = self.resolve_type(LineKind::LegacyUser, &node.header) {
            let header = &node.header;
            let args = legacy_args(&node);

            if self.views.user {
                if let Mapping::Emit(ph) = event_type.user_view() {
                    let event = TraceEvent::new(
                        "all",
                        ph,
                        &node.signal,
                        header.process_id,
                        header.thread_id,
                        header.timestamp,
                    )
                    .with_args(args.clone());
                    self.write(&event)?;
                }
            }
            if self.views.group {
                if let Mapping::Emit(ph) = event_type.group_view() {
                    self.write_group(header, &node.signal, ph, &args)?;
                }
            }
        }

        if let Some(retained) = &mut self.retained {
            retained.legacy.push(node);
        }
        Ok(())
    }

    fn handle_structured(&mut self, node: StructuredUserNode) -> Result<(), ConvertError> {
        self.summary.structured_nodes += 1;
        if !self.admit(&node.header) {
            return Ok(());
        }

        if let Some(event_type) = self.resolve_type(LineKind::StructuredUser, &node.header) {
            let header = &node.header;
            let args: Map<String, JsonValue> = string_args(
                node.user_payload().map(|(k, v)| (k.as_str(), v.as_str())),
            );

            if self.views.user {
                match event_type.user_view() {
                    Mapping::Emit(ph) => {
                        let name = if event_type == EventType::Log {
                            node.category()
                        } else {
                            node.name()
                        };
                        let event = TraceEvent::new(
                            node.category(),
                            ph,
                            name,
                            header.process_id,
                            header.thread_id,
                            header.timestamp,
                        )
                        .with_args(args.clone());
                        self.write(&event)?;
                    }
                    Mapping::Marker => self.write_marker(&node)?,
                    Mapping::Skip => {}
                }
            }
            if self.views.group {
                if let Mapping::Emit(ph) = event_type.group_view() {
                    self.write_group(header, node.name(), ph, &args)?;
                }
            }
        }

        if let Some(retained) = &mut self.retained {
            retained.structured.push(node);
        }
        Ok(())
    }

    /// Async object lifetime (N/O/D, id = tid) plus a global instant
    fn write_marker(&mut self, node: &StructuredUserNode) -> Result<(), ConvertError> {
        let header = &node.header;
        let at = |ph| {
            TraceEvent::new(
                node.category(),
                ph,
                node.name(),
                header.process_id,
                header.thread_id,
                header.timestamp,
            )
        };

        let snapshot = string_args(header.payload.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let mut step_args = Map::new();
        step_args.insert("snapshot".to_string(), JsonValue::Object(snapshot));

        let id = header.thread_id.0;
        let events = [
            at(Phase::AsyncBegin).with_id(id),
            at(Phase::AsyncStep).with_id(id).with_args(step_args),
            at(Phase::AsyncEnd).with_id(id),
            at(Phase::Instant).with_scope("g"),
        ];
        self.writer.write_all(&events)
    }

    /// Duplicate an event onto every group track whose entry matches
    fn write_group(
        &mut self,
        header: &NodeHeader,
        physical: &str,
        ph: Phase,
        args: &Map<String, JsonValue>,
    ) -> Result<(), ConvertError> {
        let tracks: Vec<(Pid, Tid)> = self
            .groups
            .matches(&header.process_name, physical)
            .map(|(group, entry)| (group.pid, entry.tid))
            .collect();

        for (pid, tid) in tracks {
            let event = TraceEvent::new("group", ph, physical, pid, tid, header.timestamp)
                .with_args(args.clone());
            self.write(&event)?;
            self.groups.record_match(&header.process_name, physical);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // End-of-run track metadata
    // ---------------------------------------------------------------------

    fn metadata_events(&self) -> Vec<TraceEvent> {
        let mut events = Vec::new();

        if self.views.user {
            for (pid, name) in self.metadata.process_names() {
                events.push(TraceEvent::process_name(pid, name));
            }
            for (pid, tid, label) in self.metadata.labelled_threads() {
                events.push(TraceEvent::thread_name(pid, tid, label));
            }
        }

        if self.views.cpu {
            let cores = self.cpu.core_count();
            events.push(TraceEvent::process_name(CPU_CORE_VIEW_PID, CPU_CORE_VIEW_LABEL));
            for core in 0..cores {
                events.push(TraceEvent::thread_name(
                    CPU_CORE_VIEW_PID,
                    core_tid(core),
                    format!("Core #{core}"),
                ));
            }
            events.push(TraceEvent::thread_name(CPU_CORE_VIEW_PID, core_tid(cores), "Total"));

            let reference_ts: Timestamp = self.cpu.window_end();
            for core in 0..cores {
                events.push(TraceEvent::counter(
                    format!("Core #{core}"),
                    CPU_CORE_VIEW_PID,
                    core_tid(core),
                    reference_ts,
                    USAGE_REFERENCE_MAX,
                ));
            }
            events.push(TraceEvent::counter(
                "Total",
                CPU_CORE_VIEW_PID,
                core_tid(cores),
                reference_ts,
                USAGE_REFERENCE_MAX,
            ));

            events.push(TraceEvent::process_name(CPU_PROCESS_VIEW_PID, CPU_PROCESS_VIEW_LABEL));
            for (_, tid, label) in self.metadata.labelled_threads() {
                events.push(TraceEvent::thread_name(CPU_PROCESS_VIEW_PID, tid, label));
            }
        }

        if self.views.group {
            for group in self.groups.groups() {
                events.push(TraceEvent::process_name(group.pid, format!("[CUSTOM] {}", group.name)));
            }
            for (pid, entry) in self.groups.observed_entries() {
                events.push(TraceEvent::thread_name(pid, entry.tid, entry.logical.clone()));
            }
        }

        events
    }
}

fn core_tid(core: usize) -> Tid {
    Tid(i64::try_from(core).unwrap_or(i64::MAX))
}

/// Header fields (non-empty ones) followed by every payload pair
fn legacy_args(node: &LegacyUserNode) -> Map<String, JsonValue> {
    let header = &node.header;
    let pid = header.process_id.0.to_string();
    let tid = header.thread_id.0.to_string();
    let fields = [
        ("hostname", header.hostname.as_str()),
        ("provider", header.provider.as_str()),
        ("process name", header.process_name.as_str()),
        ("pid", pid.as_str()),
        ("tid", tid.as_str()),
        ("cpu_id", header.cpu.as_str()),
        ("signal", node.signal.as_str()),
    ];

    let mut args = string_args(fields.into_iter().filter(|(_, value)| !value.is_empty()));
    for (key, value) in &header.payload {
        args.insert(key.clone(), JsonValue::String(value.clone()));
    }
    args
}
