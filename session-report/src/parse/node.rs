//! Typed trace nodes
//!
//! One node per converted line. The three kinds share a [`NodeHeader`] and
//! differ in where their fixed fields sit and how the payload is decoded.

use super::fields;
use super::{
    LineKind, MSG_INDEX_CPU_ID, MSG_INDEX_HOSTNAME, MSG_INDEX_KERNEL_THREAD_ID,
    MSG_INDEX_MINIMUM_KERNEL, MSG_INDEX_MINIMUM_USER, MSG_INDEX_PROCESS_ID,
    MSG_INDEX_PROCESS_NAME, MSG_INDEX_PROVIDER_AND_EVENT, MSG_INDEX_THREAD_ID,
    MSG_INDEX_TIMESTAMP,
};
use crate::domain::{CpuId, ParseError, Pid, Tid, Timestamp};
use crate::parse::Clock;
use std::collections::BTreeMap;
use std::fmt;

/// Value returned for absent payload keys
pub const NO_DATA: &str = "NODATA";

/// Legacy event types whose signal is the event type itself
const SELF_NAMED_EVENTS: [&str; 4] = ["soinfo", "touchcoordinate", "message", "keyValue"];

/// Fields common to every node kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHeader {
    pub raw_timestamp: String,
    pub timestamp: Timestamp,
    pub hostname: String,
    pub provider: String,
    pub event_type: String,
    /// cpu id as printed in the trace
    pub cpu: String,
    pub cpu_id: CpuId,
    pub process_name: String,
    pub process_id: Pid,
    pub thread_id: Tid,
    pub payload: BTreeMap<String, String>,
}

impl NodeHeader {
    /// Payload value for `key`, or [`NO_DATA`]
    pub fn payload(&self, key: &str) -> &str {
        self.payload.get(key).map_or(NO_DATA, String::as_str)
    }

    fn parse(
        tokens: &[&str],
        clock: &Clock,
        pid_index: usize,
        tid_index: usize,
    ) -> Result<Self, ParseError> {
        let raw_timestamp = tokens[MSG_INDEX_TIMESTAMP].to_string();
        let timestamp = clock.normalize(&raw_timestamp)?;

        let (provider, event_type) = split_provider(tokens[MSG_INDEX_PROVIDER_AND_EVENT]);
        let cpu: String = tokens[MSG_INDEX_CPU_ID].chars().filter(|c| *c != ' ').collect();
        let cpu_id = CpuId(parse_number("cpu_id", &cpu)?);

        let process_id = parse_number("process id", &strip_id(tokens[pid_index]))?;
        let thread_id = parse_number("thread id", &strip_id(tokens[tid_index]))?;

        Ok(Self {
            raw_timestamp,
            timestamp,
            hostname: tokens[MSG_INDEX_HOSTNAME]
                .split(':')
                .next()
                .unwrap_or_default()
                .to_string(),
            provider,
            event_type,
            cpu,
            cpu_id,
            process_name: tokens[MSG_INDEX_PROCESS_NAME]
                .chars()
                .filter(|c| !matches!(c, '"' | ','))
                .collect(),
            process_id: Pid(process_id),
            thread_id: Tid(thread_id),
            payload: BTreeMap::new(),
        })
    }
}

impl fmt::Display for NodeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ts({}) host({}) provider({}) type({}) cpu({}) proc({}) pid({}) tid({})",
            self.timestamp,
            self.hostname,
            self.provider,
            self.event_type,
            self.cpu,
            self.process_name,
            self.process_id.0,
            self.thread_id.0
        )
    }
}

fn split_provider(token: &str) -> (String, String) {
    let mut parts = token.split(':').map(str::trim).filter(|p| !p.is_empty());
    let provider = parts.next().unwrap_or_default().to_string();
    let event_type = parts.next().unwrap_or_default().to_string();
    (provider, event_type)
}

fn strip_id(token: &str) -> String {
    token.chars().filter(|c| !matches!(c, ',' | ' ')).collect()
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::BadField {
        field,
        value: value.to_string(),
    })
}

/// Payload text is every token past the fixed fields, space joined
fn payload_text(tokens: &[&str], from: usize) -> String {
    tokens.get(from..).unwrap_or_default().join(" ")
}

fn write_payload(f: &mut fmt::Formatter<'_>, payload: &BTreeMap<String, String>) -> fmt::Result {
    for (key, value) in payload {
        write!(f, "{key}({value}) ")?;
    }
    Ok(())
}

fn check_len(kind: LineKind, tokens: &[&str], required: usize) -> Result<(), ParseError> {
    if tokens.len() < required {
        return Err(ParseError::TooFewTokens {
            kind: kind.as_str(),
            found: tokens.len(),
            required,
        });
    }
    Ok(())
}

/// `sched_switch` record. Kernel lines have no separate pid, so the thread
/// id is used for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelNode {
    pub header: NodeHeader,
}

impl KernelNode {
    pub fn parse(tokens: &[&str], clock: &Clock) -> Result<Self, ParseError> {
        check_len(LineKind::Kernel, tokens, MSG_INDEX_MINIMUM_KERNEL)?;
        let mut header = NodeHeader::parse(
            tokens,
            clock,
            MSG_INDEX_KERNEL_THREAD_ID,
            MSG_INDEX_KERNEL_THREAD_ID,
        )?;
        if header.event_type.is_empty() {
            header.event_type.clone_from(&header.provider);
        }
        header.payload = fields::parse_pairs(&payload_text(tokens, MSG_INDEX_MINIMUM_KERNEL));
        Ok(Self { header })
    }

    /// Process being switched in
    pub fn next_comm(&self) -> &str {
        self.header.payload("next_comm")
    }

    pub fn next_tid(&self) -> Result<Tid, ParseError> {
        let raw = self.header.payload("next_tid");
        parse_number("next_tid", raw).map(Tid)
    }
}

impl fmt::Display for KernelNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        write_payload(f, &self.header.payload)
    }
}

/// Classic pmtrace record (`before`, `scope_entry`, `message`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyUserNode {
    pub header: NodeHeader,
    /// Short name used for event and group matching; empty when the
    /// payload carries none.
    pub signal: String,
}

impl LegacyUserNode {
    pub fn parse(tokens: &[&str], clock: &Clock) -> Result<Self, ParseError> {
        check_len(LineKind::LegacyUser, tokens, MSG_INDEX_MINIMUM_USER)?;
        let mut header =
            NodeHeader::parse(tokens, clock, MSG_INDEX_PROCESS_ID, MSG_INDEX_THREAD_ID)?;
        let (payload, scope_signal) =
            fields::parse_legacy_payload(&payload_text(tokens, MSG_INDEX_MINIMUM_USER));
        header.payload = payload;

        let signal = match scope_signal {
            Some(signal) => signal,
            None if SELF_NAMED_EVENTS.contains(&header.event_type.as_str()) => {
                header.event_type.clone()
            }
            None => String::new(),
        };
        Ok(Self { header, signal })
    }
}

impl fmt::Display for LegacyUserNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} signal({})", self.header, self.signal)?;
        write_payload(f, &self.header.payload)
    }
}

/// pmtrace record with a category, a name and a JSON payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredUserNode {
    pub header: NodeHeader,
}

impl StructuredUserNode {
    pub fn parse(tokens: &[&str], clock: &Clock) -> Result<Self, ParseError> {
        check_len(LineKind::StructuredUser, tokens, MSG_INDEX_MINIMUM_USER)?;
        let mut header =
            NodeHeader::parse(tokens, clock, MSG_INDEX_PROCESS_ID, MSG_INDEX_THREAD_ID)?;
        header.payload =
            fields::parse_structured_payload(&payload_text(tokens, MSG_INDEX_MINIMUM_USER));
        Ok(Self { header })
    }

    pub fn category(&self) -> &str {
        self.header.payload("cat")
    }

    pub fn name(&self) -> &str {
        self.header.payload("name")
    }

    /// Payload without the `cat` and `name` keys
    pub fn user_payload(&self) -> impl Iterator<Item = (&String, &String)> {
        self.header
            .payload
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "cat" | "name"))
    }
}

impl fmt::Display for StructuredUserNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} cat({}) name({})", self.header, self.category(), self.name())?;
        write_payload(f, &self.header.payload)
    }
}

/// A parsed trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceNode {
    Kernel(KernelNode),
    LegacyUser(LegacyUserNode),
    StructuredUser(StructuredUserNode),
}

impl TraceNode {
    pub fn parse(kind: LineKind, tokens: &[&str], clock: &Clock) -> Result<Self, ParseError> {
        Ok(match kind {
            LineKind::Kernel => TraceNode::Kernel(KernelNode::parse(tokens, clock)?),
            LineKind::LegacyUser => TraceNode::LegacyUser(LegacyUserNode::parse(tokens, clock)?),
            LineKind::StructuredUser => {
                TraceNode::StructuredUser(StructuredUserNode::parse(tokens, clock)?)
            }
        })
    }

    pub fn header(&self) -> &NodeHeader {
        match self {
            TraceNode::Kernel(node) => &node.header,
            TraceNode::LegacyUser(node) => &node.header,
            TraceNode::StructuredUser(node) => &node.header,
        }
    }

    pub fn kind(&self) -> LineKind {
        match self {
            TraceNode::Kernel(_) => LineKind::Kernel,
            TraceNode::LegacyUser(_) => LineKind::LegacyUser,
            TraceNode::StructuredUser(_) => LineKind::StructuredUser,
        }
    }
}

impl fmt::Display for TraceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceNode::Kernel(node) => write!(f, "{node}"),
            TraceNode::LegacyUser(node) => write!(f, "{node}"),
            TraceNode::StructuredUser(node) => write!(f, "{node}"),
        }
    }
}
