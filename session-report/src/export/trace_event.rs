use crate::domain::{Pid, Tid, Timestamp};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Event phase
/// Format: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU/preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    #[serde(rename = "B")]
    Begin,
    #[serde(rename = "E")]
    End,
    #[serde(rename = "I")]
    Instant,
    #[serde(rename = "C")]
    Counter,
    /// Async begin (object created)
    #[serde(rename = "N")]
    AsyncBegin,
    /// Async step (object snapshot)
    #[serde(rename = "O")]
    AsyncStep,
    /// Async end (object destroyed)
    #[serde(rename = "D")]
    AsyncEnd,
    #[serde(rename = "M")]
    Metadata,
}

/// One element of the `traceEvents` array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEvent {
    /// Category for filtering/coloring
    pub cat: String,
    pub pid: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<i64>,
    /// Microseconds, written as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    pub ph: Phase,
    pub name: String,
    /// Async event id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Instant event scope ("g" = global)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, JsonValue>>,
}

impl TraceEvent {
    pub fn new(
        cat: impl Into<String>,
        ph: Phase,
        name: impl Into<String>,
        pid: Pid,
        tid: Tid,
        ts: Timestamp,
    ) -> Self {
        Self {
            cat: cat.into(),
            pid: pid.0,
            tid: Some(tid.0),
            ts: Some(ts.to_string()),
            ph,
            name: name.into(),
            id: None,
            s: None,
            args: None,
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Map<String, JsonValue>) -> Self {
        self.args = Some(args);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.s = Some(scope.to_string());
        self
    }

    /// Counter sample on track `(pid, tid)`
    pub fn counter(name: impl Into<String>, pid: Pid, tid: Tid, ts: Timestamp, value: f64) -> Self {
        let mut args = Map::new();
        args.insert("value".to_string(), JsonValue::from(value));
        Self::new("usage", Phase::Counter, name, pid, tid, ts).with_args(args)
    }

    /// `process_name` metadata record
    pub fn process_name(pid: Pid, label: impl Into<String>) -> Self {
        Self::metadata("process_name", pid, None, label.into())
    }

    /// `thread_name` metadata record
    pub fn thread_name(pid: Pid, tid: Tid, label: impl Into<String>) -> Self {
        Self::metadata("thread_name", pid, Some(tid), label.into())
    }

    fn metadata(kind: &str, pid: Pid, tid: Option<Tid>, label: String) -> Self {
        let mut args = Map::new();
        args.insert("name".to_string(), JsonValue::String(label));
        Self {
            cat: "metadata".to_string(),
            pid: pid.0,
            tid: tid.map(|t| t.0),
            ts: None,
            ph: Phase::Metadata,
            name: kind.to_string(),
            id: None,
            s: None,
            args: Some(args),
        }
    }
}

/// Build a string-valued args object
pub fn string_args<'a, I>(pairs: I) -> Map<String, JsonValue>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
        .collect()
}
