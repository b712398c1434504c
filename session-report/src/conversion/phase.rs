//! Event-type vocabulary and phase mapping
//!
//! | event type                                   | user view | group view |
//! |----------------------------------------------|-----------|------------|
//! | soinfo, touchcoordinate, message, keyValue   | `I`       | `I`        |
//! | before, scope_entry, function_entry, ...     | `B`       | `B`        |
//! | after, scope_exit, function_exit, ...        | `E`       | `E`        |
//! | start, end                                   | skipped   | skipped    |
//! | block_entry / block_exit                     | `B` / `E` | `B` / `E`  |
//! | log                                          | `I`       | skipped    |
//! | marker                                       | `N O D I` | skipped    |

use crate::domain::UnknownEventType;
use crate::export::Phase;
use crate::parse::LineKind;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    // Legacy pmtrace
    SoInfo,
    Start,
    End,
    TouchCoordinate,
    Message,
    KeyValue,
    Before,
    After,
    ScopeEntry,
    ScopeExit,
    FunctionEntry,
    FunctionExit,
    InputChangeFunctionEntry,
    InputChangeFunctionExit,
    // Structured pmtrace
    Log,
    BlockEntry,
    BlockExit,
    Marker,
}

/// What a node turns into on one view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    Skip,
    Emit(Phase),
    /// Async begin/step/end plus a global instant
    Marker,
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "soinfo" => EventType::SoInfo,
            "start" => EventType::Start,
            "end" => EventType::End,
            "touchcoordinate" => EventType::TouchCoordinate,
            "message" => EventType::Message,
            "keyValue" => EventType::KeyValue,
            "before" => EventType::Before,
            "after" => EventType::After,
            "scope_entry" => EventType::ScopeEntry,
            "scope_exit" => EventType::ScopeExit,
            "function_entry" => EventType::FunctionEntry,
            "function_exit" => EventType::FunctionExit,
            "input_change_function_entry" => EventType::InputChangeFunctionEntry,
            "input_change_function_exit" => EventType::InputChangeFunctionExit,
            "log" => EventType::Log,
            "block_entry" => EventType::BlockEntry,
            "block_exit" => EventType::BlockExit,
            "marker" => EventType::Marker,
            other => return Err(UnknownEventType(other.to_string())),
        })
    }
}

impl EventType {
    /// Resolve an event type within the dialect of `kind`. A structured type
    /// on a legacy line (or the reverse) is unknown.
    pub fn for_line(kind: LineKind, raw: &str) -> Result<Self, UnknownEventType> {
        let event_type: EventType = raw.parse()?;
        if event_type.dialect() == kind {
            Ok(event_type)
        } else {
            Err(UnknownEventType(raw.to_string()))
        }
    }

    pub fn dialect(self) -> LineKind {
        match self {
            EventType::Log | EventType::BlockEntry | EventType::BlockExit | EventType::Marker => {
                LineKind::StructuredUser
            }
            _ => LineKind::LegacyUser,
        }
    }

    pub fn user_view(self) -> Mapping {
        match self {
            EventType::Start | EventType::End => Mapping::Skip,
            EventType::Marker => Mapping::Marker,
            EventType::Log => Mapping::Emit(Phase::Instant),
            other => other.interval_mapping(),
        }
    }

    pub fn group_view(self) -> Mapping {
        match self {
            EventType::Start | EventType::End | EventType::Log | EventType::Marker => {
                Mapping::Skip
            }
            other => other.interval_mapping(),
        }
    }

    fn interval_mapping(self) -> Mapping {
        match self {
            EventType::SoInfo
            | EventType::TouchCoordinate
            | EventType::Message
            | EventType::KeyValue
            | EventType::Log => Mapping::Emit(Phase::Instant),
            EventType::Before
            | EventType::ScopeEntry
            | EventType::FunctionEntry
            | EventType::InputChangeFunctionEntry
            | EventType::BlockEntry => Mapping::Emit(Phase::Begin),
            EventType::After
            | EventType::ScopeExit
            | EventType::FunctionExit
            | EventType::InputChangeFunctionExit
            | EventType::BlockExit => Mapping::Emit(Phase::End),
            EventType::Start | EventType::End => Mapping::Skip,
            EventType::Marker => Mapping::Marker,
        }
    }
}
