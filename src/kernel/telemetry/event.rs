use serde::{Deserialize, Serialize};

use crate::kernel::event::{CallDirection, SignalKind};
use crate::kernel::tracker::Classification;

// Allowed: kinds, directions, durations, counts
// Forbidden: numbers, paths

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    SignalObserved { kind: SignalKind },

    DuplicateSuppressed { kind: SignalKind },

    UnansweredIdle,

    EndDebounced { since_last_ms: u64 },

    CallEnded { direction: CallDirection },

    SinkFailed,

    RecordingLocated { found: bool },
}

impl TelemetryEvent {
    /// Outcome record for a classified signal. `None` for transitions that only arm the session.
    pub fn from_classification(classification: &Classification) -> Option<Self> {
        match classification {
            Classification::Duplicate(kind) => {
                Some(TelemetryEvent::DuplicateSuppressed { kind: *kind })
            }
            Classification::UnansweredIdle => Some(TelemetryEvent::UnansweredIdle),
            Classification::Debounced { since_last_ms } => Some(TelemetryEvent::EndDebounced {
                since_last_ms: *since_last_ms,
            }),
            Classification::Ended(event) => Some(TelemetryEvent::CallEnded {
                direction: event.direction(), // Number STRIPPED
            }),
            Classification::RingingCaptured | Classification::OffHook => None,
        }
    }
}
