use super::event::SignalKind;
use super::time::Timestamp;

/// Strict state delta. This is the ONLY way session state mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateDelta {
    RawKindSeen(SignalKind),
    RingingCaptured { number: String },
    OffHookSeen,
    /// End event emitted: stamp the debounce and clear the session.
    SessionEnded { at: Timestamp },
}

/// Per-tracker call session. Starts empty: a fresh process has no call in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerState {
    // Raw dedup
    pub last_raw_kind: Option<SignalKind>,

    // Session flags
    pub was_offhook: bool,
    pub is_incoming: bool,
    pub incoming_number: Option<String>,

    // Debounce
    pub last_end_emitted_at: Option<Timestamp>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, delta: StateDelta) {
        match delta {
            StateDelta::RawKindSeen(kind) => {
                self.last_raw_kind = Some(kind);
            }
            StateDelta::RingingCaptured { number } => {
                self.is_incoming = true;
                self.incoming_number = Some(number);
            }
            StateDelta::OffHookSeen => {
                self.was_offhook = true;
            }
            StateDelta::SessionEnded { at } => {
                self.last_end_emitted_at = Some(at);
                self.was_offhook = false;
                self.is_incoming = false;
                self.incoming_number = None;
            }
        }
    }
}
