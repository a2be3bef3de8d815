use std::sync::Arc;

use tracing::{debug, info};

use super::event::{DerivedEvent, RawSignal, SignalKind};
use super::state::{StateDelta, TrackerState};
use super::time::{Clock, SystemClock, Timestamp};
use crate::config::TrackerConfig;

/// Why a signal did or did not produce an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Same kind as the previous signal. Nothing changed.
    Duplicate(SignalKind),
    RingingCaptured,
    OffHook,
    /// Idle without a prior off-hook: missed ring or spurious idle.
    UnansweredIdle,
    /// Idle inside the debounce window of the last emitted end.
    Debounced { since_last_ms: u64 },
    Ended(DerivedEvent),
}

impl Classification {
    pub fn into_event(self) -> Option<DerivedEvent> {
        match self {
            Classification::Ended(event) => Some(event),
            _ => None,
        }
    }
}

/// Turns the raw telephony stream into at most one end event per call.
///
/// Two guards run in sequence: raw-kind equality dedup against re-delivered
/// notifications, then a time window on emitted ends against double `IDLE`s
/// for one physical hang-up.
///
/// Not synchronized. Callers serialize `handle_signal`.
pub struct CallStateTracker {
    state: TrackerState,
    clock: Arc<dyn Clock>,
    config: TrackerConfig,
}

impl CallStateTracker {
    pub fn new(clock: Arc<dyn Clock>, config: TrackerConfig) -> Self {
        Self {
            state: TrackerState::new(),
            clock,
            config,
        }
    }

    /// Tracker on the real monotonic clock with default policy.
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock::new()), TrackerConfig::default())
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn handle_signal(&mut self, signal: RawSignal) -> Option<DerivedEvent> {
        self.classify(signal).into_event()
    }

    pub fn classify(&mut self, signal: RawSignal) -> Classification {
        if self.state.last_raw_kind == Some(signal.kind) {
            debug!(kind = %signal.kind, "duplicate raw signal");
            return Classification::Duplicate(signal.kind);
        }
        self.state.reduce(StateDelta::RawKindSeen(signal.kind));

        match signal.kind {
            SignalKind::Ringing => {
                let number = signal
                    .incoming_number
                    .unwrap_or_else(|| self.config.unknown_caller.clone());
                self.state.reduce(StateDelta::RingingCaptured { number });
                debug!("ringing");
                Classification::RingingCaptured
            }
            SignalKind::OffHook => {
                self.state.reduce(StateDelta::OffHookSeen);
                debug!(incoming = self.state.is_incoming, "off-hook");
                Classification::OffHook
            }
            SignalKind::Idle => self.on_idle(signal.timestamp),
        }
    }

    fn on_idle(&mut self, observed_at: Option<Timestamp>) -> Classification {
        if !self.state.was_offhook {
            debug!("idle without off-hook, no call to end");
            return Classification::UnansweredIdle;
        }

        let now = observed_at.unwrap_or_else(|| self.clock.now());
        if let Some(last) = self.state.last_end_emitted_at {
            let since_last_ms = now.millis_since(last);
            if since_last_ms < self.config.debounce_ms {
                debug!(since_last_ms, "end echo inside debounce window");
                return Classification::Debounced { since_last_ms };
            }
        }

        let event = if self.state.is_incoming {
            DerivedEvent::CallEndedIncoming {
                number: self
                    .state
                    .incoming_number
                    .clone()
                    .unwrap_or_else(|| self.config.unknown_caller.clone()),
            }
        } else {
            DerivedEvent::CallEndedOutgoing
        };
        self.state.reduce(StateDelta::SessionEnded { at: now });
        info!(direction = ?event.direction(), at_ms = now.ms, "call ended");
        Classification::Ended(event)
    }
}
