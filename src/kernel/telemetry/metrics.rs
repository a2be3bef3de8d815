use std::collections::VecDeque;

use super::event::TelemetryEvent;
use crate::kernel::event::{CallDirection, SignalKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub signal_stats: SignalStats,
    pub call_stats: CallStats,
    pub delivery_stats: DeliveryStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalStats {
    pub ringing: u64,
    pub offhook: u64,
    pub idle: u64,
    pub duplicates: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallStats {
    pub incoming_ended: u64,
    pub outgoing_ended: u64,
    pub unanswered_idles: u64,
    pub debounced_ends: u64,
    pub min_echo_gap_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryStats {
    pub sink_failures: u64,
    pub recordings_found: u64,
    pub recordings_missing: u64,
}

impl CallStats {
    pub fn total_ended(&self) -> u64 {
        self.incoming_ended + self.outgoing_ended
    }
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::SignalObserved { kind } => match kind {
                SignalKind::Ringing => snap.signal_stats.ringing += 1,
                SignalKind::OffHook => snap.signal_stats.offhook += 1,
                SignalKind::Idle => snap.signal_stats.idle += 1,
            },
            TelemetryEvent::DuplicateSuppressed { .. } => {
                snap.signal_stats.duplicates += 1;
            }
            TelemetryEvent::UnansweredIdle => {
                snap.call_stats.unanswered_idles += 1;
            }
            TelemetryEvent::EndDebounced { since_last_ms } => {
                snap.call_stats.debounced_ends += 1;
                let gap = match snap.call_stats.min_echo_gap_ms {
                    Some(min) => min.min(*since_last_ms),
                    None => *since_last_ms,
                };
                snap.call_stats.min_echo_gap_ms = Some(gap);
            }
            TelemetryEvent::CallEnded { direction } => match direction {
                CallDirection::Incoming => snap.call_stats.incoming_ended += 1,
                CallDirection::Outgoing => snap.call_stats.outgoing_ended += 1,
            },
            TelemetryEvent::SinkFailed => {
                snap.delivery_stats.sink_failures += 1;
            }
            TelemetryEvent::RecordingLocated { found } => {
                if *found {
                    snap.delivery_stats.recordings_found += 1;
                } else {
                    snap.delivery_stats.recordings_missing += 1;
                }
            }
        }
    }

    snap
}
