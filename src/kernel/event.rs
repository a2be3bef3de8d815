use super::time::Timestamp;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Raw telephony state, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    Ringing,
    OffHook,
    Idle,
}

impl SignalKind {
    /// Platform spelling of the state extra.
    pub fn as_platform_str(&self) -> &'static str {
        match self {
            SignalKind::Ringing => "RINGING",
            SignalKind::OffHook => "OFFHOOK",
            SignalKind::Idle => "IDLE",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_platform_str())
    }
}

impl FromStr for SignalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RINGING" => Ok(SignalKind::Ringing),
            "OFFHOOK" => Ok(SignalKind::OffHook),
            "IDLE" => Ok(SignalKind::Idle),
            other => Err(Error::UnknownSignal(other.to_string())),
        }
    }
}

/// One notification from the signal source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignal {
    pub kind: SignalKind,
    pub incoming_number: Option<String>,
    /// Caller-supplied observation time. `None` means "sample the tracker clock".
    pub timestamp: Option<Timestamp>,
}

impl RawSignal {
    pub fn ringing(number: Option<&str>) -> Self {
        Self {
            kind: SignalKind::Ringing,
            incoming_number: normalize_number(number),
            timestamp: None,
        }
    }

    pub fn offhook() -> Self {
        Self {
            kind: SignalKind::OffHook,
            incoming_number: None,
            timestamp: None,
        }
    }

    pub fn idle() -> Self {
        Self {
            kind: SignalKind::Idle,
            incoming_number: None,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds a signal from the platform's state and number extras.
    ///
    /// A missing state is ignored (`Ok(None)`); an unrecognized one is an error.
    /// The number only survives for `RINGING`, and blank numbers count as absent.
    pub fn from_platform(state: Option<&str>, number: Option<&str>) -> Result<Option<Self>> {
        let Some(state) = state else {
            return Ok(None);
        };
        let kind: SignalKind = state.parse()?;
        let signal = match kind {
            SignalKind::Ringing => Self::ringing(number),
            SignalKind::OffHook => Self::offhook(),
            SignalKind::Idle => Self::idle(),
        };
        Ok(Some(signal))
    }
}

fn normalize_number(number: Option<&str>) -> Option<String> {
    number
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Call-lifecycle event derived from the raw stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DerivedEvent {
    CallEndedOutgoing,
    CallEndedIncoming { number: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallDirection {
    Incoming,
    Outgoing,
}

impl DerivedEvent {
    pub fn direction(&self) -> CallDirection {
        match self {
            DerivedEvent::CallEndedOutgoing => CallDirection::Outgoing,
            DerivedEvent::CallEndedIncoming { .. } => CallDirection::Incoming,
        }
    }
}

/// What gets handed to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum Notification {
    CallEnded(DerivedEvent),
    RecordingSaved { path: PathBuf },
}
