use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use super::event::RawSignal;
use crate::error::{Error, Result};

/// Producer side of the signal channel. Clone one per platform callback.
#[derive(Debug, Clone)]
pub struct SignalSource {
    tx: mpsc::Sender<RawSignal>,
}

impl SignalSource {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RawSignal>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Waits for room in the channel.
    pub async fn send(&self, signal: RawSignal) -> Result<()> {
        self.tx.send(signal).await.map_err(|_| Error::SourceClosed)
    }

    /// For producers on plain threads. Must not be called from async context.
    pub fn blocking_send(&self, signal: RawSignal) -> Result<()> {
        self.tx.blocking_send(signal).map_err(|_| Error::SourceClosed)
    }

    /// Non-blocking variant for platform callbacks. Drops the signal when full or closed.
    pub fn try_send(&self, signal: RawSignal) -> bool {
        match self.tx.try_send(signal) {
            Ok(()) => true,
            Err(TrySendError::Full(signal)) => {
                warn!(kind = %signal.kind, "signal channel full, dropping");
                false
            }
            Err(TrySendError::Closed(signal)) => {
                warn!(kind = %signal.kind, "signal channel closed, dropping");
                false
            }
        }
    }
}
