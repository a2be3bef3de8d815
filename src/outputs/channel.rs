use std::path::Path;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::EventSink;
use crate::error::SinkError;
use crate::kernel::event::{DerivedEvent, Notification};

/// Forwards notifications to an in-process consumer without blocking the reactor.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Notification>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Notification>) -> Self {
        Self { tx }
    }

    /// Sink plus the receiving end, `capacity` notifications deep.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    fn forward(&self, notification: Notification) -> Result<(), SinkError> {
        self.tx.try_send(notification).map_err(|e| match e {
            TrySendError::Full(_) => SinkError::Full,
            TrySendError::Closed(_) => SinkError::Closed,
        })
    }
}

impl EventSink for ChannelSink {
    fn accept(&mut self, event: &DerivedEvent) -> Result<(), SinkError> {
        self.forward(Notification::CallEnded(event.clone()))
    }

    fn accept_recording(&mut self, path: &Path) -> Result<(), SinkError> {
        self.forward(Notification::RecordingSaved {
            path: path.to_path_buf(),
        })
    }
}
