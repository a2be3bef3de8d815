//! Event sinks: where derived events leave the crate.

pub mod channel;
pub mod json;
pub mod log;

use std::path::Path;

use crate::error::SinkError;
use crate::kernel::event::DerivedEvent;

pub use channel::ChannelSink;
pub use json::JsonLinesSink;
pub use log::LogSink;

/// Fire-and-forget delivery target. Failures are reported, never retried.
pub trait EventSink: Send {
    fn accept(&mut self, event: &DerivedEvent) -> Result<(), SinkError>;

    /// Recording found for the call that just ended. Ignored by default.
    fn accept_recording(&mut self, _path: &Path) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn accept(&mut self, event: &DerivedEvent) -> Result<(), SinkError> {
        (**self).accept(event)
    }

    fn accept_recording(&mut self, path: &Path) -> Result<(), SinkError> {
        (**self).accept_recording(path)
    }
}
