use std::path::Path;

use tracing::info;

use super::EventSink;
use crate::error::SinkError;
use crate::kernel::event::DerivedEvent;

/// Writes events to the log. Numbers stay out of it.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn accept(&mut self, event: &DerivedEvent) -> Result<(), SinkError> {
        info!(direction = ?event.direction(), "[EVENT] call ended");
        Ok(())
    }

    fn accept_recording(&mut self, _path: &Path) -> Result<(), SinkError> {
        info!("[EVENT] recording saved");
        Ok(())
    }
}
