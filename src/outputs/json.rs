use std::io::Write;
use std::path::Path;

use super::EventSink;
use crate::error::SinkError;
use crate::kernel::event::{DerivedEvent, Notification};

/// One JSON notification per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, notification: &Notification) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, notification)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn accept(&mut self, event: &DerivedEvent) -> Result<(), SinkError> {
        self.write_line(&Notification::CallEnded(event.clone()))
    }

    fn accept_recording(&mut self, path: &Path) -> Result<(), SinkError> {
        self.write_line(&Notification::RecordingSaved {
            path: path.to_path_buf(),
        })
    }
}
