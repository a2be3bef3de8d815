use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::event::{DerivedEvent, RawSignal};
use super::scheduler::{Scheduler, SideEffect};
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;
use super::time::Clock;
use super::tracker::CallStateTracker;
use crate::config::Config;
use crate::outputs::EventSink;
use crate::services::recording::RecordingLocator;

pub struct Reactor<S> {
    pub receiver: mpsc::Receiver<RawSignal>,
    pub tracker: CallStateTracker,
    pub scheduler: Scheduler,
    pub telemetry: TelemetryRecorder,
    sink: S,
    locator: Option<RecordingLocator>,
}

impl<S: EventSink> Reactor<S> {
    pub fn new(receiver: mpsc::Receiver<RawSignal>, tracker: CallStateTracker, sink: S) -> Self {
        Self {
            receiver,
            tracker,
            scheduler: Scheduler { locate_recordings: false },
            telemetry: TelemetryRecorder::new(),
            sink,
            locator: None,
        }
    }

    pub fn from_config(
        receiver: mpsc::Receiver<RawSignal>,
        clock: Arc<dyn Clock>,
        config: &Config,
        sink: S,
    ) -> Self {
        let tracker = CallStateTracker::new(clock, config.tracker.clone());
        let reactor = Self::new(receiver, tracker, sink);
        if config.listener.locate_recordings {
            reactor.with_locator(RecordingLocator::new(config.listener.recording_dirs.clone()))
        } else {
            reactor
        }
    }

    pub fn with_locator(mut self, locator: RecordingLocator) -> Self {
        self.locator = Some(locator);
        self.scheduler.locate_recordings = true;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Pure step: classify one signal, record telemetry, return effects for the driver.
    /// MUST NOT touch the sink or the file system.
    pub fn step(&mut self, signal: RawSignal) -> Vec<SideEffect> {
        self.telemetry.record(TelemetryEvent::SignalObserved { kind: signal.kind });

        let classification = self.tracker.classify(signal);
        if let Some(event) = TelemetryEvent::from_classification(&classification) {
            self.telemetry.record(event);
        }

        self.scheduler.schedule(classification)
    }

    /// Executes effects. Sink failures are logged and dropped; tracker state is never rolled back.
    ///
    /// Returns every event the tracker emitted, whether or not the sink took it.
    pub async fn apply(&mut self, effects: Vec<SideEffect>) -> Vec<DerivedEvent> {
        let mut emitted = Vec::new();

        for effect in effects {
            match effect {
                SideEffect::Deliver(event) => {
                    if let Err(e) = self.sink.accept(&event) {
                        warn!("Failed to deliver {:?}: {}", event.direction(), e);
                        self.telemetry.record(TelemetryEvent::SinkFailed);
                    }
                    emitted.push(event);
                }
                SideEffect::LocateRecording => {
                    let Some(locator) = self.locator.clone() else {
                        continue;
                    };
                    // Candidate dirs can be large (Download); keep the scan off the reactor thread.
                    let found = match tokio::task::spawn_blocking(move || locator.latest()).await {
                        Ok(found) => found,
                        Err(e) => {
                            warn!("Recording lookup failed: {}", e);
                            None
                        }
                    };
                    self.deliver_recording(found);
                }
            }
        }

        emitted
    }

    fn deliver_recording(&mut self, found: Option<PathBuf>) {
        self.telemetry.record(TelemetryEvent::RecordingLocated {
            found: found.is_some(),
        });
        match found {
            Some(path) => {
                if let Err(e) = self.sink.accept_recording(&path) {
                    warn!("Failed to deliver recording: {}", e);
                    self.telemetry.record(TelemetryEvent::SinkFailed);
                }
            }
            None => debug!("no call recording found"),
        }
    }

    /// Step + apply for a single signal.
    pub async fn dispatch(&mut self, signal: RawSignal) -> Vec<DerivedEvent> {
        let effects = self.step(signal);
        self.apply(effects).await
    }

    /// Drops signals queued while nobody was listening.
    pub fn discard_pending(&mut self) -> usize {
        let mut discarded = 0;
        while self.receiver.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "discarded queued signals");
        }
        discarded
    }

    /// Async driver loop. Runs until cancelled or every source is dropped,
    /// then hands the reactor back.
    pub async fn run(mut self, cancel: CancellationToken) -> Self {
        info!("Reactor started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Reactor cancelled");
                    break;
                }
                next = self.receiver.recv() => match next {
                    Some(signal) => {
                        self.dispatch(signal).await;
                    }
                    None => {
                        info!("All signal sources dropped");
                        break;
                    }
                }
            }
        }

        self
    }
}
