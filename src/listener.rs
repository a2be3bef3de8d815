use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::Result;
use crate::kernel::reactor::Reactor;
use crate::outputs::EventSink;

struct Running<S> {
    cancel: CancellationToken,
    handle: JoinHandle<Reactor<S>>,
}

/// Start/stop switch around a reactor task.
///
/// The reactor (and with it the tracker session) survives a stop, so a restart
/// resumes with the same debounce history.
pub struct CallListener<S> {
    idle: Option<Reactor<S>>,
    running: Option<Running<S>>,
}

impl<S: EventSink + 'static> CallListener<S> {
    pub fn new(reactor: Reactor<S>) -> Self {
        Self {
            idle: Some(reactor),
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Spawns the reactor loop. No-op if already running. Must be called inside a tokio runtime.
    pub fn start(&mut self) -> bool {
        if self.running.is_some() {
            info!("Call listener already started");
            return false;
        }
        let Some(reactor) = self.idle.take() else {
            return false;
        };

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(reactor.run(cancel.clone()));
        self.running = Some(Running { cancel, handle });
        info!("Call listener started");
        true
    }

    /// Cancels the loop and waits for it. Signals queued meanwhile are discarded.
    pub async fn stop(&mut self) -> Result<bool> {
        let Some(running) = self.running.take() else {
            return Ok(false);
        };

        running.cancel.cancel();
        let mut reactor = running.handle.await?;
        reactor.discard_pending();
        self.idle = Some(reactor);
        info!("Call listener stopped");
        Ok(true)
    }

    /// Waits for the loop to end by itself (all sources dropped).
    pub async fn join(&mut self) -> Result<()> {
        if let Some(running) = self.running.take() {
            let reactor = running.handle.await?;
            self.idle = Some(reactor);
        }
        Ok(())
    }

    /// The reactor, while stopped.
    pub fn reactor(&self) -> Option<&Reactor<S>> {
        self.idle.as_ref()
    }

    pub fn reactor_mut(&mut self) -> Option<&mut Reactor<S>> {
        self.idle.as_mut()
    }
}
