use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use callwatch::kernel::source::SignalSource;
use callwatch::kernel::time::SystemClock;
use callwatch::outputs::JsonLinesSink;
use callwatch::{CallListener, Config, RawSignal, Reactor};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

/// Stand-in signal source: one `STATE [NUMBER]` per line until EOF.
///
/// Runs on a plain thread, not the runtime: a blocked stdin read must not keep
/// the process alive once Ctrl+C has stopped the listener.
fn spawn_stdin_reader(source: SignalSource, eof_tx: oneshot::Sender<()>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let mut parts = line.split_whitespace();
            let state = parts.next();
            let number = parts.next();
            match RawSignal::from_platform(state, number) {
                Ok(Some(signal)) => {
                    if source.blocking_send(signal).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Ignoring input: {}", e),
            }
        }
        // Dropping the source lets the reactor drain and exit.
        drop(source);
        let _ = eof_tx.send(());
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON notifications.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("callwatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Config::load(&path)?
        }
        None => Config::default(),
    };

    let (source, rx) = SignalSource::channel(config.listener.channel_capacity);
    let sink = JsonLinesSink::new(std::io::stdout());
    let reactor = Reactor::from_config(rx, Arc::new(SystemClock::new()), &config, sink);

    let mut listener = CallListener::new(reactor);
    listener.start();

    let (eof_tx, eof_rx) = oneshot::channel();
    spawn_stdin_reader(source, eof_tx);

    let interrupted = tokio::select! {
        _ = tokio::signal::ctrl_c() => true,
        _ = eof_rx => false,
    };

    if interrupted {
        tracing::info!("Interrupted");
        listener.stop().await?;
    } else {
        listener.join().await?;
    }

    if let Some(reactor) = listener.reactor() {
        let snap = reactor.telemetry.snapshot();
        tracing::info!(
            ended = snap.call_stats.total_ended(),
            duplicates = snap.signal_stats.duplicates,
            debounced = snap.call_stats.debounced_ends,
            "Session summary"
        );
    }

    // Returning ends the process even if the reader thread is still blocked on stdin.
    Ok(())
}
