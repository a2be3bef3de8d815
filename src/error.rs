use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown telephony state: {0:?}")]
    UnknownSignal(String),

    #[error("Signal source closed")]
    SourceClosed,

    #[error("Listener task failed: {0}")]
    Listener(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Delivery failure reported by an event sink. The reactor logs and drops these.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink closed")]
    Closed,

    #[error("Sink full")]
    Full,

    #[error("Sink write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("Sink encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
