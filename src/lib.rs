pub mod config;
pub mod error;
pub mod kernel;
pub mod listener;
pub mod outputs;
pub mod services;

// Re-export specific items if needed for convenient access
pub use config::Config;
pub use error::{Error, Result, SinkError};
pub use kernel::event::{DerivedEvent, Notification, RawSignal, SignalKind};
pub use kernel::reactor::Reactor;
pub use kernel::tracker::{CallStateTracker, Classification};
pub use listener::CallListener;
