pub mod event;
pub mod reactor;
pub mod scheduler;
pub mod source;
pub mod state;
pub mod telemetry;
pub mod time;
pub mod tracker;
