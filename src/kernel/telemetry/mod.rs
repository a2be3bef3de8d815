//! Signal-path telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside classification logic (Tracker or Reactor step).
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain phone numbers or recording paths.
//! Only signal kinds, directions, durations and counts are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;
