pub mod locator;

pub use locator::RecordingLocator;
