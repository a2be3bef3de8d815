use crate::error::{Error, Result};
use crate::kernel::time::DEBOUNCE_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const UNKNOWN_CALLER: &str = "Unknown";

/// Where device dialers usually drop call recordings, scanned in this order.
pub const DEFAULT_RECORDING_DIRS: [&str; 5] = [
    "/storage/emulated/0/Call/Recordings/",
    "/storage/emulated/0/Music/Call Recordings/",
    "/storage/emulated/0/Recorder/",
    "/storage/emulated/0/Download/",
    "/storage/emulated/0/Recordings/Call/",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub listener: ListenerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Window after an emitted end event in which further ends are echoes.
    pub debounce_ms: u64,
    /// Stand-in number for incoming calls without caller id.
    pub unknown_caller: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            unknown_caller: UNKNOWN_CALLER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    pub channel_capacity: usize,
    pub locate_recordings: bool,
    pub recording_dirs: Vec<PathBuf>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            locate_recordings: true,
            recording_dirs: DEFAULT_RECORDING_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl Config {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.listener.channel_capacity == 0 {
            return Err(Error::InvalidConfig {
                reason: "listener.channel_capacity must be greater than zero".to_string(),
            });
        }
        if self.tracker.unknown_caller.trim().is_empty() {
            return Err(Error::InvalidConfig {
                reason: "tracker.unknown_caller must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
