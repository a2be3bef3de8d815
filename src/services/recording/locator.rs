use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::config::DEFAULT_RECORDING_DIRS;

/// Finds the newest entry across a fixed, ordered list of candidate directories.
///
/// Heuristic only: dialers that record calls tend to write into one of a few
/// well-known folders, and the freshest file right after a hang-up is very
/// likely the one for that call.
#[derive(Debug, Clone)]
pub struct RecordingLocator {
    candidates: Vec<PathBuf>,
}

impl Default for RecordingLocator {
    fn default() -> Self {
        Self::new(DEFAULT_RECORDING_DIRS.iter().map(PathBuf::from).collect())
    }
}

impl RecordingLocator {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Most recently modified entry, or `None` if no candidate exists or all are empty.
    /// On equal modification times the first one seen wins.
    pub fn latest(&self) -> Option<PathBuf> {
        let mut newest: Option<(SystemTime, PathBuf)> = None;

        for dir in &self.candidates {
            if !dir.is_dir() {
                continue;
            }
            for (modified, path) in scan(dir) {
                let newer = match &newest {
                    Some((best, _)) => modified > *best,
                    None => true,
                };
                if newer {
                    newest = Some((modified, path));
                }
            }
        }

        newest.map(|(_, path)| path)
    }
}

/// Entries of one directory with their mtimes. Unreadable entries are skipped.
fn scan(dir: &Path) -> Vec<(SystemTime, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), "skipping unreadable recording dir: {}", e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, entry.path()))
        })
        .collect()
}
