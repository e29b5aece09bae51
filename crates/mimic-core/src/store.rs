//! High-score persistence collaborators.
//!
//! The session treats its store as advisory: a failing load or save is
//! logged and play continues with the in-memory value. [`JsonFileStore`]
//! reads tolerantly (missing or corrupt files count as zero) and writes
//! through a sibling temp file so a crash never leaves a half-written
//! record behind.

use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable storage for a session's best score.
///
/// Implementations run inline on the session's thread, so they should be
/// quick; anything slow belongs behind the host's own offloading.
pub trait HighScoreStore: Send {
    /// Read the persisted high score (zero when none exists).
    fn load(&mut self) -> Result<u32>;

    /// Persist a new high score.
    fn save(&mut self, high_score: u32) -> Result<()>;
}

/// Volatile in-process store, the default for embedded sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: u32,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32> {
        Ok(self.value)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.value = high_score;
        Ok(())
    }
}

/// On-disk record format.
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// JSON-file-backed store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the given file path.
    ///
    /// Nothing is touched on disk until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        // A corrupt record reads as zero rather than poisoning the session.
        match serde_json::from_str::<HighScoreRecord>(&text) {
            Ok(record) => Ok(record.high_score),
            Err(e) => {
                tracing::debug!(
                    "ignoring corrupt high-score file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(0)
            }
        }
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let record = HighScoreRecord { high_score };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| EngineError::StoreError(e.to_string()))?;

        // Write to a sibling temp file, then rename over the target.
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, json)?;

        #[cfg(windows)]
        {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
