//! Game rules configuration.
//!
//! Plain serde-friendly data with a validation gate. Sessions refuse to be
//! built from an invalid config, so the running state machine never has to
//! re-check these ranges.

use crate::symbol::Symbol;
use crate::timing::RevealTiming;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard cap on the sequence length a config may request.
const MAX_SEQUENCE_CAP: usize = 64;

/// Hard cap on configured lives.
const MAX_LIVES_CAP: u8 = 9;

/// Static rules for a game session.
///
/// All fields are public plain data; call [`validate`](GameConfig::validate)
/// after hand-editing one. The defaults describe the classic game: three
/// starting symbols, four colors, three lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Sequence length at level 1.
    pub base_length: usize,
    /// Sequence length cap across all levels.
    pub max_length: usize,
    /// Score awarded per symbol of a completed sequence.
    pub points_per_symbol: u32,
    /// Mismatches a player survives before the run ends.
    pub max_lives: u8,
    /// Alphabet size in use (`2..=6`), counting from [`Symbol::Red`].
    pub symbols: u8,
    /// Reveal pacing.
    pub timing: RevealTiming,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_length: 3,
            max_length: 10,
            points_per_symbol: 10,
            max_lives: 3,
            symbols: 4,
            timing: RevealTiming::default(),
        }
    }
}

impl GameConfig {
    /// Target sequence length for a level (1-based).
    ///
    /// `min(base_length + level / 2, max_length)`: the sequence grows by one
    /// symbol every other level until it hits the cap.
    pub fn length_for_level(&self, level: u32) -> usize {
        self.max_length
            .min(self.base_length.saturating_add((level / 2) as usize))
    }

    /// Check every field against its legal range.
    pub fn validate(&self) -> Result<()> {
        if self.base_length == 0 {
            return Err(EngineError::ConfigError(
                "base_length cannot be zero (there would be nothing to reveal)".to_string(),
            ));
        }
        if self.max_length < self.base_length {
            return Err(EngineError::ConfigError(format!(
                "max_length {} is below base_length {}",
                self.max_length, self.base_length
            )));
        }
        if self.max_length > MAX_SEQUENCE_CAP {
            return Err(EngineError::ConfigError(format!(
                "max_length {} exceeds reasonable limit of {}",
                self.max_length, MAX_SEQUENCE_CAP
            )));
        }
        if self.max_lives == 0 {
            return Err(EngineError::ConfigError(
                "max_lives cannot be zero (the run would be over before it starts)".to_string(),
            ));
        }
        if self.max_lives > MAX_LIVES_CAP {
            return Err(EngineError::ConfigError(format!(
                "max_lives {} exceeds reasonable limit of {}",
                self.max_lives, MAX_LIVES_CAP
            )));
        }
        if !(2..=Symbol::COUNT).contains(&self.symbols) {
            return Err(EngineError::ConfigError(format!(
                "symbols {} outside the supported 2..={} alphabet",
                self.symbols,
                Symbol::COUNT
            )));
        }
        self.timing.validate()
    }

    /// Load and validate a config from a JSON file.
    ///
    /// Missing fields take their defaults, so a file may override just the
    /// values it cares about.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)
            .map_err(|e| EngineError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }
}
