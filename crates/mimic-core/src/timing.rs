//! Reveal pacing.
//!
//! Every duration the engine schedules is expressed in wall-clock
//! milliseconds and consumed through [`tick`](crate::GameSessionGeneric::tick);
//! nothing in this crate sleeps or blocks.

use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for a single timing value (one minute).
const MAX_STEP_MS: u64 = 60_000;

/// Durations driving the reveal pass and the phase-change pauses.
///
/// The reveal alternates a lit segment (`highlight_ms`) with a dark gap
/// (`gap_ms`) per symbol; the gap also follows the final symbol, so two
/// passes never blur together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    /// How long each symbol stays highlighted.
    pub highlight_ms: u64,
    /// Dark gap after each highlight, including the last.
    pub gap_ms: u64,
    /// Pause between a completed level and the next reveal.
    pub success_pause_ms: u64,
    /// Pause between a lost life and the replay of the same sequence.
    pub failure_pause_ms: u64,
}

impl RevealTiming {
    /// Classic pacing: 600ms lit, 300ms dark.
    pub fn standard() -> Self {
        Self {
            highlight_ms: 600,
            gap_ms: 300,
            success_pause_ms: 800,
            failure_pause_ms: 1200,
        }
    }

    /// Fast pacing for demos and tests.
    pub fn quick() -> Self {
        Self {
            highlight_ms: 250,
            gap_ms: 120,
            success_pause_ms: 300,
            failure_pause_ms: 500,
        }
    }

    /// Highlight duration.
    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    /// Inter-symbol gap duration.
    pub fn gap(&self) -> Duration {
        Duration::from_millis(self.gap_ms)
    }

    /// Pause after a completed level.
    pub fn success_pause(&self) -> Duration {
        Duration::from_millis(self.success_pause_ms)
    }

    /// Pause after a lost life.
    pub fn failure_pause(&self) -> Duration {
        Duration::from_millis(self.failure_pause_ms)
    }

    /// Wall-clock duration of one full reveal pass over `len` symbols.
    pub fn pass_duration(&self, len: usize) -> Duration {
        Duration::from_millis((self.highlight_ms + self.gap_ms).saturating_mul(len as u64))
    }

    /// Check every duration against its legal range.
    pub fn validate(&self) -> Result<()> {
        if self.highlight_ms == 0 {
            return Err(EngineError::ConfigError(
                "highlight_ms cannot be zero (the reveal would never light a symbol)".to_string(),
            ));
        }
        if self.gap_ms == 0 {
            return Err(EngineError::ConfigError(
                "gap_ms cannot be zero (consecutive highlights would blur together)".to_string(),
            ));
        }
        if self.success_pause_ms == 0 {
            return Err(EngineError::ConfigError(
                "success_pause_ms cannot be zero (the next reveal would start with no visible break)"
                    .to_string(),
            ));
        }
        if self.failure_pause_ms == 0 {
            return Err(EngineError::ConfigError(
                "failure_pause_ms cannot be zero (the replay would start with no visible break)"
                    .to_string(),
            ));
        }
        for (name, value) in [
            ("highlight_ms", self.highlight_ms),
            ("gap_ms", self.gap_ms),
            ("success_pause_ms", self.success_pause_ms),
            ("failure_pause_ms", self.failure_pause_ms),
        ] {
            if value > MAX_STEP_MS {
                return Err(EngineError::ConfigError(format!(
                    "{} {} exceeds reasonable limit of {}ms",
                    name, value, MAX_STEP_MS
                )));
            }
        }
        Ok(())
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_standard_pacing() {
        assert_eq!(RevealTiming::default(), RevealTiming::standard());
        assert!(RevealTiming::default().validate().is_ok());
    }

    #[test]
    fn quick_pacing_validates() {
        assert!(RevealTiming::quick().validate().is_ok());
    }

    #[test]
    fn zero_highlight_is_rejected() {
        let timing = RevealTiming {
            highlight_ms: 0,
            ..RevealTiming::standard()
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn zero_gap_is_rejected() {
        let timing = RevealTiming {
            gap_ms: 0,
            ..RevealTiming::standard()
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn absurd_pause_is_rejected() {
        let timing = RevealTiming {
            failure_pause_ms: MAX_STEP_MS + 1,
            ..RevealTiming::standard()
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn zero_pauses_are_rejected() {
        let success = RevealTiming {
            success_pause_ms: 0,
            ..RevealTiming::standard()
        };
        assert!(success.validate().is_err());

        let failure = RevealTiming {
            failure_pause_ms: 0,
            ..RevealTiming::standard()
        };
        assert!(failure.validate().is_err());
    }

    #[test]
    fn pass_duration_covers_every_segment() {
        let timing = RevealTiming::standard();
        assert_eq!(timing.pass_duration(3), Duration::from_millis(3 * 900));
        assert_eq!(timing.pass_duration(0), Duration::ZERO);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let timing: RevealTiming = serde_json::from_str(r#"{"highlight_ms": 100}"#).unwrap();
        assert_eq!(timing.highlight_ms, 100);
        assert_eq!(timing.gap_ms, RevealTiming::standard().gap_ms);
    }
}
