//! Sequence-Memory Game Engine
//!
//! A deterministic, embeddable engine for "repeat the pattern" memory games:
//! the engine reveals a growing sequence of symbols with timed highlights,
//! the player echoes it back one symbol at a time, and levels, score, lives
//! and a persisted high score advance accordingly.
//!
//! # Features
//! - Explicit six-phase state machine (`Idle` through `GameOver`)
//! - Clock-pumped reveal timeline; the host supplies elapsed time, nothing blocks
//! - Whole-run determinism through seedable, injectable symbol sources
//! - Per-symbol input validation with life and level progression
//! - Pluggable high-score persistence (in-memory or JSON file)
//! - Optional background pump thread for interactive frontends
//!
//! # Crate feature flags
//! - `realtime` (default): Background pump driver via a dedicated thread
//!
//! # Collaborator traits
//! The engine never reaches for ambient authority: randomness comes through
//! [`SymbolSource`], persistence through [`HighScoreStore`], and time through
//! the `tick` call itself. Swap any of them to make a run reproducible.
//!
//! # Quick start
//! ## Pumping a session by hand
//! ```
//! use mimic_core::{GameConfig, GamePhase, GameSession};
//! use std::time::Duration;
//!
//! let mut game = GameSession::seeded(GameConfig::default(), 0xC0FFEE).unwrap();
//! game.start_game();
//! assert_eq!(game.phase(), GamePhase::Showing);
//!
//! // The host pumps elapsed time from its own loop; timed events fall out.
//! while game.phase() == GamePhase::Showing {
//!     game.tick(Duration::from_millis(50));
//! }
//! assert_eq!(game.phase(), GamePhase::AwaitingInput);
//! ```
//!
//! ## Letting the realtime driver pump for you
//! ```no_run
//! # #[cfg(feature = "realtime")]
//! # {
//! use mimic_core::{GameConfig, GameControl, GameSession, RealtimeDriver};
//! use std::time::Duration;
//!
//! let session = GameSession::new(GameConfig::default()).unwrap();
//! let mut driver = RealtimeDriver::spawn(session, Duration::from_millis(16));
//! driver.start_game();
//! // ... poll driver.drain_events() / driver.snapshot() from the UI loop
//! # }
//! ```

#![warn(missing_docs)]

// Domain modules
pub mod config; // Game rules and timing configuration
pub mod sequence; // Target sequence construction
pub mod session; // Phase machine, validation, progression
pub mod store; // High-score persistence collaborators
pub mod symbol; // Symbol alphabet and random sources
pub mod timing; // Reveal pacing

#[cfg(feature = "realtime")]
pub mod driver; // Background pump thread

/// Error types for game engine operations
///
/// This enum only contains errors that can surface from engine setup and
/// persistence. Gameplay itself is total: invalid inputs are ignored, never
/// returned as errors.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// IO error from the filesystem (config files, high-score store)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// High-score store failure
    #[error("High-score store error: {0}")]
    StoreError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for EngineError {
    /// Converts a String into `EngineError::Other`.
    ///
    /// This is a convenience conversion for generic string errors. Note that all string errors
    /// are converted to the `Other` variant, losing semantic information about the error type.
    ///
    /// For better error discrimination, use specific variant constructors instead:
    /// - `EngineError::ConfigError(msg)` for invalid configuration values
    /// - `EngineError::StoreError(msg)` for high-score persistence failures
    fn from(msg: String) -> Self {
        EngineError::Other(msg)
    }
}

impl From<&str> for EngineError {
    /// Converts a string slice into `EngineError::Other`.
    ///
    /// This is a convenience conversion for generic string errors. See [`From<String>`]
    /// for guidance on when to use explicit variant constructors instead.
    fn from(msg: &str) -> Self {
        EngineError::Other(msg.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// Public API exports
pub use config::GameConfig;
pub use session::{
    GameControl, GamePhase, GameSession, GameSessionGeneric, GameSnapshot, PlayerProgress,
    SessionStats, SubmitResult, TickEvent,
};
pub use store::{HighScoreStore, JsonFileStore, MemoryStore};
pub use symbol::{PcgSource, ScriptedSource, Symbol, SymbolSource};
pub use timing::RevealTiming;

#[cfg(feature = "realtime")]
pub use driver::{DriverStats, RealtimeDriver};
