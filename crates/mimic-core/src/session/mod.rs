//! Game Session Domain
//!
//! Holds the phase machine, the clock-pumped reveal timeline, input
//! validation and level progression. A session is a single cooperative
//! actor: the host feeds elapsed time through `tick` and player symbols
//! through `submit`, and every timed transition fires in order on that
//! same thread.

mod game;
mod progression;
mod reveal;
mod validator;

pub use game::{GameSession, GameSessionGeneric};
pub use progression::PlayerProgress;

use crate::symbol::Symbol;

/// Exclusive phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// No run in progress.
    #[default]
    Idle,
    /// The engine is revealing the target sequence.
    Showing,
    /// Waiting for the player to repeat the sequence.
    AwaitingInput,
    /// Level completed; the next reveal is scheduled.
    Success,
    /// A life was just lost; a replay of the same sequence is scheduled.
    Failed,
    /// No lives left. Terminal until the next start or reset.
    GameOver,
}

/// Outcome of a single [`submit`](GameSessionGeneric::submit) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// Accepted; more symbols are still expected.
    Continue,
    /// The whole sequence was matched.
    LevelComplete,
    /// Mismatch; a life was lost and the input buffer cleared.
    LifeLost,
    /// Mismatch with no lives left; the run is over.
    GameOver,
    /// Dropped without effect (the session was not awaiting input).
    Ignored,
}

/// Timed event drained from [`tick`](GameSessionGeneric::tick).
///
/// Events within one `tick` call arrive in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A symbol lit up.
    HighlightOn(Symbol),
    /// The lit symbol went dark.
    HighlightOff,
    /// The reveal finished; the session now awaits input.
    AwaitInput,
    /// The success pause elapsed and the next level's reveal began.
    LevelStarted {
        /// Level whose reveal just began (1-based).
        level: u32,
    },
    /// The failure pause elapsed and the replay of the same sequence began.
    ReplayStarted,
}

/// Session-lifetime counters.
///
/// These survive `start_game` and `reset_game`; only a brand-new session
/// starts from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Runs started via `start_game`.
    pub games_started: u32,
    /// Levels fully matched.
    pub levels_completed: u32,
    /// Inputs accepted while awaiting input.
    pub inputs_accepted: u64,
    /// Inputs dropped in other phases.
    pub inputs_ignored: u64,
    /// Mismatches (lives lost).
    pub mismatches: u32,
    /// Reveal passes cancelled by a restart before finishing.
    pub passes_cancelled: u32,
}

/// Point-in-time view of a session, cheap to copy across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    /// Current phase.
    pub phase: GamePhase,
    /// Lit symbol, when the reveal has one up.
    pub highlight: Option<Symbol>,
    /// Current level (1-based).
    pub level: u32,
    /// Current score.
    pub score: u32,
    /// Remaining lives.
    pub lives: u8,
    /// Best score seen so far.
    pub high_score: u32,
    /// Target sequence length for the current level.
    pub sequence_len: usize,
    /// Symbols entered so far this attempt.
    pub input_len: usize,
    /// Reveal completion fraction (`0.0..=1.0`; `1.0` outside `Showing`).
    pub reveal_progress: f32,
}

/// Control surface shared by the session and the realtime driver.
///
/// Frontends that only start, reset and feed input can hold either side of
/// the pump behind `&mut dyn GameControl`.
pub trait GameControl {
    /// Begin a fresh run (allowed from any phase).
    fn start_game(&mut self);

    /// Drop back to `Idle`, clearing the run.
    fn reset_game(&mut self);

    /// Feed one player symbol.
    fn submit(&mut self, symbol: Symbol) -> SubmitResult;

    /// Get the current phase.
    fn phase(&self) -> GamePhase;
}
