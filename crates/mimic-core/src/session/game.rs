//! Game session core.
//!
//! `GameSessionGeneric` owns every piece of mutable run state. Sibling files
//! in this module add the input-validation and progression impls over the
//! same struct; fields are therefore module-visible rather than private.

use super::reveal::{PassToken, RevealTimeline, StepEvent};
use super::{GameControl, GamePhase, GameSnapshot, SessionStats, SubmitResult, TickEvent};
use crate::config::GameConfig;
use crate::sequence;
use crate::session::progression::PlayerProgress;
use crate::store::{HighScoreStore, MemoryStore};
use crate::symbol::{PcgSource, Symbol, SymbolSource};
use crate::Result;
use std::collections::VecDeque;
use std::time::Duration;

/// What a scheduled phase hop does once its pause elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::session) enum PendingKind {
    /// Reveal the extended sequence of the next level.
    NextLevel,
    /// Replay the same sequence after a lost life.
    Replay,
}

/// Delayed `Success`/`Failed` to `Showing` hop.
#[derive(Debug, Clone, Copy)]
pub(in crate::session) struct PendingReveal {
    /// Pause time left before the hop fires.
    pub(in crate::session) remaining: Duration,
    /// Which reveal the hop starts.
    pub(in crate::session) kind: PendingKind,
}

/// Sequence-memory game session, generic over the symbol source.
///
/// Most hosts want [`GameSession`], the PCG-backed alias; the generic form
/// exists so tests and replay tools can inject a scripted source.
///
/// The session is a single cooperative actor. All mutation happens through
/// four entry points on the host's thread: [`start_game`], [`reset_game`],
/// [`submit`] and the clock pump [`tick`].
///
/// [`start_game`]: GameSessionGeneric::start_game
/// [`reset_game`]: GameSessionGeneric::reset_game
/// [`submit`]: GameSessionGeneric::submit
/// [`tick`]: GameSessionGeneric::tick
pub struct GameSessionGeneric<S: SymbolSource> {
    /// Static rules for this session
    pub(in crate::session) config: GameConfig,
    /// Injected randomness
    pub(in crate::session) source: S,
    /// High-score persistence collaborator
    pub(in crate::session) store: Box<dyn HighScoreStore>,
    /// Current phase
    pub(in crate::session) phase: GamePhase,
    /// Target sequence for the current level
    pub(in crate::session) sequence: Vec<Symbol>,
    /// Player input for the current attempt
    pub(in crate::session) input: Vec<Symbol>,
    /// Level, score, lives and best score
    pub(in crate::session) progress: PlayerProgress,
    /// Live reveal pass, present while `Showing`
    pub(in crate::session) reveal: Option<RevealTimeline>,
    /// Scheduled `Success`/`Failed` hop, present during those phases
    pub(in crate::session) pending: Option<PendingReveal>,
    /// Events produced since the last drain
    pub(in crate::session) events: VecDeque<TickEvent>,
    /// Monotonic counter feeding pass tokens
    pub(in crate::session) pass_counter: u64,
    /// Session-lifetime counters
    pub(in crate::session) stats: SessionStats,
}

/// Game session backed by a seedable PCG symbol source.
pub type GameSession = GameSessionGeneric<PcgSource>;

impl GameSession {
    /// Session with OS-entropy randomness and an in-memory store.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_source(config, PcgSource::from_entropy())
    }

    /// Session with a fixed seed; equal seeds replay identical games.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_source(config, PcgSource::seeded(seed))
    }
}

impl<S: SymbolSource> GameSessionGeneric<S> {
    /// Session over a caller-provided symbol source.
    ///
    /// Fails if the config is out of range; a constructed session never has
    /// to re-validate its rules.
    pub fn with_source(config: GameConfig, source: S) -> Result<Self> {
        config.validate()?;
        let max_lives = config.max_lives;
        Ok(Self {
            config,
            source,
            store: Box::new(MemoryStore::new()),
            phase: GamePhase::Idle,
            sequence: Vec::new(),
            input: Vec::new(),
            progress: PlayerProgress::fresh(max_lives, 0),
            reveal: None,
            pending: None,
            events: VecDeque::new(),
            pass_counter: 0,
            stats: SessionStats::default(),
        })
    }

    /// Swap in a persistence collaborator and adopt its stored high score.
    ///
    /// A failing load is logged and treated as zero; score tracking simply
    /// continues in memory.
    pub fn set_store(&mut self, store: Box<dyn HighScoreStore>) {
        self.store = store;
        match self.store.load() {
            Ok(stored) => {
                self.progress.high_score = self.progress.high_score.max(stored);
            }
            Err(e) => {
                tracing::warn!("high-score load failed, starting from zero: {}", e);
            }
        }
    }

    /// Begin a fresh run (allowed from any phase).
    ///
    /// An unfinished run's score is folded into the high score first, then
    /// outstanding reveal timers are cancelled, lives and score re-armed and
    /// the level-1 reveal started immediately.
    pub fn start_game(&mut self) {
        self.commit_high_score();
        self.cancel_timers();
        // undrained events of the old run must not leak into the new one
        self.events.clear();

        self.stats.games_started += 1;
        self.progress = PlayerProgress::fresh(self.config.max_lives, self.progress.high_score);
        self.input.clear();
        self.sequence = sequence::initial(
            &mut self.source,
            self.config.symbols,
            self.config.length_for_level(1),
        );
        tracing::debug!(
            "run {} started: {} symbols over {} colors",
            self.stats.games_started,
            self.sequence.len(),
            self.config.symbols
        );
        self.begin_reveal();
    }

    /// Drop back to `Idle`, clearing the run.
    ///
    /// The high score survives (and is committed if the abandoned run beat
    /// it); level, score and lives return to their fresh values.
    pub fn reset_game(&mut self) {
        self.commit_high_score();
        self.cancel_timers();
        self.events.clear();

        self.phase = GamePhase::Idle;
        self.sequence.clear();
        self.input.clear();
        self.progress = PlayerProgress::fresh(self.config.max_lives, self.progress.high_score);
    }

    /// Advance the session clock by `elapsed` wall-clock time.
    ///
    /// The host calls this from its own loop (or lets the realtime driver do
    /// it) and receives the timed events that fired, in order. Phases with
    /// no scheduled work accept any `elapsed` and return nothing; `tick` is
    /// the only place timed transitions happen, so a host that stops pumping
    /// freezes the game mid-phase without corrupting it.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<TickEvent> {
        // a scheduled Success/Failed hop consumes time first; whatever is
        // left flows into the reveal pass it just started
        let mut leftover = elapsed;
        if let Some(pending) = self.pending {
            if elapsed >= pending.remaining {
                leftover = elapsed - pending.remaining;
                self.pending = None;
                self.fire_pending(pending.kind);
            } else {
                self.pending = Some(PendingReveal {
                    remaining: pending.remaining - elapsed,
                    kind: pending.kind,
                });
                leftover = Duration::ZERO;
            }
        }

        if !leftover.is_zero() {
            self.advance_reveal(leftover);
        }
        self.events.drain(..).collect()
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Symbol currently lit (only ever `Some` while `Showing`).
    pub fn highlight(&self) -> Option<Symbol> {
        self.reveal.as_ref().and_then(|t| t.current_highlight())
    }

    /// Current level (1-based).
    pub fn level(&self) -> u32 {
        self.progress.level
    }

    /// Score accumulated this run.
    pub fn score(&self) -> u32 {
        self.progress.score
    }

    /// Remaining lives.
    pub fn lives(&self) -> u8 {
        self.progress.lives
    }

    /// Best score seen so far (live value; persisted when a run ends).
    pub fn high_score(&self) -> u32 {
        self.progress.high_score
    }

    /// Target sequence for the current level.
    ///
    /// Exposed for replay tooling and self-playing demos; honest frontends
    /// look away.
    pub fn sequence(&self) -> &[Symbol] {
        &self.sequence
    }

    /// Symbols accepted for the current attempt.
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Full progress record.
    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    /// Completion fraction of the live reveal pass (`1.0` when none runs).
    pub fn reveal_progress(&self) -> f32 {
        self.reveal.as_ref().map(|t| t.progress()).unwrap_or(1.0)
    }

    /// Session-lifetime counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Static rules this session runs under.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Point-in-time view, cheap to hand across threads.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            highlight: self.highlight(),
            level: self.progress.level,
            score: self.progress.score,
            lives: self.progress.lives,
            high_score: self.progress.high_score,
            sequence_len: self.sequence.len(),
            input_len: self.input.len(),
            reveal_progress: self.reveal_progress(),
        }
    }

    /// Drop any live reveal pass and scheduled hop.
    ///
    /// Counts an interrupted pass so restarts mid-reveal show up in the
    /// stats. A discarded hop alone does not count; its pass never started.
    pub(in crate::session) fn cancel_timers(&mut self) {
        if self.reveal.as_ref().is_some_and(|t| !t.is_finished()) {
            self.stats.passes_cancelled += 1;
        }
        self.reveal = None;
        self.pending = None;
    }

    /// Install a fresh reveal pass over the current sequence and enter `Showing`.
    fn begin_reveal(&mut self) {
        self.cancel_timers();
        self.pass_counter += 1;
        let timeline = RevealTimeline::new(
            self.sequence.clone(),
            self.config.timing,
            PassToken(self.pass_counter),
        );
        tracing::debug!(
            "reveal pass {} started over {} symbols",
            timeline.token().0,
            self.sequence.len()
        );

        self.input.clear();
        match timeline.first_symbol() {
            Some(first) => {
                self.phase = GamePhase::Showing;
                self.events.push_back(TickEvent::HighlightOn(first));
                self.reveal = Some(timeline);
            }
            None => {
                // nothing to reveal; cannot happen with a validated config
                self.phase = GamePhase::AwaitingInput;
                self.events.push_back(TickEvent::AwaitInput);
            }
        }
    }

    /// Run the hop a `Success`/`Failed` pause scheduled.
    fn fire_pending(&mut self, kind: PendingKind) {
        match kind {
            PendingKind::NextLevel => {
                self.events.push_back(TickEvent::LevelStarted {
                    level: self.progress.level,
                });
            }
            PendingKind::Replay => {
                self.events.push_back(TickEvent::ReplayStarted);
            }
        }
        self.begin_reveal();
    }

    /// Feed elapsed time into the live reveal pass.
    fn advance_reveal(&mut self, dt: Duration) {
        let steps = match self.reveal.as_mut() {
            Some(timeline) => timeline.advance(dt),
            None => return,
        };
        for step in steps {
            match step {
                StepEvent::HighlightOn(symbol) => {
                    self.events.push_back(TickEvent::HighlightOn(symbol));
                }
                StepEvent::HighlightOff => {
                    self.events.push_back(TickEvent::HighlightOff);
                }
                StepEvent::Finished => {
                    self.reveal = None;
                    self.input.clear();
                    self.phase = GamePhase::AwaitingInput;
                    self.events.push_back(TickEvent::AwaitInput);
                }
            }
        }
    }
}

impl<S: SymbolSource> GameControl for GameSessionGeneric<S> {
    fn start_game(&mut self) {
        GameSessionGeneric::start_game(self);
    }

    fn reset_game(&mut self) {
        GameSessionGeneric::reset_game(self);
    }

    fn submit(&mut self, symbol: Symbol) -> SubmitResult {
        GameSessionGeneric::submit(self, symbol)
    }

    fn phase(&self) -> GamePhase {
        GameSessionGeneric::phase(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::ScriptedSource;
    use crate::timing::RevealTiming;

    fn fast_config() -> GameConfig {
        GameConfig {
            timing: RevealTiming {
                highlight_ms: 10,
                gap_ms: 5,
                success_pause_ms: 20,
                failure_pause_ms: 30,
            },
            ..GameConfig::default()
        }
    }

    fn scripted(script: Vec<Symbol>) -> GameSessionGeneric<ScriptedSource> {
        GameSessionGeneric::with_source(fast_config(), ScriptedSource::new(script))
            .expect("valid config")
    }

    #[test]
    fn new_session_is_idle_with_fresh_progress() {
        let session = GameSession::seeded(fast_config(), 1).unwrap();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.level(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.high_score(), 0);
        assert!(session.sequence().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = GameConfig {
            symbols: 1,
            ..GameConfig::default()
        };
        assert!(GameSession::seeded(config, 1).is_err());
    }

    #[test]
    fn start_enters_showing_with_the_first_symbol_lit() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        session.start_game();

        assert_eq!(session.phase(), GamePhase::Showing);
        assert_eq!(session.sequence().len(), 3);
        assert_eq!(session.highlight(), Some(Symbol::Red));

        let events = session.tick(Duration::ZERO);
        assert_eq!(events, vec![TickEvent::HighlightOn(Symbol::Red)]);
    }

    #[test]
    fn reveal_events_arrive_in_order_and_end_awaiting_input() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        session.start_game();

        let mut events = session.tick(Duration::ZERO);
        events.extend(session.tick(Duration::from_secs(1)));

        assert_eq!(
            events,
            vec![
                TickEvent::HighlightOn(Symbol::Red),
                TickEvent::HighlightOff,
                TickEvent::HighlightOn(Symbol::Blue),
                TickEvent::HighlightOff,
                TickEvent::HighlightOn(Symbol::Green),
                TickEvent::HighlightOff,
                TickEvent::AwaitInput,
            ]
        );
        assert_eq!(session.phase(), GamePhase::AwaitingInput);
        assert_eq!(session.highlight(), None);
    }

    #[test]
    fn tick_without_scheduled_work_returns_nothing() {
        let mut session = scripted(vec![Symbol::Red]);
        assert!(session.tick(Duration::from_secs(5)).is_empty());
        assert_eq!(session.phase(), GamePhase::Idle);
    }

    #[test]
    fn restart_mid_reveal_drops_stale_events_and_counts_the_cancel() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        session.start_game();
        session.tick(Duration::from_millis(12)); // inside the first gap

        session.start_game();
        let events = session.tick(Duration::ZERO);

        // only the new pass's opening highlight, nothing from the old pass
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], TickEvent::HighlightOn(_)));
        assert_eq!(session.stats().passes_cancelled, 1);
        assert_eq!(session.stats().games_started, 2);
    }

    #[test]
    fn restart_during_a_pause_counts_no_cancelled_pass() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        session.start_game();
        session.tick(Duration::from_secs(1));
        for symbol in [Symbol::Red, Symbol::Blue, Symbol::Green] {
            session.submit(symbol);
        }
        assert_eq!(session.phase(), GamePhase::Success);

        // only the scheduled Success -> Showing hop is outstanding here
        session.start_game();
        assert_eq!(session.stats().passes_cancelled, 0);
        assert_eq!(session.phase(), GamePhase::Showing);
    }

    #[test]
    fn reset_returns_to_idle_and_keeps_the_high_score() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        session.start_game();
        session.tick(Duration::from_secs(1));
        for symbol in [Symbol::Red, Symbol::Blue, Symbol::Green] {
            session.submit(symbol);
        }
        assert_eq!(session.score(), 30);

        session.reset_game();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.high_score(), 30);
        assert!(session.sequence().is_empty());
    }

    #[test]
    fn reveal_progress_tracks_the_pass() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        assert_eq!(session.reveal_progress(), 1.0);

        session.start_game();
        assert_eq!(session.reveal_progress(), 0.0);

        session.tick(Duration::from_millis(20));
        let mid = session.reveal_progress();
        assert!(mid > 0.0 && mid < 1.0);

        session.tick(Duration::from_secs(1));
        assert_eq!(session.reveal_progress(), 1.0);
    }

    #[test]
    fn snapshot_mirrors_the_observers() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        session.start_game();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, session.phase());
        assert_eq!(snapshot.highlight, session.highlight());
        assert_eq!(snapshot.level, session.level());
        assert_eq!(snapshot.lives, session.lives());
        assert_eq!(snapshot.sequence_len, session.sequence().len());
        assert_eq!(snapshot.input_len, 0);
    }

    #[test]
    fn control_trait_drives_the_session() {
        let mut session = scripted(vec![Symbol::Red, Symbol::Blue, Symbol::Green]);
        let control: &mut dyn GameControl = &mut session;

        control.start_game();
        assert_eq!(control.phase(), GamePhase::Showing);
        assert_eq!(control.submit(Symbol::Red), SubmitResult::Ignored);

        control.reset_game();
        assert_eq!(control.phase(), GamePhase::Idle);
    }
}
