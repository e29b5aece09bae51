//! Level and life progression.
//!
//! Everything that moves score, level, lives or the persisted high score
//! lives here, together with the scheduling of the `Success` and `Failed`
//! pauses. Like the validator, these are impls over the shared session
//! struct.

use super::game::{GameSessionGeneric, PendingKind, PendingReveal};
use super::{GamePhase, SubmitResult};
use crate::sequence;
use crate::symbol::SymbolSource;

/// Level, score, lives and best score for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerProgress {
    /// Current level, 1-based.
    pub level: u32,
    /// Score accumulated this run.
    pub score: u32,
    /// Remaining lives.
    pub lives: u8,
    /// Best score seen; survives run resets and is persisted when a run ends.
    pub high_score: u32,
}

impl PlayerProgress {
    /// Fresh run state with full lives, carrying an existing high score.
    pub(in crate::session) fn fresh(max_lives: u8, high_score: u32) -> Self {
        Self {
            level: 1,
            score: 0,
            lives: max_lives,
            high_score,
        }
    }
}

impl<S: SymbolSource> GameSessionGeneric<S> {
    /// Handle a fully matched sequence.
    ///
    /// Scores the level, extends the sequence for the next one and parks the
    /// session in `Success` until the pause elapses.
    pub(in crate::session) fn level_complete(&mut self) -> SubmitResult {
        let completed = self.progress.level;
        let earned = (self.sequence.len() as u32).saturating_mul(self.config.points_per_symbol);
        self.stats.levels_completed += 1;
        self.progress.score = self.progress.score.saturating_add(earned);
        self.progress.level = self.progress.level.saturating_add(1);

        let target = self.config.length_for_level(self.progress.level);
        sequence::extend(
            &mut self.sequence,
            &mut self.source,
            self.config.symbols,
            target,
        );
        self.input.clear();

        self.phase = GamePhase::Success;
        self.pending = Some(PendingReveal {
            remaining: self.config.timing.success_pause(),
            kind: PendingKind::NextLevel,
        });
        tracing::debug!(
            "level {} complete (+{} points), next sequence {} symbols",
            completed,
            earned,
            self.sequence.len()
        );
        SubmitResult::LevelComplete
    }

    /// Handle a mismatch: lose a life, then replay or end the run.
    pub(in crate::session) fn life_lost(&mut self) -> SubmitResult {
        self.progress.lives = self.progress.lives.saturating_sub(1);
        if self.progress.lives == 0 {
            self.enter_game_over();
            return SubmitResult::GameOver;
        }

        self.phase = GamePhase::Failed;
        self.pending = Some(PendingReveal {
            remaining: self.config.timing.failure_pause(),
            kind: PendingKind::Replay,
        });
        tracing::debug!("life lost, {} remaining", self.progress.lives);
        SubmitResult::LifeLost
    }

    /// Terminal transition: freeze the run and persist the best score.
    pub(in crate::session) fn enter_game_over(&mut self) {
        self.cancel_timers();
        self.phase = GamePhase::GameOver;
        self.commit_high_score();
        tracing::debug!(
            "game over at level {} with score {}",
            self.progress.level,
            self.progress.score
        );
    }

    /// Fold the current score into the high score and persist it.
    ///
    /// A failing save is logged and swallowed; the in-memory high score is
    /// kept and play continues.
    pub(in crate::session) fn commit_high_score(&mut self) {
        if self.progress.score > self.progress.high_score {
            self.progress.high_score = self.progress.score;
            if let Err(e) = self.store.save(self.progress.high_score) {
                tracing::warn!("high-score save failed (keeping in-memory value): {}", e);
            }
        }
    }
}
