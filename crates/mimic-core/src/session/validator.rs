//! Input validation.
//!
//! The submit path of the session: player symbols are compared against the
//! revealed sequence one position at a time. Calls outside `AwaitingInput`
//! are dropped without effect, so frontends racing a phase change stay
//! harmless.

use super::game::GameSessionGeneric;
use super::{GamePhase, SubmitResult};
use crate::symbol::{Symbol, SymbolSource};

impl<S: SymbolSource> GameSessionGeneric<S> {
    /// Feed one player symbol.
    ///
    /// Ignored unless the session is awaiting input. A mismatch at any
    /// position clears the whole input buffer and costs a life; matching
    /// the final position completes the level. The return value tells the
    /// frontend which of those happened.
    pub fn submit(&mut self, symbol: Symbol) -> SubmitResult {
        if self.phase != GamePhase::AwaitingInput {
            self.stats.inputs_ignored += 1;
            tracing::trace!("ignoring {} outside input phase ({:?})", symbol, self.phase);
            return SubmitResult::Ignored;
        }

        self.stats.inputs_accepted += 1;
        self.input.push(symbol);
        let position = self.input.len() - 1;

        // the buffer cannot outrun the sequence while the phase machine
        // holds; an overrun still scores as a mismatch to keep this total
        let expected = self.sequence.get(position).copied();
        if expected != Some(symbol) {
            self.input.clear();
            self.stats.mismatches += 1;
            tracing::debug!(
                "mismatch at position {}: got {}, expected {:?}",
                position,
                symbol,
                expected
            );
            return self.life_lost();
        }

        if self.input.len() == self.sequence.len() {
            return self.level_complete();
        }

        SubmitResult::Continue
    }
}
