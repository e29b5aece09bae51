//! Target sequence construction.
//!
//! Sequences only ever grow while a run is alive: levels append fresh draws
//! to the existing prefix, and a restart builds a new vector from scratch.

use crate::symbol::{Symbol, SymbolSource};

/// Build a fresh random sequence of `len` symbols.
pub fn initial<S: SymbolSource>(source: &mut S, alphabet: u8, len: usize) -> Vec<Symbol> {
    let mut sequence = Vec::with_capacity(len);
    extend(&mut sequence, source, alphabet, len);
    sequence
}

/// Append random symbols until the sequence reaches `target_len`.
///
/// A target at or below the current length is a no-op; the existing prefix
/// is never rewritten.
pub fn extend<S: SymbolSource>(
    sequence: &mut Vec<Symbol>,
    source: &mut S,
    alphabet: u8,
    target_len: usize,
) {
    while sequence.len() < target_len {
        sequence.push(source.next_symbol(alphabet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{PcgSource, ScriptedSource};

    #[test]
    fn initial_builds_the_requested_length() {
        let mut source = PcgSource::seeded(1);
        assert_eq!(initial(&mut source, 4, 5).len(), 5);
    }

    #[test]
    fn extend_preserves_the_existing_prefix() {
        let mut source = ScriptedSource::new(vec![Symbol::Red, Symbol::Green, Symbol::Blue]);
        let mut sequence = initial(&mut source, 4, 2);
        assert_eq!(sequence, vec![Symbol::Red, Symbol::Green]);

        extend(&mut sequence, &mut source, 4, 3);
        assert_eq!(sequence, vec![Symbol::Red, Symbol::Green, Symbol::Blue]);
    }

    #[test]
    fn extend_ignores_a_smaller_target() {
        let mut source = PcgSource::seeded(2);
        let mut sequence = initial(&mut source, 4, 4);
        let before = sequence.clone();

        extend(&mut sequence, &mut source, 4, 2);
        assert_eq!(sequence, before);
    }
}
