//! Symbol alphabet and random symbol sources.
//!
//! The engine never owns a hidden RNG. Sessions draw symbols through the
//! [`SymbolSource`] trait, so a run can be replayed exactly by injecting a
//! seeded source (or a scripted one in tests).

use num_derive::FromPrimitive;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::fmt;

/// One discrete unit of the pattern the player must reproduce.
///
/// Games may restrict themselves to a prefix of this alphabet through
/// [`GameConfig::symbols`](crate::GameConfig::symbols); a classic four-color
/// game uses `Red` through `Yellow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Symbol {
    /// Alphabet index 0.
    Red = 0,
    /// Alphabet index 1.
    Green = 1,
    /// Alphabet index 2.
    Blue = 2,
    /// Alphabet index 3.
    Yellow = 3,
    /// Alphabet index 4.
    Cyan = 4,
    /// Alphabet index 5.
    Magenta = 5,
}

impl Symbol {
    /// Number of symbols in the full alphabet.
    pub const COUNT: u8 = 6;

    /// All symbols in alphabet order.
    pub const ALL: [Symbol; Symbol::COUNT as usize] = [
        Symbol::Red,
        Symbol::Green,
        Symbol::Blue,
        Symbol::Yellow,
        Symbol::Cyan,
        Symbol::Magenta,
    ];

    /// 0-based index of this symbol within the alphabet.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Symbol for a 0-based alphabet index, `None` past the alphabet end.
    pub fn from_index(index: u8) -> Option<Symbol> {
        num_traits::FromPrimitive::from_u8(index)
    }

    /// Lower-case color name.
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Red => "red",
            Symbol::Green => "green",
            Symbol::Blue => "blue",
            Symbol::Yellow => "yellow",
            Symbol::Cyan => "cyan",
            Symbol::Magenta => "magenta",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uniform random-symbol collaborator.
///
/// `alphabet` restricts draws to the first N symbols of [`Symbol::ALL`];
/// implementations must treat values outside `1..=Symbol::COUNT` as clamped.
pub trait SymbolSource {
    /// Draw one symbol uniformly from the first `alphabet` symbols.
    fn next_symbol(&mut self, alphabet: u8) -> Symbol;
}

/// PCG-32 backed symbol source.
///
/// Small, fast and fully determined by its seed; two sources built from the
/// same seed produce identical draw streams forever.
#[derive(Debug, Clone)]
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg32::from_os_rng(),
        }
    }

    /// Source with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl SymbolSource for PcgSource {
    fn next_symbol(&mut self, alphabet: u8) -> Symbol {
        let bound = alphabet.clamp(1, Symbol::COUNT);
        let index = self.rng.random_range(0..bound);
        Symbol::from_index(index).unwrap_or(Symbol::Red)
    }
}

/// Replays a fixed symbol script, cycling once exhausted.
///
/// Meant for tests and recorded replays; the `alphabet` argument is ignored
/// because the script already decides every draw.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<Symbol>,
    position: usize,
}

impl ScriptedSource {
    /// Source that yields `script` in order, wrapping around at the end.
    pub fn new(script: Vec<Symbol>) -> Self {
        Self {
            script,
            position: 0,
        }
    }
}

impl SymbolSource for ScriptedSource {
    fn next_symbol(&mut self, _alphabet: u8) -> Symbol {
        if self.script.is_empty() {
            return Symbol::Red;
        }
        let symbol = self.script[self.position % self.script.len()];
        self.position += 1;
        symbol
    }
}
