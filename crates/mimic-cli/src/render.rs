//! Terminal output helpers: event lines, symbol keys, result text.

use mimic_core::{SubmitResult, Symbol, TickEvent};

/// Uppercase display label for a symbol.
pub fn symbol_label(symbol: Symbol) -> &'static str {
    match symbol {
        Symbol::Red => "RED",
        Symbol::Green => "GREEN",
        Symbol::Blue => "BLUE",
        Symbol::Yellow => "YELLOW",
        Symbol::Cyan => "CYAN",
        Symbol::Magenta => "MAGENTA",
    }
}

/// Single-letter key for entering a symbol.
pub fn symbol_key(symbol: Symbol) -> char {
    match symbol {
        Symbol::Red => 'r',
        Symbol::Green => 'g',
        Symbol::Blue => 'b',
        Symbol::Yellow => 'y',
        Symbol::Cyan => 'c',
        Symbol::Magenta => 'm',
    }
}

/// Parse a single-letter key (case-insensitive).
pub fn symbol_from_key(key: char) -> Option<Symbol> {
    match key.to_ascii_lowercase() {
        'r' => Some(Symbol::Red),
        'g' => Some(Symbol::Green),
        'b' => Some(Symbol::Blue),
        'y' => Some(Symbol::Yellow),
        'c' => Some(Symbol::Cyan),
        'm' => Some(Symbol::Magenta),
        _ => None,
    }
}

/// Key legend for the first `colors` symbols, e.g. `r=red g=green`.
pub fn key_legend(colors: u8) -> String {
    Symbol::ALL
        .iter()
        .take(colors as usize)
        .map(|&s| format!("{}={}", symbol_key(s), s.name()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print one timed event on its own line.
pub fn print_event(event: &TickEvent) {
    match event {
        TickEvent::HighlightOn(symbol) => println!("  * {}", symbol_label(*symbol)),
        TickEvent::HighlightOff => {}
        TickEvent::AwaitInput => println!("Your turn!"),
        TickEvent::LevelStarted { level } => println!("\n--- Level {} ---", level),
        TickEvent::ReplayStarted => println!("\nWatch again..."),
    }
}

/// Short human text for a submit outcome.
pub fn describe_result(result: SubmitResult) -> &'static str {
    match result {
        SubmitResult::Continue => "ok",
        SubmitResult::LevelComplete => "level complete!",
        SubmitResult::LifeLost => "wrong! life lost",
        SubmitResult::GameOver => "wrong! game over",
        SubmitResult::Ignored => "(ignored)",
    }
}
