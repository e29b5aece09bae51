//! Command-line argument parsing for the mimic CLI.
//!
//! This module handles parsing and validation of CLI arguments including:
//! - Game rule overrides (colors, lives, seed)
//! - Reveal pacing selection
//! - High-score and config file paths
//! - Help text generation

use std::env;
use std::fmt;

/// Available reveal pacings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaceChoice {
    /// Classic pacing (600ms highlight, 300ms gap)
    Standard,
    /// Fast pacing for demos
    Quick,
}

impl PaceChoice {
    /// Parse pacing choice from string argument.
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "standard" => Some(PaceChoice::Standard),
            "quick" => Some(PaceChoice::Quick),
            _ => None,
        }
    }

    /// Get string representation of pacing choice.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceChoice::Standard => "standard",
            PaceChoice::Quick => "quick",
        }
    }
}

impl fmt::Display for PaceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed command-line arguments.
#[derive(Debug)]
pub struct CliArgs {
    /// Fixed RNG seed (None = OS entropy)
    pub seed: Option<u64>,
    /// Alphabet size override (None = config default)
    pub colors: Option<u8>,
    /// Lives override (None = config default)
    pub lives: Option<u8>,
    /// Reveal pacing override (None = config default)
    pub pace: Option<PaceChoice>,
    /// High-score file path (None = default location)
    pub scores_path: Option<String>,
    /// Rules file to load before applying overrides
    pub config_path: Option<String>,
    /// Run the self-playing demo instead of the interactive game
    pub autoplay: bool,
    /// Levels the demo plays cleanly before failing on purpose
    pub autoplay_levels: u32,
    /// Whether help was requested
    pub show_help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            seed: None,
            colors: None,
            lives: None,
            pace: None,
            scores_path: None,
            config_path: None,
            autoplay: false,
            autoplay_levels: 4,
            show_help: false,
        }
    }
}

impl CliArgs {
    /// Parse arguments from command line.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments from an explicit iterator (testable core of `parse`).
    pub fn parse_from<I: Iterator<Item = String>>(mut iter: I) -> Self {
        let mut args = Self::default();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seed" => {
                    args.seed = parse_value(&mut iter, "--seed", &mut args.show_help);
                }
                "--colors" => {
                    args.colors = parse_value(&mut iter, "--colors", &mut args.show_help);
                }
                "--lives" => {
                    args.lives = parse_value(&mut iter, "--lives", &mut args.show_help);
                }
                "--levels" => {
                    if let Some(levels) = parse_value(&mut iter, "--levels", &mut args.show_help) {
                        args.autoplay_levels = levels;
                    }
                }
                "--pace" => {
                    if let Some(value) = iter.next() {
                        if let Some(choice) = PaceChoice::from_str(&value) {
                            args.pace = Some(choice);
                        } else {
                            eprintln!("Unknown pace: {}", value);
                            args.show_help = true;
                        }
                    } else {
                        eprintln!("--pace requires an argument (standard|quick)");
                        args.show_help = true;
                    }
                }
                _ if arg.starts_with("--pace=") => {
                    let value = &arg[7..];
                    if let Some(choice) = PaceChoice::from_str(value) {
                        args.pace = Some(choice);
                    } else {
                        eprintln!("Unknown pace: {}", value);
                        args.show_help = true;
                    }
                }
                "--scores" => {
                    if let Some(value) = iter.next() {
                        args.scores_path = Some(value);
                    } else {
                        eprintln!("--scores requires a file path");
                        args.show_help = true;
                    }
                }
                "--config" => {
                    if let Some(value) = iter.next() {
                        args.config_path = Some(value);
                    } else {
                        eprintln!("--config requires a file path");
                        args.show_help = true;
                    }
                }
                "--autoplay" => {
                    args.autoplay = true;
                }
                "--help" | "-h" => {
                    args.show_help = true;
                }
                _ => {
                    eprintln!("Unknown flag: {}", arg);
                    args.show_help = true;
                }
            }
        }

        args
    }

    /// Print help text to stderr.
    pub fn print_help() {
        eprintln!(
            "Usage:\n  mimic [--pace <mode>] [--colors <n>] [--lives <n>] [--seed <n>] [--autoplay]\n\n\
             Flags:\n\
             \x20 --pace <mode>     Reveal pacing:\n\
             \x20                     - standard (default: 600ms highlight, 300ms gap)\n\
             \x20                     - quick\n\
             \x20 --colors <n>      Alphabet size, 2..=6 (default 4)\n\
             \x20 --lives <n>       Lives per run, 1..=9 (default 3)\n\
             \x20 --seed <n>        Fixed RNG seed for a reproducible game\n\
             \x20 --config <file>   Load rules from a JSON file before overrides\n\
             \x20 --scores <file>   High-score file (default mimic_scores.json)\n\
             \x20 --autoplay        Let the engine play itself through the realtime driver\n\
             \x20 --levels <n>      Levels autoplay clears before failing on purpose (default 4)\n\
             \x20 -h, --help        Show this help\n\n\
             In Game:\n\
             \x20 Watch the reveal, then type the sequence using the single-letter keys\n\
             \x20 shown at the prompt (e.g. 'rgb' or 'r g b') and press Enter.\n\
             \x20 Type 'quit' to leave.\n\n\
             Examples:\n\
             \x20 mimic                          # Classic four-color game\n\
             \x20 mimic --colors 6 --pace quick  # Harder and faster\n\
             \x20 mimic --autoplay --seed 7      # Watch a reproducible demo\n"
        );
    }
}

/// Parse the next token as a number, flagging help on failure.
fn parse_value<T, I>(iter: &mut I, flag: &str, show_help: &mut bool) -> Option<T>
where
    T: std::str::FromStr,
    I: Iterator<Item = String>,
{
    match iter.next() {
        Some(value) => match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                eprintln!("{} expects a number, got: {}", flag, value);
                *show_help = true;
                None
            }
        },
        None => {
            eprintln!("{} requires an argument", flag);
            *show_help = true;
            None
        }
    }
}
