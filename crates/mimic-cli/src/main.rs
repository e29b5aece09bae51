//! Sequence-memory trainer for the terminal.
//!
//! Interactive game over the engine's realtime driver featuring:
//! - Timed text reveal of the growing symbol sequence
//! - Single-letter answer entry with immediate feedback
//! - Lives, levels and a high score persisted to a JSON file
//! - Self-playing demo mode (`--autoplay`)

mod args;
mod autoplay;
mod render;

use args::{CliArgs, PaceChoice};
use mimic_core::{
    GameConfig, GameControl, GamePhase, GameSession, JsonFileStore, RealtimeDriver, RevealTiming,
};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

/// High-score file used when `--scores` is not given.
const DEFAULT_SCORES_PATH: &str = "mimic_scores.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("Mimic - Sequence Memory Trainer");
    println!("================================\n");

    // Parse command-line arguments
    let args = CliArgs::parse();

    if args.show_help {
        CliArgs::print_help();
        return Ok(());
    }

    let config = build_config(&args)?;
    tracing::debug!("effective config: {:?}", config);
    println!("Game Configuration:");
    println!("  Colors:    {} ({})", config.symbols, render::key_legend(config.symbols));
    println!("  Lives:     {}", config.max_lives);
    println!(
        "  Sequence:  starts at {}, grows to {}",
        config.base_length, config.max_length
    );
    println!(
        "  Pacing:    {}ms highlight, {}ms gap\n",
        config.timing.highlight_ms, config.timing.gap_ms
    );

    if args.autoplay {
        return autoplay::run(config, args.seed, args.autoplay_levels);
    }

    run_interactive(config, &args)
}

/// Build the effective config: file rules first, then flag overrides.
fn build_config(args: &CliArgs) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config_path {
        Some(path) => GameConfig::from_json_file(Path::new(path))?,
        None => GameConfig::default(),
    };

    if let Some(colors) = args.colors {
        config.symbols = colors;
    }
    if let Some(lives) = args.lives {
        config.max_lives = lives;
    }
    if let Some(pace) = args.pace {
        config.timing = match pace {
            PaceChoice::Standard => RevealTiming::standard(),
            PaceChoice::Quick => RevealTiming::quick(),
        };
    }
    config.validate()?;
    Ok(config)
}

/// Interactive game loop: the driver pumps the clock, we print events and
/// feed typed answers back in.
fn run_interactive(config: GameConfig, args: &CliArgs) -> anyhow::Result<()> {
    let colors = config.symbols;
    let mut session = match args.seed {
        Some(seed) => GameSession::seeded(config, seed)?,
        None => GameSession::new(config)?,
    };

    let scores_path = args.scores_path.as_deref().unwrap_or(DEFAULT_SCORES_PATH);
    session.set_store(Box::new(JsonFileStore::new(scores_path)));
    if session.high_score() > 0 {
        println!("High score to beat: {}\n", session.high_score());
    }

    let mut driver = RealtimeDriver::spawn(session, Duration::from_millis(16));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Watch the sequence, then type it back. 'quit' leaves.\n");
    driver.start_game();
    println!("--- Level 1 ---");

    'game: loop {
        std::thread::sleep(Duration::from_millis(30));
        for event in driver.drain_events() {
            render::print_event(&event);
        }

        let snapshot = driver.snapshot();
        match snapshot.phase {
            GamePhase::AwaitingInput => {
                print!(
                    "[{}] ({}/{}) > ",
                    render::key_legend(colors),
                    snapshot.input_len,
                    snapshot.sequence_len
                );
                io::stdout().flush()?;

                let line = match lines.next() {
                    Some(line) => line?,
                    None => break 'game, // EOF
                };
                let trimmed = line.trim();
                if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("q") {
                    break 'game;
                }

                for key in trimmed.chars().filter(|c| !c.is_whitespace()) {
                    match render::symbol_from_key(key) {
                        Some(symbol) => {
                            let result = driver.submit(symbol);
                            println!("  {} -> {}", symbol, render::describe_result(result));
                        }
                        None => println!("  '{}' is not a symbol key, skipped", key),
                    }
                }
            }
            GamePhase::GameOver => {
                println!("\nGame over! Score: {}  High score: {}", snapshot.score, snapshot.high_score);
                print!("Play again? [y/N] > ");
                io::stdout().flush()?;

                let line = match lines.next() {
                    Some(line) => line?,
                    None => break 'game,
                };
                if line.trim().eq_ignore_ascii_case("y") {
                    driver.start_game();
                    println!("--- Level 1 ---");
                } else {
                    break 'game;
                }
            }
            _ => {}
        }
    }

    // reset commits an unfinished run's score before we shut down
    driver.reset_game();
    let stats = driver.session().lock().stats();
    let high_score = driver.snapshot().high_score;
    driver.stop();

    println!("\n=== Session Statistics ===");
    println!("Games played:      {}", stats.games_started);
    println!("Levels completed:  {}", stats.levels_completed);
    println!("Inputs accepted:   {}", stats.inputs_accepted);
    println!("Mismatches:        {}", stats.mismatches);
    println!("High score:        {}", high_score);
    println!("\nThanks for playing!");

    Ok(())
}
