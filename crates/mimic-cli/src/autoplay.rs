//! Self-playing demo over the realtime driver.
//!
//! The engine answers its own reveals: perfect play up to a level cap, then
//! deliberate mistakes until the run ends. Exercises the full phase machine
//! end to end, which makes it a handy smoke test for the pump path.

use crate::render;
use mimic_core::{GameConfig, GameControl, GamePhase, GameSession, RealtimeDriver, Symbol};
use std::thread;
use std::time::Duration;

/// Poll cadence of the demo loop; the driver itself ticks faster.
const POLL_INTERVAL: Duration = Duration::from_millis(40);

/// Run the demo until game over, printing events and guesses.
pub fn run(config: GameConfig, seed: Option<u64>, level_cap: u32) -> anyhow::Result<()> {
    let session = match seed {
        Some(seed) => GameSession::seeded(config, seed)?,
        None => GameSession::new(config)?,
    };
    let mut driver = RealtimeDriver::spawn(session, Duration::from_millis(16));
    driver.start_game();
    println!("--- Level 1 ---");

    loop {
        thread::sleep(POLL_INTERVAL);
        for event in driver.drain_events() {
            render::print_event(&event);
        }

        let snapshot = driver.snapshot();
        match snapshot.phase {
            GamePhase::AwaitingInput => {
                let answer = driver.session().lock().sequence().to_vec();
                if snapshot.level > level_cap {
                    // walk the losing path on purpose
                    let wrong = wrong_symbol(&answer);
                    let result = driver.submit(wrong);
                    println!("  guess {} -> {}", wrong, render::describe_result(result));
                } else {
                    for symbol in answer {
                        let result = driver.submit(symbol);
                        println!("  guess {} -> {}", symbol, render::describe_result(result));
                    }
                }
            }
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    let snapshot = driver.snapshot();
    let stats = driver.session().lock().stats();
    let pump = driver.get_stats();
    driver.stop();

    println!("\n=== Demo Statistics ===");
    println!("Levels completed:  {}", stats.levels_completed);
    println!("Final score:       {}", snapshot.score);
    println!("High score:        {}", snapshot.high_score);
    println!("Inputs submitted:  {}", stats.inputs_accepted);
    println!("Pump iterations:   {}", pump.ticks);
    println!("Events delivered:  {}", pump.events_queued);

    Ok(())
}

/// Any symbol that does not match the expected first answer.
fn wrong_symbol(answer: &[Symbol]) -> Symbol {
    let expected = answer.first().copied().unwrap_or(Symbol::Red);
    Symbol::ALL
        .into_iter()
        .find(|&s| s != expected)
        .unwrap_or(Symbol::Green)
}
