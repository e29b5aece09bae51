//! Background pump driver.
//!
//! Wraps a session in `Arc<Mutex<..>>` and advances its clock from a
//! dedicated thread, so interactive frontends do not need their own frame
//! loop. Timed events are queued for the UI to drain at its leisure; the
//! pump thread stops when the driver is dropped.
//!
//! Requires the `realtime` feature (enabled by default).

use crate::session::{
    GameControl, GamePhase, GameSessionGeneric, GameSnapshot, SubmitResult, TickEvent,
};
use crate::symbol::{Symbol, SymbolSource};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Cap on undrained events before the oldest are discarded.
const EVENT_QUEUE_MAX: usize = 256;

/// Pump statistics for monitoring a driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverStats {
    /// Pump iterations performed.
    pub ticks: u64,
    /// Events delivered into the queue.
    pub events_queued: u64,
    /// Events discarded because the queue was full.
    pub events_dropped: u64,
}

/// Background pump around a shared game session.
///
/// The driver implements [`GameControl`], so frontends can treat it exactly
/// like a session they pump themselves. For anything beyond the control
/// surface, [`session`](RealtimeDriver::session) hands out the shared
/// handle.
pub struct RealtimeDriver<S: SymbolSource + Send + 'static> {
    session: Arc<Mutex<GameSessionGeneric<S>>>,
    events: Arc<Mutex<VecDeque<TickEvent>>>,
    stats: Arc<Mutex<DriverStats>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl<S: SymbolSource + Send + 'static> RealtimeDriver<S> {
    /// Spawn the pump thread over `session`, ticking roughly every `interval`.
    ///
    /// The pump measures real elapsed time between iterations, so a late
    /// wakeup only coarsens event timing and never loses it.
    pub fn spawn(session: GameSessionGeneric<S>, interval: Duration) -> Self {
        let session = Arc::new(Mutex::new(session));
        let events = Arc::new(Mutex::new(VecDeque::new()));
        let stats = Arc::new(Mutex::new(DriverStats::default()));
        let running = Arc::new(AtomicBool::new(true));

        let pump_session = Arc::clone(&session);
        let pump_events = Arc::clone(&events);
        let pump_stats = Arc::clone(&stats);
        let pump_running = Arc::clone(&running);

        let handle = thread::spawn(move || {
            tracing::debug!("pump thread started ({}ms interval)", interval.as_millis());
            let mut last = Instant::now();

            while pump_running.load(Ordering::Relaxed) {
                thread::sleep(interval);
                let now = Instant::now();
                // The queue is filled while the session lock is still held:
                // a restart clears the queue under the same lock, so a batch
                // from before the restart can never land after its clear.
                let mut session = pump_session.lock();
                let fired = session.tick(now - last);
                last = now;

                let mut stats = pump_stats.lock();
                stats.ticks += 1;
                if fired.is_empty() {
                    continue;
                }

                let mut queue = pump_events.lock();
                for event in fired {
                    if queue.len() >= EVENT_QUEUE_MAX {
                        queue.pop_front();
                        stats.events_dropped += 1;
                    }
                    queue.push_back(event);
                    stats.events_queued += 1;
                }
            }
            tracing::debug!("pump thread stopped");
        });

        Self {
            session,
            events,
            stats,
            running,
            handle: Some(handle),
        }
    }

    /// Shared handle to the underlying session.
    ///
    /// Hold the lock briefly; the pump thread takes it on every tick.
    pub fn session(&self) -> Arc<Mutex<GameSessionGeneric<S>>> {
        Arc::clone(&self.session)
    }

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&self) -> Vec<TickEvent> {
        self.events.lock().drain(..).collect()
    }

    /// Point-in-time view of the session.
    pub fn snapshot(&self) -> GameSnapshot {
        self.session.lock().snapshot()
    }

    /// Pump statistics so far.
    pub fn get_stats(&self) -> DriverStats {
        *self.stats.lock()
    }

    /// Stop the pump thread and join it.
    ///
    /// Idempotent; also runs on drop.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl<S: SymbolSource + Send + 'static> GameControl for RealtimeDriver<S> {
    fn start_game(&mut self) {
        // The session clears its own undrained events on restart; the queue
        // mirror here holds copies and needs the same treatment.
        let mut session = self.session.lock();
        session.start_game();
        self.events.lock().clear();
    }

    fn reset_game(&mut self) {
        let mut session = self.session.lock();
        session.reset_game();
        self.events.lock().clear();
    }

    fn submit(&mut self, symbol: Symbol) -> SubmitResult {
        self.session.lock().submit(symbol)
    }

    fn phase(&self) -> GamePhase {
        self.session.lock().phase()
    }
}

impl<S: SymbolSource + Send + 'static> Drop for RealtimeDriver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::session::GameSession;
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

    #[test]
    fn pump_reveals_without_host_ticking() {
        let session = GameSession::seeded(fast_config(), 99).unwrap();
        let mut driver = RealtimeDriver::spawn(session, Duration::from_millis(5));

        driver.start_game();
        // a 3-symbol reveal at 15ms per symbol finishes well within this
        thread::sleep(Duration::from_millis(250));

        assert_eq!(driver.phase(), GamePhase::AwaitingInput);
        let events = driver.drain_events();
        assert!(matches!(events.first(), Some(TickEvent::HighlightOn(_))));
        assert_eq!(events.last(), Some(&TickEvent::AwaitInput));

        let stats = driver.get_stats();
        assert!(stats.ticks > 0);
        assert!(stats.events_queued >= events.len() as u64);
        driver.stop();
    }

    #[test]
    fn driver_submits_through_the_control_trait() {
        let session = GameSession::seeded(fast_config(), 7).unwrap();
        let mut driver = RealtimeDriver::spawn(session, Duration::from_millis(5));

        driver.start_game();
        thread::sleep(Duration::from_millis(250));
        assert_eq!(driver.phase(), GamePhase::AwaitingInput);

        let answer = driver.session().lock().sequence().to_vec();
        let mut last = SubmitResult::Ignored;
        for symbol in answer {
            last = driver.submit(symbol);
        }
        assert_eq!(last, SubmitResult::LevelComplete);
        assert_eq!(driver.snapshot().score, 30);
    }

    #[test]
    fn restart_drops_queued_events_from_the_abandoned_run() {
        let script = vec![
            Symbol::Red,
            Symbol::Green,
            Symbol::Blue,
            Symbol::Yellow,
            Symbol::Cyan,
            Symbol::Magenta,
        ];
        let session =
            GameSessionGeneric::with_source(fast_config(), ScriptedSource::new(script)).unwrap();
        let mut driver = RealtimeDriver::spawn(session, Duration::from_millis(5));

        driver.start_game();
        // the first run reveals [Red, Green, Blue]; let the queue fill with it
        thread::sleep(Duration::from_millis(100));
        driver.start_game();

        // the second run draws [Yellow, Cyan, Magenta], so a highlight from
        // the first three colors can only be a leak from the abandoned run
        for event in driver.drain_events() {
            if let TickEvent::HighlightOn(symbol) = event {
                assert!(
                    !matches!(symbol, Symbol::Red | Symbol::Green | Symbol::Blue),
                    "stale highlight {symbol:?} survived the restart"
                );
            }
        }
        driver.stop();
    }

    #[test]
    fn stop_is_idempotent_and_runs_on_drop() {
        let session = GameSession::seeded(fast_config(), 1).unwrap();
        let mut driver = RealtimeDriver::spawn(session, Duration::from_millis(5));
        driver.stop();
        driver.stop();
        // dropping after an explicit stop must not hang or panic
    }
}
