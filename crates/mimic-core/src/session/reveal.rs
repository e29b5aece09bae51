//! Clock-pumped reveal timeline.
//!
//! Steps one reveal pass through its lit and dark segments as the session
//! pumps elapsed time in. A session owns at most one live timeline, and
//! replacing it *is* the cancellation path: segments of a discarded pass
//! can never fire again.

use crate::symbol::Symbol;
use crate::timing::RevealTiming;
use std::time::Duration;

/// Identity of one reveal pass.
///
/// Monotonically increasing per session; a new pass invalidates the previous
/// token wholesale instead of cancelling individual segment timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PassToken(pub(super) u64);

/// What the timeline did while consuming a slice of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StepEvent {
    /// The next symbol lit up.
    HighlightOn(Symbol),
    /// The current symbol went dark.
    HighlightOff,
    /// The gap after the final symbol elapsed; the pass is complete.
    Finished,
}

/// Segment kind the timeline currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Lit,
    Dark,
}

/// One reveal pass over a snapshot of the target sequence.
///
/// The first symbol is lit at construction; every later boundary is crossed
/// inside [`advance`](RevealTimeline::advance).
#[derive(Debug, Clone)]
pub(super) struct RevealTimeline {
    symbols: Vec<Symbol>,
    timing: RevealTiming,
    token: PassToken,
    index: usize,
    segment: Segment,
    remaining: Duration,
    elapsed: Duration,
    total: Duration,
    finished: bool,
}

impl RevealTimeline {
    /// Timeline over `symbols`, starting with the first symbol lit.
    pub(super) fn new(symbols: Vec<Symbol>, timing: RevealTiming, token: PassToken) -> Self {
        let total = timing.pass_duration(symbols.len());
        let finished = symbols.is_empty();
        Self {
            symbols,
            timing,
            token,
            index: 0,
            segment: Segment::Lit,
            remaining: timing.highlight(),
            elapsed: Duration::ZERO,
            total,
            finished,
        }
    }

    /// Pass identity.
    pub(super) fn token(&self) -> PassToken {
        self.token
    }

    /// First symbol of the pass (already lit on construction).
    pub(super) fn first_symbol(&self) -> Option<Symbol> {
        self.symbols.first().copied()
    }

    /// Symbol currently lit, if the timeline sits in a lit segment.
    pub(super) fn current_highlight(&self) -> Option<Symbol> {
        if self.finished || self.segment != Segment::Lit {
            return None;
        }
        self.symbols.get(self.index).copied()
    }

    /// Whether the final gap has elapsed.
    pub(super) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fraction of the pass consumed so far (`0.0..=1.0`).
    pub(super) fn progress(&self) -> f32 {
        if self.finished || self.total.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.total.as_secs_f32()).min(1.0)
    }

    /// Consume up to `dt` of elapsed time, collecting boundary events in order.
    ///
    /// Time left over past `Finished` is dropped; a completed pass has
    /// nothing else to schedule.
    pub(super) fn advance(&mut self, dt: Duration) -> Vec<StepEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }

        let mut budget = dt;
        while budget >= self.remaining {
            budget -= self.remaining;
            self.elapsed += self.remaining;

            match self.segment {
                Segment::Lit => {
                    events.push(StepEvent::HighlightOff);
                    self.segment = Segment::Dark;
                    self.remaining = self.timing.gap();
                }
                Segment::Dark => {
                    self.index += 1;
                    if self.index >= self.symbols.len() {
                        self.finished = true;
                        events.push(StepEvent::Finished);
                        return events;
                    }
                    events.push(StepEvent::HighlightOn(self.symbols[self.index]));
                    self.segment = Segment::Lit;
                    self.remaining = self.timing.highlight();
                }
            }
        }

        self.remaining -= budget;
        self.elapsed += budget;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn timeline(symbols: Vec<Symbol>) -> RevealTimeline {
        // 10ms lit, 5ms dark keeps the arithmetic easy to follow
        let timing = RevealTiming {
            highlight_ms: 10,
            gap_ms: 5,
            success_pause_ms: 1,
            failure_pause_ms: 1,
        };
        RevealTimeline::new(symbols, timing, PassToken(1))
    }

    #[test]
    fn starts_with_the_first_symbol_lit() {
        let t = timeline(vec![Symbol::Red, Symbol::Green]);
        assert_eq!(t.current_highlight(), Some(Symbol::Red));
        assert_eq!(t.first_symbol(), Some(Symbol::Red));
        assert!(!t.is_finished());
    }

    #[test]
    fn highlight_goes_dark_at_the_segment_boundary() {
        let mut t = timeline(vec![Symbol::Red, Symbol::Green]);
        let events = t.advance(Duration::from_millis(10));
        assert_eq!(events, vec![StepEvent::HighlightOff]);
        assert_eq!(t.current_highlight(), None);
    }

    #[test]
    fn crossing_the_gap_lights_the_next_symbol() {
        let mut t = timeline(vec![Symbol::Red, Symbol::Green]);
        let events = t.advance(Duration::from_millis(15));
        assert_eq!(
            events,
            vec![StepEvent::HighlightOff, StepEvent::HighlightOn(Symbol::Green)]
        );
        assert_eq!(t.current_highlight(), Some(Symbol::Green));
    }

    #[test]
    fn one_large_step_yields_the_whole_pass_in_order() {
        let mut t = timeline(vec![Symbol::Red, Symbol::Green, Symbol::Blue]);
        let events = t.advance(Duration::from_secs(1));
        assert_eq!(
            events,
            vec![
                StepEvent::HighlightOff,
                StepEvent::HighlightOn(Symbol::Green),
                StepEvent::HighlightOff,
                StepEvent::HighlightOn(Symbol::Blue),
                StepEvent::HighlightOff,
                StepEvent::Finished,
            ]
        );
        assert!(t.is_finished());
    }

    #[test]
    fn leftover_time_after_finish_is_dropped() {
        let mut t = timeline(vec![Symbol::Red]);
        t.advance(Duration::from_secs(1));
        assert!(t.is_finished());
        assert!(t.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn many_small_steps_match_one_big_step() {
        let mut small = timeline(vec![Symbol::Red, Symbol::Green]);
        let mut big = timeline(vec![Symbol::Red, Symbol::Green]);

        let mut small_events = Vec::new();
        for _ in 0..30 {
            small_events.extend(small.advance(Duration::from_millis(1)));
        }
        let big_events = big.advance(Duration::from_millis(30));

        assert_eq!(small_events, big_events);
        assert_eq!(small.is_finished(), big.is_finished());
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut t = timeline(vec![Symbol::Red, Symbol::Green, Symbol::Blue]);
        assert_abs_diff_eq!(t.progress(), 0.0, epsilon = 1e-6);

        // pass total is 3 * 15ms = 45ms
        t.advance(Duration::from_millis(20));
        assert_abs_diff_eq!(t.progress(), 20.0 / 45.0, epsilon = 1e-4);

        t.advance(Duration::from_millis(25));
        assert_abs_diff_eq!(t.progress(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn progress_is_monotone() {
        let mut t = timeline(vec![Symbol::Red, Symbol::Green, Symbol::Blue]);
        let mut last = t.progress();
        for _ in 0..50 {
            t.advance(Duration::from_millis(1));
            let now = t.progress();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn tokens_identify_passes() {
        let a = timeline(vec![Symbol::Red]);
        let timing = RevealTiming::standard();
        let b = RevealTimeline::new(vec![Symbol::Red], timing, PassToken(2));
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn empty_sequence_is_born_finished() {
        let t = timeline(Vec::new());
        assert!(t.is_finished());
        assert_eq!(t.current_highlight(), None);
        assert_abs_diff_eq!(t.progress(), 1.0, epsilon = 1e-6);
    }
}
