//! Fixed-timestep driver for [`Game::step()`]
use crate::consts;
use crate::game::{Ending, Game, Tick};
use rand::Rng;
use std::time::{Duration, Instant};

/// Converts the irregular passage of real time between UI frames into a
/// whole number of game ticks.
///
/// Real time is banked in an accumulator and withdrawn one tick interval at a
/// time, so the snake's speed does not depend on how often frames happen.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Scheduler {
    accumulator: Duration,
    /// When the previous frame happened; `None` while stopped
    last_frame: Option<Instant>,
}

impl Scheduler {
    pub(crate) fn new() -> Scheduler {
        Scheduler::default()
    }

    /// Begin timing from `now`, discarding anything banked previously
    pub(crate) fn start(&mut self, now: Instant) {
        self.accumulator = Duration::ZERO;
        self.last_frame = Some(now);
    }

    /// Stop timing and clear the accumulator so that a later
    /// [`Scheduler::start()`] begins cleanly
    pub(crate) fn stop(&mut self) {
        self.accumulator = Duration::ZERO;
        self.last_frame = None;
    }

    /// Run as many ticks of `game` as the time since the previous frame
    /// calls for.
    ///
    /// The banked time is capped at
    /// [`MAX_FRAME_DELTA`][consts::MAX_FRAME_DELTA] so that a long stall
    /// (e.g., the process being suspended) doesn't replay a burst of ticks.
    /// The tick interval is re-read before every tick, as eating speeds the
    /// game up.  While the game is paused or over, no time is banked.
    pub(crate) fn frame<R: Rng>(&mut self, now: Instant, game: &mut Game<R>) -> Frame {
        let mut report = Frame::default();
        let Some(last) = self.last_frame.replace(now) else {
            // First frame after stopping: only establish the time base
            return report;
        };
        if !game.running() {
            self.accumulator = Duration::ZERO;
            return report;
        }
        // The whole bank is capped, leftover time included
        self.accumulator = (self.accumulator + now.saturating_duration_since(last))
            .min(consts::MAX_FRAME_DELTA);
        while game.running() && self.accumulator >= game.tick_interval() {
            self.accumulator -= game.tick_interval();
            report.ticks += 1;
            if let Tick::Ended(ending) = game.step() {
                report.ending = Some(ending);
            }
        }
        if !game.running() {
            self.accumulator = Duration::ZERO;
        }
        report
    }
}

/// What happened during a call to [`Scheduler::frame()`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Frame {
    /// Number of ticks run
    pub(crate) ticks: u32,
    /// Set if one of the ticks ended the game
    pub(crate) ending: Option<Ending>,
}
