#![forbid(unsafe_code)]

//! Tick-driven playback over a step source.
//!
//! A [`PlaybackController`] owns a cursor into a [`StepSource`] and at most
//! one armed [`StepTimer`]. Time enters only through [`tick`]; the caller
//! feeds elapsed durations from whatever clock it owns.
//!
//! # Invariants
//!
//! 1. At most one timer is armed. Arming always replaces the previous one.
//! 2. A timer is armed only while the mode is [`PlaybackMode::Playing`].
//! 3. `current_step` always names a step the source has produced.
//! 4. Reaching the final step of an exhausted source while playing stops
//!    playback and reports `finished`.
//!
//! # Failure Modes
//!
//! - Seeking past the last step: ignored, the cursor does not move.
//! - Empty source: `play` settles in `Stopped` without arming a timer.
//!
//! [`tick`]: PlaybackController::tick

use std::fmt;
use std::time::Duration;

use algoviz_core::StepLog;

use crate::speed::{Speed, SpeedTable};

// ---------------------------------------------------------------------------
// Step sources
// ---------------------------------------------------------------------------

/// A growable sequence of steps.
///
/// Precomputed sources hold every step up front; live sources produce
/// steps on demand and become exhausted once the run ends.
pub trait StepSource {
    /// Number of steps produced so far.
    fn available(&self) -> usize;

    /// Produce one more step. Returns `false` once nothing more will come.
    fn produce(&mut self) -> bool;

    /// Whether `produce` can never succeed again.
    fn is_exhausted(&self) -> bool;

    /// Produce steps until `index` exists. Returns whether it does.
    fn ensure(&mut self, index: usize) -> bool {
        while self.available() <= index {
            if !self.produce() {
                return false;
            }
        }
        true
    }

    /// Produce every remaining step.
    fn drain(&mut self) {
        while self.produce() {}
    }
}

impl StepSource for StepLog {
    fn available(&self) -> usize {
        self.len()
    }

    fn produce(&mut self) -> bool {
        false
    }

    fn is_exhausted(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Playback mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    /// Not started, or repositioned by a manual seek.
    #[default]
    Idle,
    /// Advancing one step per interval.
    Playing,
    /// Suspended; `play` resumes from the current step.
    Paused,
    /// Halted; `play` restarts from step 0.
    Stopped,
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        })
    }
}

/// Identity of an armed step timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Interval timer accumulating ticked time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimer {
    id: TimerId,
    interval: Duration,
    elapsed: Duration,
}

impl StepTimer {
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated toward the next step.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Consume one interval if enough time has accumulated.
    fn fire(&mut self) -> bool {
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;
        true
    }
}

/// Result of a playback operation that may move the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Steps moved forward.
    pub advanced: usize,
    /// Playback ran off the final step and stopped.
    pub finished: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Cursor, mode and timer for stepping through a [`StepSource`].
#[derive(Debug, Clone)]
pub struct PlaybackController {
    mode: PlaybackMode,
    current_step: usize,
    speed: Speed,
    table: SpeedTable,
    timer: Option<StepTimer>,
    timers_armed: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Speed::default(), SpeedTable::default())
    }
}

impl PlaybackController {
    #[must_use]
    pub fn new(speed: Speed, table: SpeedTable) -> Self {
        Self {
            mode: PlaybackMode::Idle,
            current_step: 0,
            speed,
            table,
            timer: None,
            timers_armed: 0,
        }
    }

    // ---- control ----------------------------------------------------------

    /// Start or resume playback.
    ///
    /// Restarts from step 0 when stopped or sitting on the final step. With
    /// [`Speed::Instant`] the cursor jumps to the last step and playback
    /// stops without arming a timer. Calling `play` while already playing
    /// re-arms the single timer.
    pub fn play<S: StepSource + ?Sized>(&mut self, source: &mut S) -> TickOutcome {
        if self.mode == PlaybackMode::Playing {
            self.arm();
            return TickOutcome::default();
        }
        if !source.ensure(0) {
            tracing::debug!("play requested on an empty source");
            self.halt();
            return TickOutcome::default();
        }
        if self.mode == PlaybackMode::Stopped || self.at_end(source) {
            self.current_step = 0;
        }
        if self.table.delay(self.speed).is_zero() {
            return self.jump_to_end(source);
        }
        self.mode = PlaybackMode::Playing;
        self.arm();
        tracing::debug!(step = self.current_step, speed = %self.speed, "playback started");
        if self.at_end(source) {
            self.halt();
            return TickOutcome {
                advanced: 0,
                finished: true,
            };
        }
        TickOutcome::default()
    }

    /// Suspend playback. No-op unless playing.
    pub fn pause(&mut self) {
        if self.mode != PlaybackMode::Playing {
            return;
        }
        self.disarm();
        self.mode = PlaybackMode::Paused;
        tracing::debug!(step = self.current_step, "playback paused");
    }

    /// Halt playback, keeping the cursor where it is.
    pub fn stop(&mut self) {
        self.halt();
        tracing::debug!(step = self.current_step, "playback stopped");
    }

    /// Return to step 0 in `Idle` with no timer.
    pub fn reset(&mut self) {
        self.disarm();
        self.mode = PlaybackMode::Idle;
        self.current_step = 0;
    }

    /// Move one step forward; past the last step this stops playback.
    pub fn next_step<S: StepSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if source.ensure(self.current_step + 1) {
            self.current_step += 1;
            self.leave_stopped();
            true
        } else {
            self.stop();
            false
        }
    }

    /// Move one step back. No-op at step 0.
    pub fn prev_step(&mut self) -> bool {
        if self.current_step == 0 {
            return false;
        }
        self.current_step -= 1;
        self.leave_stopped();
        true
    }

    /// Seek to `step`. Out-of-range targets are ignored.
    pub fn go_to_step<S: StepSource + ?Sized>(&mut self, source: &mut S, step: usize) -> bool {
        if !source.ensure(step) {
            tracing::debug!(step, available = source.available(), "seek out of range ignored");
            return false;
        }
        self.current_step = step;
        self.leave_stopped();
        true
    }

    /// Change speed. While playing, the timer is re-armed with the new
    /// interval, or playback completes at once for [`Speed::Instant`].
    pub fn set_speed<S: StepSource + ?Sized>(&mut self, speed: Speed, source: &mut S) -> TickOutcome {
        self.speed = speed;
        if self.mode != PlaybackMode::Playing {
            return TickOutcome::default();
        }
        if self.table.delay(speed).is_zero() {
            return self.jump_to_end(source);
        }
        self.arm();
        TickOutcome::default()
    }

    /// Replace the interval table. An armed timer picks up the new interval.
    pub fn set_speed_table(&mut self, table: SpeedTable) {
        self.table = table;
        if let Some(timer) = self.timer.as_mut() {
            timer.interval = table.delay(self.speed);
        }
    }

    /// Feed elapsed time. Advances one step per full interval.
    pub fn tick<S: StepSource + ?Sized>(&mut self, source: &mut S, dt: Duration) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.mode != PlaybackMode::Playing {
            return outcome;
        }
        let Some(timer) = self.timer.as_mut() else {
            return outcome;
        };
        if timer.interval.is_zero() {
            return self.jump_to_end(source);
        }
        timer.elapsed = timer.elapsed.saturating_add(dt);

        while self.timer.as_mut().is_some_and(StepTimer::fire) {
            if !source.ensure(self.current_step + 1) {
                self.halt();
                outcome.finished = true;
                break;
            }
            self.current_step += 1;
            outcome.advanced += 1;
            if self.at_end(source) {
                self.halt();
                outcome.finished = true;
            }
        }
        if outcome.finished {
            tracing::debug!(step = self.current_step, "playback finished");
        }
        outcome
    }

    // ---- queries ----------------------------------------------------------

    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.mode == PlaybackMode::Paused
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    #[must_use]
    pub fn speed_table(&self) -> SpeedTable {
        self.table
    }

    /// Interval for the current speed.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.table.delay(self.speed)
    }

    /// The armed timer, if any.
    #[must_use]
    pub fn active_timer(&self) -> Option<&StepTimer> {
        self.timer.as_ref()
    }

    /// Timers armed over the controller's lifetime.
    #[must_use]
    pub fn timers_armed(&self) -> u64 {
        self.timers_armed
    }

    // ---- internals --------------------------------------------------------

    fn at_end<S: StepSource + ?Sized>(&self, source: &mut S) -> bool {
        !source.ensure(self.current_step + 1)
    }

    fn jump_to_end<S: StepSource + ?Sized>(&mut self, source: &mut S) -> TickOutcome {
        source.drain();
        let last = source.available().saturating_sub(1);
        let advanced = last.saturating_sub(self.current_step);
        self.current_step = last;
        self.halt();
        tracing::debug!(step = last, "instant playback jumped to final step");
        TickOutcome {
            advanced,
            finished: true,
        }
    }

    fn arm(&mut self) {
        if let Some(old) = self.timer.take() {
            tracing::trace!(timer = old.id.get(), "timer replaced");
        }
        self.timers_armed += 1;
        let timer = StepTimer {
            id: TimerId(self.timers_armed),
            interval: self.table.delay(self.speed),
            elapsed: Duration::ZERO,
        };
        tracing::trace!(timer = timer.id.get(), interval_ms = timer.interval.as_millis() as u64, "timer armed");
        self.timer = Some(timer);
    }

    fn disarm(&mut self) {
        if let Some(old) = self.timer.take() {
            tracing::trace!(timer = old.id.get(), "timer cancelled");
        }
    }

    fn halt(&mut self) {
        self.disarm();
        self.mode = PlaybackMode::Stopped;
    }

    fn leave_stopped(&mut self) {
        if self.mode == PlaybackMode::Stopped {
            self.mode = PlaybackMode::Idle;
        }
    }
}
