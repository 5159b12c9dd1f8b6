#![forbid(unsafe_code)]

//! The visualizer's state in one place.
//!
//! A [`PlaybackSession`] owns the live array, the current run, the playback
//! controller and the undo history, and keeps them consistent:
//!
//! - Moving the cursor copies that step's snapshot into the live array.
//! - Editing the array (swap, undo, redo) stops playback and discards the
//!   run; the next playback operation records a fresh run from the edited
//!   array.
//! - Loading, resetting or switching algorithm rebuilds the run at once.
//!
//! A [`RunObserver`] hears about each run exactly once, when its final step
//! is first shown.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use algoviz_core::generate;
use algoviz_core::{
    AlgorithmKind, AlgorithmStep, ArrayElement, ArrayModel, FlagPatch, StepKind, StepLog, Stats,
    Value,
};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_GENERATED_LEN, SessionConfig};
use crate::error::{ConfigError, Result};
use crate::history::HistoryStack;
use crate::playback::{PlaybackController, PlaybackMode, StepSource, TickOutcome};
use crate::run::{RunMode, SortRun};
use crate::speed::{Speed, SpeedTable};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub algorithm: AlgorithmKind,
    pub element_count: usize,
    pub stats: Stats,
    /// Steps in the run, including step 0.
    pub steps: usize,
}

/// Receives run completions.
pub trait RunObserver {
    fn run_finished(&mut self, summary: &RunSummary);
}

impl<F: FnMut(&RunSummary)> RunObserver for F {
    fn run_finished(&mut self, summary: &RunSummary) {
        self(summary);
    }
}

/// What a cursor-moving operation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Steps moved forward.
    pub advanced: usize,
    /// Cursor position afterwards.
    pub step: usize,
    /// Set the first time the run's final step is reached.
    pub finished: Option<RunSummary>,
}

/// Array, run, playback and history for one visualizer.
pub struct PlaybackSession {
    config: SessionConfig,
    algorithm: AlgorithmKind,
    mode: RunMode,
    array: ArrayModel,
    /// `None` after an edit until the next playback operation.
    run: Option<SortRun>,
    controller: PlaybackController,
    history: HistoryStack<Vec<ArrayElement>>,
    rng: SmallRng,
    observer: Option<Box<dyn RunObserver>>,
    reported: bool,
}

impl fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("algorithm", &self.algorithm)
            .field("mode", &self.mode)
            .field("len", &self.array.len())
            .field("steps", &self.step_count())
            .field("controller", &self.controller)
            .field("history", &self.history)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::build(SessionConfig::default())
    }
}

impl PlaybackSession {
    /// Create a session with an empty array. The config is validated.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Ok(Self::build(config.validated()?))
    }

    fn build(config: SessionConfig) -> Self {
        let controller = PlaybackController::new(config.playback.speed, config.speed);
        let mut session = Self {
            algorithm: config.playback.algorithm,
            mode: config.playback.mode,
            array: ArrayModel::new(),
            run: None,
            controller,
            history: HistoryStack::new(config.history),
            rng: generate::rng(config.generator.seed),
            observer: None,
            reported: false,
            config,
        };
        session.rebuild();
        session
    }

    /// Swap in a new config. Speeds and history depth apply at once; the
    /// algorithm and run mode apply to the next run.
    pub fn apply_config(&mut self, config: SessionConfig) -> Result<()> {
        let config = config.validated()?;
        self.controller.set_speed_table(config.speed);
        self.history.set_config(config.history);
        self.algorithm = config.playback.algorithm;
        self.mode = config.playback.mode;
        if config.generator.seed != self.config.generator.seed {
            self.rng = generate::rng(config.generator.seed);
        }
        self.config = config;
        Ok(())
    }

    pub fn set_observer(&mut self, observer: impl RunObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // ---- array ------------------------------------------------------------

    /// Replace the array with fresh elements holding `values`.
    pub fn load(&mut self, values: &[Value]) {
        self.array.initialize(values);
        tracing::debug!(len = values.len(), "array loaded");
        self.rebuild();
    }

    /// Load `len` generated values, shaped and bounded as configured under
    /// `[generator]`. `len` may not exceed [`MAX_GENERATED_LEN`].
    pub fn randomize(&mut self, len: usize) -> Result<()> {
        if len > MAX_GENERATED_LEN {
            return Err(ConfigError::Validation(vec![format!(
                "array length must be <= {MAX_GENERATED_LEN}, got {len}"
            )])
            .into());
        }
        let generator = self.config.generator;
        let values =
            generate::shaped_values(&mut self.rng, generator.shape, len, generator.min, generator.max)?;
        self.load(&values);
        Ok(())
    }

    /// Load the current values in a random order.
    pub fn shuffle(&mut self) {
        let mut values = self.input_values();
        generate::shuffle(&mut self.rng, &mut values);
        self.load(&values);
    }

    /// Back to the run's input with fresh elements, step 0 and zero stats.
    pub fn reset(&mut self) {
        let values = self.input_values();
        self.load(&values);
    }

    /// Select the algorithm and record a new run over the current input.
    pub fn set_algorithm(&mut self, kind: AlgorithmKind) {
        self.algorithm = kind;
        self.rewind_to_input();
    }

    pub fn set_run_mode(&mut self, mode: RunMode) {
        self.mode = mode;
        self.rewind_to_input();
    }

    /// Swap two elements of the live array.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.array.swap(i, j)?;
        self.invalidate("array edited");
        Ok(())
    }

    /// Change display flags of one element. The run is kept; the next cursor
    /// move overwrites the flags with the step's own.
    pub fn update_element(&mut self, index: usize, patch: FlagPatch) -> Result<()> {
        self.array.update_element(index, patch)?;
        Ok(())
    }

    // ---- playback ---------------------------------------------------------

    pub fn play(&mut self) -> TickReport {
        let run = Self::ensure_run(&mut self.run, self.mode, self.algorithm, &self.array);
        let outcome = self.controller.play(run);
        self.after_move(outcome)
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    pub fn next_step(&mut self) -> TickReport {
        let run = Self::ensure_run(&mut self.run, self.mode, self.algorithm, &self.array);
        let moved = self.controller.next_step(run);
        self.after_move(TickOutcome {
            advanced: usize::from(moved),
            finished: false,
        })
    }

    pub fn prev_step(&mut self) -> TickReport {
        if self.run.is_some() {
            self.controller.prev_step();
        }
        self.after_move(TickOutcome::default())
    }

    /// Seek to `step`; targets past the last step are ignored.
    pub fn go_to_step(&mut self, step: usize) -> TickReport {
        let run = Self::ensure_run(&mut self.run, self.mode, self.algorithm, &self.array);
        let before = self.controller.current_step();
        self.controller.go_to_step(run, step);
        let advanced = self.controller.current_step().saturating_sub(before);
        self.after_move(TickOutcome {
            advanced,
            finished: false,
        })
    }

    pub fn set_speed(&mut self, speed: Speed) -> TickReport {
        let outcome = match self.run.as_mut() {
            Some(run) => self.controller.set_speed(speed, run),
            None => self.controller.set_speed(speed, &mut StepLog::new()),
        };
        self.after_move(outcome)
    }

    pub fn set_speed_table(&mut self, table: SpeedTable) {
        self.config.speed = table;
        self.controller.set_speed_table(table);
    }

    /// Feed elapsed time to the playback timer.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        let Some(run) = self.run.as_mut() else {
            return TickReport::default();
        };
        let outcome = self.controller.tick(run, dt);
        if outcome == TickOutcome::default() {
            return TickReport {
                step: self.controller.current_step(),
                ..TickReport::default()
            };
        }
        self.after_move(outcome)
    }

    // ---- history ----------------------------------------------------------

    /// Snapshot the live array onto the undo stack.
    pub fn save_to_history(&mut self) {
        self.history.save(self.array.snapshot());
    }

    /// Restore the previous snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let live = self.array.snapshot();
        let Some(state) = self.history.undo(&live) else {
            return false;
        };
        self.restore(&state);
        true
    }

    /// Reapply the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(state) = self.history.redo() else {
            return false;
        };
        self.restore(&state);
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ---- queries ----------------------------------------------------------

    #[must_use]
    pub fn elements(&self) -> &[ArrayElement] {
        self.array.elements()
    }

    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.array.values()
    }

    /// Counters as of the current step.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.current().map_or(Stats::ZERO, |step| step.stats)
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.controller.current_step()
    }

    /// Steps recorded so far. Live runs grow as playback advances.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.run.as_ref().map_or(0, StepSource::available)
    }

    #[must_use]
    pub fn current(&self) -> Option<&AlgorithmStep> {
        self.run.as_ref()?.step(self.controller.current_step())
    }

    #[must_use]
    pub fn log(&self) -> Option<&StepLog> {
        self.run.as_ref().map(SortRun::log)
    }

    #[must_use]
    pub fn pseudocode(&self) -> &'static [&'static str] {
        self.algorithm.algorithm().pseudocode()
    }

    /// Pseudocode line of the current step.
    #[must_use]
    pub fn active_line(&self) -> Option<usize> {
        self.current().and_then(|step| step.line)
    }

    #[must_use]
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    #[must_use]
    pub fn run_mode(&self) -> RunMode {
        self.mode
    }

    #[must_use]
    pub fn speed(&self) -> Speed {
        self.controller.speed()
    }

    #[must_use]
    pub fn playback_mode(&self) -> PlaybackMode {
        self.controller.mode()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.controller.is_paused()
    }

    #[must_use]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStack<Vec<ArrayElement>> {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ---- internals --------------------------------------------------------

    fn ensure_run<'a>(
        slot: &'a mut Option<SortRun>,
        mode: RunMode,
        kind: AlgorithmKind,
        array: &ArrayModel,
    ) -> &'a mut SortRun {
        slot.get_or_insert_with(|| SortRun::new(mode, kind, array.clone()))
    }

    /// Values the current run started from.
    fn input_values(&self) -> Vec<Value> {
        match &self.run {
            Some(run) => run.initial_values(),
            None => self.array.values(),
        }
    }

    /// Put the run's step 0 back into the live array, then record anew.
    fn rewind_to_input(&mut self) {
        if let Some(initial) = self.run.as_ref().and_then(|run| run.step(0)) {
            self.array.restore(initial.array_state.clone());
        }
        self.rebuild();
    }

    /// Drop the current run and immediately record a new one.
    fn rebuild(&mut self) {
        self.invalidate("run rebuilt");
        self.run = Some(SortRun::new(self.mode, self.algorithm, self.array.clone()));
        self.sync();
    }

    fn restore(&mut self, state: &Arc<Vec<ArrayElement>>) {
        self.array.restore(state.as_ref().clone());
        self.invalidate("history restored");
    }

    /// Stop playback and discard the run; the live array is left as is.
    fn invalidate(&mut self, reason: &'static str) {
        if self.controller.is_playing() {
            tracing::debug!(reason, step = self.controller.current_step(), "playback interrupted");
        }
        if let Some(mut run) = self.run.take() {
            run.cancel();
        }
        self.controller.reset();
        self.reported = false;
    }

    /// Copy the current step's snapshot into the live array.
    fn sync(&mut self) {
        if let Some(step) = self.current() {
            let state = step.array_state.clone();
            self.array.restore(state);
        }
    }

    fn after_move(&mut self, outcome: TickOutcome) -> TickReport {
        self.sync();
        let finished = self.check_finished();
        TickReport {
            advanced: outcome.advanced,
            step: self.controller.current_step(),
            finished,
        }
    }

    fn check_finished(&mut self) -> Option<RunSummary> {
        if self.reported {
            return None;
        }
        let step = self.current()?;
        if step.kind != StepKind::Complete {
            return None;
        }
        let summary = RunSummary {
            algorithm: self.algorithm,
            element_count: step.array_state.len(),
            stats: step.stats,
            steps: self.step_count(),
        };
        self.reported = true;
        tracing::info!(
            algorithm = %summary.algorithm,
            elements = summary.element_count,
            comparisons = summary.stats.comparisons,
            swaps = summary.stats.swaps,
            steps = summary.steps,
            "run finished"
        );
        if let Some(observer) = self.observer.as_mut() {
            observer.run_finished(&summary);
        }
        Some(summary)
    }
}
