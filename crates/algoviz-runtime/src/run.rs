#![forbid(unsafe_code)]

//! One algorithm run exposed as a [`StepSource`].

use algoviz_core::{
    AlgorithmKind, AlgorithmStep, ArrayModel, Executor, StepLog, Value,
};
use serde::{Deserialize, Serialize};

use crate::playback::StepSource;

/// When steps are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Steps are produced as playback reaches them.
    #[default]
    Live,
    /// The whole run is recorded before playback begins.
    Precomputed,
}

/// Steps recorded so far plus, for live runs, the executor producing more.
#[derive(Debug, Clone)]
pub struct SortRun {
    kind: AlgorithmKind,
    mode: RunMode,
    log: StepLog,
    executor: Option<Executor>,
}

impl SortRun {
    /// Start a run of `kind` over `model`. Step 0 is recorded immediately.
    #[must_use]
    pub fn new(mode: RunMode, kind: AlgorithmKind, model: ArrayModel) -> Self {
        let executor = Executor::new(kind, model);
        let mut run = Self {
            kind,
            mode,
            log: StepLog::new(),
            executor: None,
        };
        run.log.push(executor.initial_step());
        match mode {
            RunMode::Live => run.executor = Some(executor),
            RunMode::Precomputed => {
                let log = executor.run_to_completion();
                run.log = log;
            }
        }
        tracing::debug!(algorithm = %kind, ?mode, steps = run.log.len(), "run started");
        run
    }

    #[must_use]
    pub fn live(kind: AlgorithmKind, model: ArrayModel) -> Self {
        Self::new(RunMode::Live, kind, model)
    }

    #[must_use]
    pub fn precomputed(kind: AlgorithmKind, model: ArrayModel) -> Self {
        Self::new(RunMode::Precomputed, kind, model)
    }

    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    #[must_use]
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&AlgorithmStep> {
        self.log.get(index)
    }

    #[must_use]
    pub fn log(&self) -> &StepLog {
        &self.log
    }

    #[must_use]
    pub fn into_log(self) -> StepLog {
        self.log
    }

    /// Input values as recorded in step 0.
    #[must_use]
    pub fn initial_values(&self) -> Vec<Value> {
        self.log.first().map(AlgorithmStep::values).unwrap_or_default()
    }

    /// Whether the final step has been recorded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.log.is_complete()
    }

    /// Stop producing steps. Steps already recorded stay available.
    pub fn cancel(&mut self) {
        if let Some(mut executor) = self.executor.take() {
            executor.cancel();
            tracing::debug!(algorithm = %self.kind, steps = self.log.len(), "run cancelled");
        }
    }
}

impl StepSource for SortRun {
    fn available(&self) -> usize {
        self.log.len()
    }

    fn produce(&mut self) -> bool {
        let Some(executor) = self.executor.as_mut() else {
            return false;
        };
        match executor.advance() {
            Some(step) => {
                self.log.push(step);
                true
            }
            None => {
                self.executor = None;
                false
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.executor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{StepKind, record};

    const INPUT: [Value; 5] = [5, 3, 4, 1, 2];

    #[test]
    fn live_run_starts_with_initial_step_only() {
        let run = SortRun::live(AlgorithmKind::Bubble, ArrayModel::from_values(&INPUT));
        assert_eq!(run.available(), 1);
        assert_eq!(run.step(0).map(|s| s.kind), Some(StepKind::Initial));
        assert!(!run.is_exhausted());
    }

    #[test]
    fn precomputed_run_is_exhausted_up_front() {
        let run = SortRun::precomputed(AlgorithmKind::Bubble, ArrayModel::from_values(&INPUT));
        assert!(run.is_exhausted());
        assert!(run.is_complete());
        assert_eq!(run.log(), &record(AlgorithmKind::Bubble, &INPUT));
    }

    #[test]
    fn drained_live_run_equals_precomputed() {
        for kind in AlgorithmKind::ALL {
            let mut live = SortRun::live(kind, ArrayModel::from_values(&INPUT));
            live.drain();
            let pre = SortRun::precomputed(kind, ArrayModel::from_values(&INPUT));
            assert_eq!(live.log(), pre.log(), "{kind}");
            assert!(live.is_exhausted());
        }
    }

    #[test]
    fn ensure_produces_lazily() {
        let mut run = SortRun::live(AlgorithmKind::Insertion, ArrayModel::from_values(&INPUT));
        assert!(run.ensure(3));
        assert_eq!(run.available(), 4);
        assert!(!run.ensure(10_000));
        assert!(run.is_exhausted());
    }

    #[test]
    fn cancel_keeps_recorded_steps() {
        let mut run = SortRun::live(AlgorithmKind::Merge, ArrayModel::from_values(&INPUT));
        run.ensure(2);
        run.cancel();
        assert_eq!(run.available(), 3);
        assert!(!run.produce());
        assert!(!run.is_complete());
    }

    #[test]
    fn initial_values_come_from_step_zero() {
        let mut run = SortRun::live(AlgorithmKind::Heap, ArrayModel::from_values(&INPUT));
        run.drain();
        assert_eq!(run.initial_values(), INPUT.to_vec());
    }
}
