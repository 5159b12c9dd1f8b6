#![forbid(unsafe_code)]

//! Step-wise application of a sort trace to an [`ArrayModel`].
//!
//! The [`Executor`] is the live side of a run. Each [`advance`] applies
//! pending annotation events and then exactly one yield point (compare,
//! swap or shift), producing one [`AlgorithmStep`]. Between calls the run is
//! suspended; [`cancel`] drops whatever is still pending.
//!
//! # Invariants
//!
//! 1. Events are applied whole. An observer between two `advance` calls
//!    never sees a half-performed swap or shift.
//! 2. Stats only grow during a run.
//! 3. The last step of a run that was not cancelled has kind
//!    [`StepKind::Complete`] and every element flagged `SORTED`.
//!
//! [`advance`]: Executor::advance
//! [`cancel`]: Executor::cancel

use std::collections::VecDeque;

use crate::algorithms::{AlgorithmKind, plan};
use crate::array::ArrayModel;
use crate::element::{FlagPatch, Value, VisualFlags};
use crate::error::Result;
use crate::stats::Stats;
use crate::step::{AlgorithmStep, StepKind, StepLog};
use crate::trace::{SortEvent, TracedEvent};

/// Lifecycle of an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorStatus {
    /// Events remain to be applied.
    Running,
    /// The `Finish` event has been applied.
    Finished,
    /// Stopped early; pending events were discarded.
    Cancelled,
}

/// Live executor for one algorithm run.
#[derive(Debug, Clone)]
pub struct Executor {
    kind: AlgorithmKind,
    model: ArrayModel,
    pending: VecDeque<TracedEvent>,
    stats: Stats,
    status: ExecutorStatus,
}

impl Executor {
    /// Plan a run of `kind` over the current contents of `model`.
    ///
    /// Element ids are kept; all flags are cleared first.
    #[must_use]
    pub fn new(kind: AlgorithmKind, mut model: ArrayModel) -> Self {
        model.reset_flags();
        let pending: VecDeque<TracedEvent> = plan(kind, &model.values()).into();
        tracing::debug!(
            algorithm = %kind,
            len = model.len(),
            events = pending.len(),
            "executor created"
        );
        Self {
            kind,
            model,
            pending,
            stats: Stats::ZERO,
            status: ExecutorStatus::Running,
        }
    }

    /// Plan a run over a fresh model built from `values`.
    #[must_use]
    pub fn from_values(kind: AlgorithmKind, values: &[Value]) -> Self {
        Self::new(kind, ArrayModel::from_values(values))
    }

    /// Step 0: the input before any event is applied.
    #[must_use]
    pub fn initial_step(&self) -> AlgorithmStep {
        AlgorithmStep {
            kind: StepKind::Initial,
            array_state: self.model.snapshot(),
            line: None,
            description: format!("{} on {} elements", self.kind.label(), self.model.len()),
            stats: Stats::ZERO,
        }
    }

    /// Apply events up to and including the next yield point.
    ///
    /// Returns `None` once the run is finished or cancelled.
    pub fn advance(&mut self) -> Option<AlgorithmStep> {
        if self.status != ExecutorStatus::Running {
            return None;
        }
        while let Some(traced) = self.pending.pop_front() {
            let outcome = match self.apply(traced.event) {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::error!(%err, algorithm = %self.kind, "trace event rejected by model");
                    self.cancel();
                    return None;
                }
            };
            if let Some((kind, description)) = outcome {
                return Some(AlgorithmStep {
                    kind,
                    array_state: self.model.snapshot(),
                    line: traced.line,
                    description,
                    stats: self.stats,
                });
            }
        }
        // A trace always ends in `Finish`; running dry means it was cut short.
        self.status = ExecutorStatus::Cancelled;
        None
    }

    /// Drive the run to the end, returning every step including step 0.
    #[must_use]
    pub fn run_to_completion(mut self) -> StepLog {
        let mut log = StepLog::new();
        log.push(self.initial_step());
        while let Some(step) = self.advance() {
            log.push(step);
        }
        log
    }

    /// Discard every pending event. The model keeps its current state.
    pub fn cancel(&mut self) {
        if self.status == ExecutorStatus::Running {
            tracing::debug!(
                algorithm = %self.kind,
                discarded = self.pending.len(),
                "executor cancelled"
            );
            self.status = ExecutorStatus::Cancelled;
        }
        self.pending.clear();
    }

    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    #[must_use]
    pub fn model(&self) -> &ArrayModel {
        &self.model
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[must_use]
    pub fn status(&self) -> ExecutorStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == ExecutorStatus::Finished
    }

    /// Events not applied yet.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Apply one event. Yield points and `Finish` return the step they end.
    fn apply(&mut self, event: SortEvent) -> Result<Option<(StepKind, String)>> {
        let model = &mut self.model;
        match event {
            SortEvent::Compare { a, b } => {
                let mark = FlagPatch::new().set(VisualFlags::COMPARING);
                model.update_element(a, mark)?;
                model.update_element(b, mark)?;
                self.stats.comparisons += 1;
                let description = format!("Compare {} and {}", value(model, a), value(model, b));
                Ok(Some((StepKind::Compare, description)))
            }
            SortEvent::Swap { a, b } => {
                let mark = FlagPatch::new().set(VisualFlags::SWAPPING);
                model.update_element(a, mark)?;
                model.update_element(b, mark)?;
                let description = format!("Swap {} and {}", value(model, a), value(model, b));
                model.swap(a, b)?;
                self.stats.swaps += 1;
                Ok(Some((StepKind::Swap, description)))
            }
            SortEvent::Shift { from, to } => {
                model.update_element(from, FlagPatch::new().set(VisualFlags::SWAPPING))?;
                let description = format!(
                    "Move {} from position {from} to {to}",
                    value(model, from)
                );
                model.shift(from, to)?;
                self.stats.writes += 1;
                Ok(Some((StepKind::Shift, description)))
            }
            SortEvent::Highlight { index, on } => {
                let patch = if on {
                    FlagPatch::new().set(VisualFlags::HIGHLIGHTED)
                } else {
                    FlagPatch::new().clear(VisualFlags::HIGHLIGHTED)
                };
                model.update_element(index, patch)?;
                Ok(None)
            }
            SortEvent::Release { a, b } => {
                let clear = FlagPatch::new().clear(VisualFlags::COMPARING | VisualFlags::SWAPPING);
                model.update_element(a, clear)?;
                model.update_element(b, clear)?;
                Ok(None)
            }
            SortEvent::MarkSorted { index } => {
                model.update_element(index, FlagPatch::new().set(VisualFlags::SORTED))?;
                Ok(None)
            }
            SortEvent::Finish => {
                model.mark_all_sorted();
                self.status = ExecutorStatus::Finished;
                tracing::debug!(
                    algorithm = %self.kind,
                    comparisons = self.stats.comparisons,
                    swaps = self.stats.swaps,
                    writes = self.stats.writes,
                    "executor finished"
                );
                Ok(Some((StepKind::Complete, "Array sorted".to_string())))
            }
        }
    }
}

fn value(model: &ArrayModel, index: usize) -> Value {
    model.get(index).map_or(0, |e| e.value)
}

/// Run `kind` over `values` and return the full step log.
#[must_use]
pub fn record(kind: AlgorithmKind, values: &[Value]) -> StepLog {
    Executor::from_values(kind, values).run_to_completion()
}
