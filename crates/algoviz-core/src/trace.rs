#![forbid(unsafe_code)]

//! Instrumentation layer between sort algorithms and the executor.
//!
//! Algorithms never touch an [`ArrayModel`](crate::ArrayModel) directly. They
//! operate on a [`Tracer`], which owns a scratch copy of the values and
//! records a [`SortEvent`] for every operation it performs. Because the
//! scratch mutation and the recorded event come from the same call, the
//! event stream always describes exactly what the algorithm did.
//!
//! Events split into two classes:
//!
//! - **Yield points** (`Compare`, `Swap`, `Shift`): each one ends a step.
//! - **Annotations** (`Highlight`, `Release`, `MarkSorted`, `Finish`):
//!   applied together with the next yield point.

use std::cmp::Ordering;

use crate::element::Value;

/// One recorded algorithm operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortEvent {
    /// Compare the elements at `a` and `b`.
    Compare { a: usize, b: usize },
    /// Swap the elements at `a` and `b`.
    Swap { a: usize, b: usize },
    /// Move the element at `from` to `to`, shifting the range between.
    Shift { from: usize, to: usize },
    /// Turn the highlight bit on or off.
    Highlight { index: usize, on: bool },
    /// Clear the comparing and swapping bits at `a` and `b`.
    Release { a: usize, b: usize },
    /// Element at `index` reached its final position.
    MarkSorted { index: usize },
    /// Algorithm finished; everything is sorted.
    Finish,
}

impl SortEvent {
    /// Whether the executor should suspend after applying this event.
    #[must_use]
    pub fn is_yield_point(&self) -> bool {
        matches!(
            self,
            Self::Compare { .. } | Self::Swap { .. } | Self::Shift { .. }
        )
    }
}

/// A recorded event plus the pseudocode line active when it was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracedEvent {
    pub event: SortEvent,
    pub line: Option<usize>,
}

/// Scratch array plus event recorder handed to [`crate::SortAlgorithm::run`].
#[derive(Debug, Clone)]
pub struct Tracer {
    values: Vec<Value>,
    events: Vec<TracedEvent>,
    line: Option<usize>,
}

impl Tracer {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            events: Vec::new(),
            line: None,
        }
    }

    /// Number of values being sorted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read a value without recording anything.
    #[must_use]
    pub fn value(&self, index: usize) -> Value {
        self.values[index]
    }

    /// Set the pseudocode line attached to subsequent events.
    pub fn line(&mut self, line: usize) {
        self.line = Some(line);
    }

    /// Compare `values[a]` with `values[b]`, recording a yield point.
    pub fn compare(&mut self, a: usize, b: usize) -> Ordering {
        self.record(SortEvent::Compare { a, b });
        self.values[a].cmp(&self.values[b])
    }

    /// Swap `values[a]` and `values[b]`, recording a yield point.
    /// Swapping an index with itself records nothing.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.values.swap(a, b);
        self.record(SortEvent::Swap { a, b });
    }

    /// Move `values[from]` to `to`, recording a yield point.
    pub fn shift(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let value = self.values.remove(from);
        self.values.insert(to, value);
        self.record(SortEvent::Shift { from, to });
    }

    pub fn highlight(&mut self, index: usize, on: bool) {
        self.record(SortEvent::Highlight { index, on });
    }

    pub fn release(&mut self, a: usize, b: usize) {
        self.record(SortEvent::Release { a, b });
    }

    pub fn mark_sorted(&mut self, index: usize) {
        self.record(SortEvent::MarkSorted { index });
    }

    /// Scratch values in their current order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Close the trace with a `Finish` event and hand back the events.
    #[must_use]
    pub fn finish(mut self) -> Vec<TracedEvent> {
        self.line = None;
        self.record(SortEvent::Finish);
        self.events
    }

    fn record(&mut self, event: SortEvent) {
        self.events.push(TracedEvent {
            event,
            line: self.line,
        });
    }
}
