#![forbid(unsafe_code)]

//! Recorded algorithm steps.
//!
//! A [`StepLog`] is append-only during a run and cleared as a whole on
//! reset. Each [`AlgorithmStep`] owns a full copy of the array, so later
//! mutation of the live model can never rewrite history.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::ArrayElement;
use crate::stats::Stats;

/// What a step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    /// The unmodified input.
    Initial,
    Compare,
    Swap,
    Shift,
    /// Every element is in its final place.
    Complete,
}

/// Snapshot of the array after one yield point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlgorithmStep {
    pub kind: StepKind,
    pub array_state: Vec<ArrayElement>,
    /// Pseudocode line active at this step.
    pub line: Option<usize>,
    pub description: String,
    /// Counters accumulated up to and including this step.
    pub stats: Stats,
}

impl AlgorithmStep {
    /// Values in position order.
    #[must_use]
    pub fn values(&self) -> Vec<crate::Value> {
        self.array_state.iter().map(|e| e.value).collect()
    }
}

/// Ordered, replayable list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StepLog {
    steps: Vec<AlgorithmStep>,
}

impl StepLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: AlgorithmStep) {
        self.steps.push(step);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AlgorithmStep> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&AlgorithmStep> {
        self.steps.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&AlgorithmStep> {
        self.steps.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlgorithmStep> {
        self.steps.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[AlgorithmStep] {
        &self.steps
    }

    /// Whether the log ends in a [`StepKind::Complete`] step.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.last().is_some_and(|s| s.kind == StepKind::Complete)
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a AlgorithmStep;
    type IntoIter = std::slice::Iter<'a, AlgorithmStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl FromIterator<AlgorithmStep> for StepLog {
    fn from_iter<I: IntoIterator<Item = AlgorithmStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
