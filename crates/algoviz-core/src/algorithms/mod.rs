#![forbid(unsafe_code)]

//! Instrumented comparison sorts.
//!
//! Every algorithm implements [`SortAlgorithm`] and runs against a
//! [`Tracer`]. The tracer's scratch values end up sorted and its event
//! stream describes every comparison and move, which the
//! [`Executor`](crate::Executor) replays one yield point at a time.
//!
//! Algorithms are deterministic: the same input always yields the same
//! event stream.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::Value;
use crate::error::ModelError;
use crate::trace::{TracedEvent, Tracer};

pub use bubble::BubbleSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

/// A sort that reports its work through a [`Tracer`].
pub trait SortAlgorithm {
    fn kind(&self) -> AlgorithmKind;

    /// Pseudocode listing; [`Tracer::line`] indices point into it.
    fn pseudocode(&self) -> &'static [&'static str];

    /// Sort the tracer's values in non-decreasing order.
    fn run(&self, tracer: &mut Tracer);
}

/// Identifier of a registered algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmKind {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl AlgorithmKind {
    /// Every registered algorithm, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
    ];

    /// Short machine name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::Heap => "heap",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
        }
    }

    /// The executor implementation for this kind.
    #[must_use]
    pub fn algorithm(self) -> &'static dyn SortAlgorithm {
        match self {
            Self::Bubble => &BubbleSort,
            Self::Selection => &SelectionSort,
            Self::Insertion => &InsertionSort,
            Self::Merge => &MergeSort,
            Self::Quick => &QuickSort,
            Self::Heap => &HeapSort,
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ModelError;

    /// Accepts `bubble`, `Bubble Sort`, `bubble-sort` and `bubble_sort` styles.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        let stem = normalized.strip_suffix("sort").unwrap_or(&normalized);
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == stem)
            .ok_or_else(|| ModelError::UnknownAlgorithm(s.to_string()))
    }
}

/// Run `kind` over `values` and return the recorded events, ending in
/// [`SortEvent::Finish`](crate::SortEvent::Finish).
#[must_use]
pub fn plan(kind: AlgorithmKind, values: &[Value]) -> Vec<TracedEvent> {
    let mut tracer = Tracer::new(values.to_vec());
    kind.algorithm().run(&mut tracer);
    tracing::trace!(algorithm = %kind, len = values.len(), "sort planned");
    tracer.finish()
}
