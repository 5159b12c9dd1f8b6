#![forbid(unsafe_code)]

//! Core: array model, instrumented sorts, and replayable step logs.
//!
//! # Role in algoviz
//! `algoviz-core` is the deterministic half of the visualizer. It knows how
//! to hold an array of tagged elements, how to run a sorting algorithm so
//! that every comparison and move is recorded, and how to turn that record
//! into a sequence of owned snapshots. It has no notion of time; the
//! runtime crate (`algoviz-runtime`) layers playback, speed and undo on top.
//!
//! # Primary responsibilities
//! - **ArrayModel**: element sequence with validated swap/shift/flag updates.
//! - **SortAlgorithm**: bubble, selection, insertion, merge, quick and heap
//!   sorts written against a [`Tracer`].
//! - **Executor**: applies a trace one yield point at a time and produces
//!   [`AlgorithmStep`]s; cancellable between steps.
//! - **StepLog**: the ordered steps of a run.
//!
//! # Example
//!
//! ```
//! use algoviz_core::{AlgorithmKind, record};
//!
//! let log = record(AlgorithmKind::Bubble, &[5, 3, 4, 1, 2]);
//! let last = log.last().unwrap();
//! assert_eq!(last.values(), vec![1, 2, 3, 4, 5]);
//! assert_eq!(last.stats.comparisons, 10);
//! ```

pub mod algorithms;
pub mod array;
pub mod element;
pub mod error;
pub mod executor;
pub mod generate;
pub mod stats;
pub mod step;
pub mod trace;

pub use algorithms::{AlgorithmKind, SortAlgorithm, plan};
pub use array::ArrayModel;
pub use element::{ArrayElement, ElementId, FlagPatch, Value, VisualFlags, VisualState};
pub use error::{ModelError, Result};
pub use executor::{Executor, ExecutorStatus, record};
pub use generate::ArrayShape;
pub use stats::Stats;
pub use step::{AlgorithmStep, StepKind, StepLog};
pub use trace::{SortEvent, TracedEvent, Tracer};
