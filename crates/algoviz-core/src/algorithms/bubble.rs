#![forbid(unsafe_code)]

use std::cmp::Ordering;

use super::{AlgorithmKind, SortAlgorithm};
use crate::trace::Tracer;

const PSEUDOCODE: &[&str] = &[
    "for i in 0..n:",
    "  for j in 0..n - i - 1:",
    "    if a[j] > a[j + 1]:",
    "      swap(a[j], a[j + 1])",
    "  mark a[n - i - 1] sorted",
];

/// Canonical bubble sort without early exit.
///
/// Performs exactly `n * (n - 1) / 2` comparisons and one swap per
/// inversion in the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl SortAlgorithm for BubbleSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Bubble
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn run(&self, t: &mut Tracer) {
        let n = t.len();
        for i in 0..n {
            t.line(0);
            for j in 0..n - i - 1 {
                t.line(2);
                if t.compare(j, j + 1) == Ordering::Greater {
                    t.line(3);
                    t.swap(j, j + 1);
                }
                t.release(j, j + 1);
            }
            t.line(4);
            t.mark_sorted(n - i - 1);
        }
    }
}
