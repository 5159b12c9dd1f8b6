#![forbid(unsafe_code)]

use std::cmp::Ordering;

use super::{AlgorithmKind, SortAlgorithm};
use crate::trace::Tracer;

const PSEUDOCODE: &[&str] = &[
    "for i in 1..n:",
    "  j = i",
    "  while j > 0 and a[j - 1] > a[j]:",
    "    swap(a[j - 1], a[j])",
    "    j = j - 1",
];

/// Insertion sort by adjacent swaps; the key being inserted stays
/// highlighted while it travels left.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl SortAlgorithm for InsertionSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Insertion
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn run(&self, t: &mut Tracer) {
        for i in 1..t.len() {
            t.line(1);
            let mut j = i;
            t.highlight(j, true);
            while j > 0 {
                t.line(2);
                let ord = t.compare(j - 1, j);
                if ord != Ordering::Greater {
                    t.release(j - 1, j);
                    break;
                }
                t.line(3);
                t.swap(j - 1, j);
                t.release(j - 1, j);
                t.line(4);
                j -= 1;
            }
            t.highlight(j, false);
        }
    }
}
