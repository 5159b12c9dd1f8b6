#![forbid(unsafe_code)]

use std::cmp::Ordering;

use super::{AlgorithmKind, SortAlgorithm};
use crate::trace::Tracer;

const PSEUDOCODE: &[&str] = &[
    "merge_sort(lo, hi):",
    "  if hi - lo < 2: return",
    "  mid = (lo + hi) / 2",
    "  merge_sort(lo, mid); merge_sort(mid, hi)",
    "  i = lo; j = mid",
    "  while i < j and j < hi:",
    "    if a[i] <= a[j]: i += 1",
    "    else: move a[j] to i; i += 1; j += 1",
];

/// Top-down merge sort with an in-place merge.
///
/// Instead of writing values through a buffer, the merge relocates the
/// smaller right-run element in front of the left run with a shift. Element
/// identities therefore survive the sort and no value is ever duplicated on
/// screen. Stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl SortAlgorithm for MergeSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Merge
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn run(&self, t: &mut Tracer) {
        let n = t.len();
        sort(t, 0, n);
    }
}

fn sort(t: &mut Tracer, lo: usize, hi: usize) {
    t.line(1);
    if hi - lo < 2 {
        return;
    }
    t.line(2);
    let mid = lo + (hi - lo) / 2;
    t.line(3);
    sort(t, lo, mid);
    sort(t, mid, hi);
    merge(t, lo, mid, hi);
}

fn merge(t: &mut Tracer, lo: usize, mid: usize, hi: usize) {
    t.line(4);
    let (mut i, mut j) = (lo, mid);
    while i < j && j < hi {
        t.line(5);
        if t.compare(i, j) != Ordering::Greater {
            t.line(6);
            t.release(i, j);
            i += 1;
        } else {
            t.line(7);
            t.shift(j, i);
            t.release(i, i + 1);
            i += 1;
            j += 1;
        }
    }
}
