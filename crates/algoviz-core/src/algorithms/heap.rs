#![forbid(unsafe_code)]

use std::cmp::Ordering;

use super::{AlgorithmKind, SortAlgorithm};
use crate::trace::Tracer;

const PSEUDOCODE: &[&str] = &[
    "for start in (0..n / 2).rev(): sift_down(start, n)",
    "sift_down(root, end):",
    "  child = larger of a[2 * root + 1], a[2 * root + 2]",
    "  if a[root] < a[child]:",
    "    swap(a[root], a[child]); root = child",
    "for end in (1..n).rev():",
    "  swap(a[0], a[end]); mark a[end] sorted; sift_down(0, end)",
];

/// Heap sort over an implicit binary max-heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl SortAlgorithm for HeapSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Heap
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn run(&self, t: &mut Tracer) {
        let n = t.len();
        for start in (0..n / 2).rev() {
            t.line(0);
            sift_down(t, start, n);
        }
        for end in (1..n).rev() {
            t.line(6);
            t.swap(0, end);
            t.release(0, end);
            t.mark_sorted(end);
            sift_down(t, 0, end);
        }
        if n > 0 {
            t.mark_sorted(0);
        }
    }
}

fn sift_down(t: &mut Tracer, mut root: usize, end: usize) {
    loop {
        t.line(1);
        let mut child = 2 * root + 1;
        if child >= end {
            return;
        }
        t.line(2);
        if child + 1 < end {
            let ord = t.compare(child, child + 1);
            t.release(child, child + 1);
            if ord == Ordering::Less {
                child += 1;
            }
        }
        t.line(3);
        let ord = t.compare(root, child);
        t.release(root, child);
        if ord != Ordering::Less {
            return;
        }
        t.line(4);
        t.swap(root, child);
        t.release(root, child);
        root = child;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_with_duplicates() {
        let mut t = Tracer::new(vec![5, 1, 5, 3, 1, 9, 0, 5]);
        HeapSort.run(&mut t);
        assert_eq!(t.values(), &[0, 1, 1, 3, 5, 5, 5, 9]);
    }
}
