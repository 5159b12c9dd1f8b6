#![forbid(unsafe_code)]

use std::cmp::Ordering;

use super::{AlgorithmKind, SortAlgorithm};
use crate::trace::Tracer;

const PSEUDOCODE: &[&str] = &[
    "quick_sort(lo, hi):",
    "  pivot = a[hi - 1]; i = lo",
    "  for j in lo..hi - 1:",
    "    if a[j] < pivot:",
    "      swap(a[i], a[j]); i += 1",
    "  swap(a[i], a[hi - 1]); mark a[i] sorted",
    "  quick_sort(lo, i); quick_sort(i + 1, hi)",
];

/// Quick sort with Lomuto partitioning on the last element.
///
/// The pivot is highlighted while its partition runs. The smaller side is
/// sorted recursively and the larger one iteratively, so recursion depth
/// stays logarithmic even on sorted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl SortAlgorithm for QuickSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Quick
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn run(&self, t: &mut Tracer) {
        let n = t.len();
        sort(t, 0, n);
    }
}

fn sort(t: &mut Tracer, mut lo: usize, mut hi: usize) {
    loop {
        t.line(0);
        match hi - lo {
            0 => return,
            1 => {
                t.mark_sorted(lo);
                return;
            }
            _ => {}
        }
        let p = partition(t, lo, hi);
        t.line(6);
        if p - lo < hi - p - 1 {
            sort(t, lo, p);
            lo = p + 1;
        } else {
            sort(t, p + 1, hi);
            hi = p;
        }
    }
}

fn partition(t: &mut Tracer, lo: usize, hi: usize) -> usize {
    let pivot = hi - 1;
    t.line(1);
    t.highlight(pivot, true);
    let mut i = lo;
    for j in lo..pivot {
        t.line(3);
        let ord = t.compare(j, pivot);
        t.release(j, pivot);
        if ord == Ordering::Less {
            t.line(4);
            t.swap(i, j);
            t.release(i, j);
            i += 1;
        }
    }
    t.line(5);
    t.swap(i, pivot);
    t.release(i, pivot);
    t.highlight(i, false);
    t.mark_sorted(i);
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::SortEvent;

    #[test]
    fn every_position_is_marked_sorted_once() {
        let mut t = Tracer::new(vec![3, 7, 1, 9, 4, 4, 0]);
        QuickSort.run(&mut t);
        assert_eq!(t.values(), &[0, 1, 3, 4, 4, 7, 9]);
        let mut marked: Vec<usize> = t
            .finish()
            .iter()
            .filter_map(|e| match e.event {
                SortEvent::MarkSorted { index } => Some(index),
                _ => None,
            })
            .collect();
        marked.sort_unstable();
        assert_eq!(marked, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn sorted_input_of_many_elements() {
        let values: Vec<i64> = (0..300).collect();
        let mut t = Tracer::new(values.clone());
        QuickSort.run(&mut t);
        assert_eq!(t.values(), values.as_slice());
    }
}
