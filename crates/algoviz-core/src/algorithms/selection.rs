#![forbid(unsafe_code)]

use std::cmp::Ordering;

use super::{AlgorithmKind, SortAlgorithm};
use crate::trace::Tracer;

const PSEUDOCODE: &[&str] = &[
    "for i in 0..n:",
    "  min = i",
    "  for j in i + 1..n:",
    "    if a[j] < a[min]:",
    "      min = j",
    "  swap(a[i], a[min])",
    "  mark a[i] sorted",
];

/// Selection sort; the running minimum is highlighted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl SortAlgorithm for SelectionSort {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Selection
    }

    fn pseudocode(&self) -> &'static [&'static str] {
        PSEUDOCODE
    }

    fn run(&self, t: &mut Tracer) {
        let n = t.len();
        for i in 0..n {
            t.line(1);
            let mut min = i;
            t.highlight(min, true);
            for j in i + 1..n {
                t.line(3);
                let ord = t.compare(j, min);
                t.release(j, min);
                if ord == Ordering::Less {
                    t.line(4);
                    t.highlight(min, false);
                    min = j;
                    t.highlight(min, true);
                }
            }
            t.highlight(min, false);
            if min != i {
                t.line(5);
                t.swap(i, min);
                t.release(i, min);
            }
            t.line(6);
            t.mark_sorted(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::SortEvent;

    #[test]
    fn at_most_one_swap_per_position() {
        let mut t = Tracer::new(vec![4, 3, 2, 1, 0]);
        SelectionSort.run(&mut t);
        assert_eq!(t.values(), &[0, 1, 2, 3, 4]);
        let swaps = t
            .finish()
            .iter()
            .filter(|e| matches!(e.event, SortEvent::Swap { .. }))
            .count();
        assert!(swaps <= 4);
    }
}
