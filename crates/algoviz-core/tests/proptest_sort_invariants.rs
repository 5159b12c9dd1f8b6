//! Property-based invariant tests for the sort executors.
//!
//! ## Invariants
//!
//! 1. Sort correctness: the final step is the sorted permutation of the input.
//! 2. Replay equivalence: the last logged snapshot equals the live model.
//! 3. Index coherence: every snapshot has `index == position`.
//! 4. Identity: every snapshot holds exactly the input ids.
//! 5. Stats monotonicity across steps.
//! 6. Determinism: two runs over the same input produce identical logs.

use std::collections::BTreeSet;

use algoviz_core::{AlgorithmKind, Executor, StepKind, Value, record};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_values() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(-50i64..50, 0..40)
}

fn arb_kind() -> impl Strategy<Value = AlgorithmKind> {
    prop::sample::select(AlgorithmKind::ALL.to_vec())
}

// ── 1. Sort correctness ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn final_step_is_sorted_permutation(values in arb_values(), kind in arb_kind()) {
        let log = record(kind, &values);
        let last = log.last().unwrap();
        let mut expected = values.clone();
        expected.sort_unstable();
        prop_assert_eq!(last.values(), expected);
        prop_assert_eq!(last.kind, StepKind::Complete);
    }
}

// ── 2. Replay equivalence ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn logged_final_state_matches_live_model(values in arb_values(), kind in arb_kind()) {
        let mut live = Executor::from_values(kind, &values);
        let mut steps = vec![live.initial_step()];
        while let Some(step) = live.advance() {
            steps.push(step);
        }
        let log = record(kind, &values);
        prop_assert_eq!(log.as_slice(), steps.as_slice());
        prop_assert_eq!(&log.last().unwrap().array_state, &live.model().snapshot());
    }
}

// ── 3 & 4. Index coherence and identity ──────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn snapshots_keep_indices_and_ids(values in arb_values(), kind in arb_kind()) {
        let log = record(kind, &values);
        let ids: BTreeSet<u64> = log
            .first()
            .unwrap()
            .array_state
            .iter()
            .map(|e| e.id.get())
            .collect();
        prop_assert_eq!(ids.len(), values.len());
        for step in &log {
            for (position, element) in step.array_state.iter().enumerate() {
                prop_assert_eq!(element.index, position);
            }
            let step_ids: BTreeSet<u64> = step.array_state.iter().map(|e| e.id.get()).collect();
            prop_assert_eq!(&step_ids, &ids);
        }
    }
}

// ── 5 & 6. Monotonic stats, determinism ──────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn stats_never_decrease(values in arb_values(), kind in arb_kind()) {
        let log = record(kind, &values);
        for pair in log.as_slice().windows(2) {
            prop_assert!(pair[1].stats.comparisons >= pair[0].stats.comparisons);
            prop_assert!(pair[1].stats.swaps >= pair[0].stats.swaps);
            prop_assert!(pair[1].stats.writes >= pair[0].stats.writes);
        }
    }

    #[test]
    fn runs_are_deterministic(values in arb_values(), kind in arb_kind()) {
        prop_assert_eq!(record(kind, &values), record(kind, &values));
    }

    #[test]
    fn bubble_swaps_equal_inversions(values in arb_values()) {
        let mut inversions = 0u64;
        for i in 0..values.len() {
            for j in i + 1..values.len() {
                if values[i] > values[j] {
                    inversions += 1;
                }
            }
        }
        let n = values.len() as u64;
        let stats = record(AlgorithmKind::Bubble, &values).last().unwrap().stats;
        prop_assert_eq!(stats.swaps, inversions);
        prop_assert_eq!(stats.comparisons, n * n.saturating_sub(1) / 2);
    }
}
