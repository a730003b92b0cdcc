//! Property-based invariant tests for the fuzzy comparator.
//!
//! 1. `are_close` is reflexive and symmetric.
//! 2. `greater_than` and `less_than` are mutually exclusive and mirror each other.
//! 3. Close values are never ordered.
//! 4. A one-ulp nudge is always close.
//! 5. `first_min_index` picks a minimal value, and the earliest of exact ties.

use proptest::prelude::*;
use trellis_core::fuzzy;

fn finite() -> impl Strategy<Value = f64> {
    -1.0e9f64..1.0e9f64
}

proptest! {
    #[test]
    fn are_close_reflexive_and_symmetric(a in finite(), b in finite()) {
        prop_assert!(fuzzy::are_close(a, a));
        prop_assert_eq!(fuzzy::are_close(a, b), fuzzy::are_close(b, a));
    }

    #[test]
    fn ordering_is_exclusive(a in finite(), b in finite()) {
        let gt = fuzzy::greater_than(a, b);
        let lt = fuzzy::less_than(a, b);
        prop_assert!(!(gt && lt));
        prop_assert_eq!(gt, fuzzy::less_than(b, a));
        if fuzzy::are_close(a, b) {
            prop_assert!(!gt && !lt);
        } else {
            prop_assert!(gt || lt);
        }
    }

    #[test]
    fn one_ulp_is_close(a in finite()) {
        let next = f64::from_bits(a.to_bits() + 1);
        prop_assert!(fuzzy::are_close(a, next), "a={} next={}", a, next);
    }

    #[test]
    fn first_min_index_is_minimal(values in prop::collection::vec(0.0f64..1000.0, 1..16)) {
        let idx = fuzzy::first_min_index(&values).expect("non-empty");
        let min = values[idx];
        for (i, &v) in values.iter().enumerate() {
            prop_assert!(!fuzzy::less_than(v, min), "value {} at {} is below chosen {}", v, i, min);
        }
    }

    #[test]
    fn first_min_index_breaks_ties_low(values in prop::collection::vec(0u16..8, 1..16)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let idx = fuzzy::first_min_index(&values).expect("non-empty");
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let earliest = values.iter().position(|&v| v == min).expect("min present");
        prop_assert_eq!(idx, earliest);
    }
}
