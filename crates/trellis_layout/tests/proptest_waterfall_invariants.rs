//! Property-based invariant tests for the waterfall packer.
//!
//! 1. Every assigned column is in `[0, max_columns)`.
//! 2. Greedy bound: after packing, the longest and shortest columns differ by
//!    at most the largest single item.
//! 3. Measure and arrange agree on the overall size.
//! 4. Repeated passes produce identical output.
//! 5. Items in one column never overlap along the main axis.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use trellis_layout::{arrange_sizes, measure_sizes, FixedChild, Orientation, Size, WaterfallPanel};

// ── Helpers ─────────────────────────────────────────────────────────────

fn sizes_strategy() -> impl Strategy<Value = Vec<Size>> {
    prop::collection::vec(
        (1.0f64..200.0, 1.0f64..200.0).prop_map(|(w, h)| Size::new(w, h)),
        0..40,
    )
}

fn orientation_strategy() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Vertical), Just(Orientation::Horizontal)]
}

fn main_extent(size: Size, orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Vertical => size.height,
        Orientation::Horizontal => size.width,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Column assignment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn columns_in_range(
        sizes in sizes_strategy(),
        orientation in orientation_strategy(),
        k in 1usize..8,
    ) {
        let k = NonZeroUsize::new(k).unwrap();
        let output = arrange_sizes(&sizes, orientation, k);
        prop_assert_eq!(output.items.len(), sizes.len());
        prop_assert_eq!(output.columns.len(), k.get());
        for item in &output.items {
            prop_assert!(item.column < k.get());
        }
    }

    #[test]
    fn greedy_imbalance_bounded_by_largest_item(
        sizes in sizes_strategy(),
        orientation in orientation_strategy(),
        k in 1usize..8,
    ) {
        let output = arrange_sizes(&sizes, orientation, NonZeroUsize::new(k).unwrap());
        let extents: Vec<f64> = output.columns.iter().map(|c| c.main_extent).collect();
        let longest = extents.iter().cloned().fold(f64::MIN, f64::max);
        let shortest = extents.iter().cloned().fold(f64::MAX, f64::min);
        let largest = sizes
            .iter()
            .map(|&s| main_extent(s, orientation))
            .fold(0.0, f64::max);
        prop_assert!(longest - shortest <= largest + 1e-9);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. Consistency
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn measure_matches_arrange(
        sizes in sizes_strategy(),
        orientation in orientation_strategy(),
        k in 1usize..8,
    ) {
        let k = NonZeroUsize::new(k).unwrap();
        let measured = measure_sizes(sizes.iter().copied(), orientation, k);
        let arranged = arrange_sizes(&sizes, orientation, k);
        prop_assert_eq!(measured, arranged.size);
    }

    #[test]
    fn repeated_passes_are_identical(
        sizes in sizes_strategy(),
        orientation in orientation_strategy(),
        k in 1i64..8,
    ) {
        let mut panel = WaterfallPanel::new(k).unwrap().with_orientation(orientation);
        let mut items: Vec<FixedChild> =
            sizes.iter().map(|s| FixedChild::new(s.width, s.height)).collect();

        panel.measure(&mut items);
        let first = panel.arrange(&mut items);
        let first_columns = panel.assigned_columns().to_vec();

        panel.measure(&mut items);
        let second = panel.arrange(&mut items);

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_columns, panel.assigned_columns().to_vec());
    }

    #[test]
    fn column_items_do_not_overlap(
        sizes in sizes_strategy(),
        orientation in orientation_strategy(),
        k in 1usize..8,
    ) {
        let output = arrange_sizes(&sizes, orientation, NonZeroUsize::new(k).unwrap());
        for column in 0..k {
            let mut cursor = 0.0;
            for item in output.items.iter().filter(|i| i.column == column) {
                prop_assert_eq!(item.main_offset, cursor);
                cursor += main_extent(sizes[item.index], orientation);
            }
        }
    }
}
