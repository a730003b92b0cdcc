//! Epsilon-tolerant float comparison
//!
//! Repeated measure/arrange cycles can produce values that differ only in the
//! last bit. Layout decisions (which column is shortest, which extent is
//! widest) go through these helpers so that such noise never flips a result.
//!
//! The tolerance is `(|a| + |b| + 10) * f64::EPSILON`. Layout stability
//! depends on its exact magnitude, so keep the formula as is.

/// Machine epsilon for `f64`.
const DOUBLE_EPSILON: f64 = f64::EPSILON;

/// Returns true when `a` and `b` are equal within the layout tolerance.
///
/// Bit-equal values (including matching infinities) are always close.
#[inline]
pub fn are_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let eps = (a.abs() + b.abs() + 10.0) * DOUBLE_EPSILON;
    let delta = a - b;
    -eps < delta && eps > delta
}

/// `a > b`, ignoring differences within the tolerance.
#[inline]
pub fn greater_than(a: f64, b: f64) -> bool {
    a > b && !are_close(a, b)
}

/// `a < b`, ignoring differences within the tolerance.
#[inline]
pub fn less_than(a: f64, b: f64) -> bool {
    a < b && !are_close(a, b)
}

#[inline]
pub fn is_positive(value: f64) -> bool {
    greater_than(value, 0.0)
}

#[inline]
pub fn is_negative(value: f64) -> bool {
    less_than(value, -0.0)
}

#[inline]
pub fn close_to_zero(value: f64) -> bool {
    !is_positive(value) && !is_negative(value)
}

/// Fuzzy maximum over a slice, starting from zero.
///
/// Mirrors how layout extents are aggregated: an empty slice or a slice of
/// non-positive values yields `0.0`.
pub fn max_extent(values: &[f64]) -> f64 {
    values
        .iter()
        .fold(0.0, |max, &value| if greater_than(value, max) { value } else { max })
}

/// Index of the first minimal value, scanning left to right.
///
/// The candidate only moves when it is fuzzily greater than a later value, so
/// ties go to the lowest index. Returns `None` for an empty slice.
pub fn first_min_index(values: &[f64]) -> Option<usize> {
    let (&first, rest) = values.split_first()?;
    let mut lowest_index = 0;
    let mut lowest_value = first;
    for (i, &value) in rest.iter().enumerate() {
        if greater_than(lowest_value, value) {
            lowest_value = value;
            lowest_index = i + 1;
        }
    }
    Some(lowest_index)
}
