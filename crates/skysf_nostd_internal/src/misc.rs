//! Miscellaneous helpers used throughout the crate

use core::ops::Range;

/// Rounds a non-negative value to the nearest integer, with ties rounded away
/// from zero.
///
/// This mirrors the `(long)(x + 0.5)` idiom rather than `f64::round` (which
/// isn't available without the standard library). The two can disagree at
/// the limits of double precision (e.g. the largest double below one half
/// maps to 1). Values too large to represent saturate to `usize::MAX` and
/// `NaN` maps to 0.
#[inline(always)]
pub fn round_half_away(magnitude: f64) -> usize {
    debug_assert!(magnitude >= 0.0 || magnitude.is_nan());
    (magnitude + 0.5) as usize
}

/// The number of unique (unordered) pairs that can be formed from
/// `n_points` points, i.e. `n_points * (n_points - 1) / 2`.
pub fn n_pairs(n_points: usize) -> u64 {
    let n = n_points as u64;
    if n < 2 {
        0
    } else if n % 2 == 0 {
        (n / 2) * (n - 1)
    } else {
        n * ((n - 1) / 2)
    }
}

/// the number of pairs whose first index is `row`
#[inline]
fn pairs_in_row(row: usize, n_points: usize) -> u64 {
    (n_points - 1 - row) as u64
}

/// Splits the outer indices `0..n_points` of the pair loop into (at most)
/// `n_parts` contiguous ranges holding roughly equal numbers of pairs.
///
/// Each entry of `out` receives a range; the ranges are disjoint, they appear
/// in increasing order and they cover every outer index. Trailing entries may
/// be empty when there are more parts than useful rows.
pub fn partition_rows(n_points: usize, out: &mut [Range<usize>]) {
    let n_parts = out.len();
    if n_parts == 0 {
        return;
    }
    let total = n_pairs(n_points);
    let mut row = 0;
    let mut cumulative = 0_u64;
    for (part, range) in out.iter_mut().enumerate() {
        let start = row;
        if part + 1 == n_parts {
            row = n_points;
        } else {
            // integer arithmetic keeps this reproducible
            let target = ((total as u128) * ((part + 1) as u128) / (n_parts as u128)) as u64;
            while row < n_points && cumulative < target {
                cumulative += pairs_in_row(row, n_points);
                row += 1;
            }
        }
        *range = start..row;
    }
}
