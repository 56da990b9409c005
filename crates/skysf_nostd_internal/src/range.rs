//! Running minimum/maximum of the pairwise quantities.
//!
//! This is purely diagnostic. Nothing about the binned statistics depends on
//! it.

use crate::pairs::PairSample;

/// The smallest and largest value seen for a single quantity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    fn new(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    // a NaN never displaces an existing value, but any value displaces a NaN
    fn include(&mut self, other: &Extent) {
        if self.min.is_nan() || other.min < self.min {
            self.min = other.min;
        }
        if self.max.is_nan() || other.max > self.max {
            self.max = other.max;
        }
    }
}

/// Extents of the 3 quantities derived from each pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantityRanges {
    pub sq_diff: Extent,
    pub separation: Extent,
    pub var_sum: Extent,
}

impl QuantityRanges {
    fn from_sample(sample: &PairSample) -> Self {
        Self {
            sq_diff: Extent::new(sample.sq_diff),
            separation: Extent::new(sample.separation),
            var_sum: Extent::new(sample.var_sum),
        }
    }

    fn include(&mut self, other: &QuantityRanges) {
        self.sq_diff.include(&other.sq_diff);
        self.separation.include(&other.separation);
        self.var_sum.include(&other.var_sum);
    }
}

/// Tracks the [`QuantityRanges`] of a stream of [`PairSample`]s.
///
/// The first sample initializes every extent. NaN values are ignored unless
/// nothing else has been seen, so the result doesn't depend on the order of
/// the samples. Trackers that watched disjoint streams can be combined with
/// [`RangeTracker::merge`].
#[derive(Clone, Debug, Default)]
pub struct RangeTracker {
    ranges: Option<QuantityRanges>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update(&mut self, sample: &PairSample) {
        let latest = QuantityRanges::from_sample(sample);
        match &mut self.ranges {
            Some(ranges) => ranges.include(&latest),
            None => self.ranges = Some(latest),
        }
    }

    pub fn merge(&mut self, other: &RangeTracker) {
        match (&mut self.ranges, &other.ranges) {
            (Some(ranges), Some(other_ranges)) => ranges.include(other_ranges),
            (None, Some(other_ranges)) => self.ranges = Some(*other_ranges),
            (_, None) => (),
        }
    }

    /// Returns `None` if no samples have been seen
    pub fn ranges(&self) -> Option<&QuantityRanges> {
        self.ranges.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sq_diff: f64, separation: f64, var_sum: f64) -> PairSample {
        PairSample {
            i: 0,
            j: 1,
            sq_diff,
            var_sum,
            separation,
        }
    }

    #[test]
    fn empty() {
        assert!(RangeTracker::new().ranges().is_none());
    }

    #[test]
    fn update() {
        let mut tracker = RangeTracker::new();
        tracker.update(&sample(4.0, 1.0, 2.0));
        tracker.update(&sample(0.0, 2.0, 2.0));
        tracker.update(&sample(9.0, 0.5, 3.0));

        let ranges = tracker.ranges().unwrap();
        assert_eq!(ranges.sq_diff, Extent { min: 0.0, max: 9.0 });
        assert_eq!(ranges.separation, Extent { min: 0.5, max: 2.0 });
        assert_eq!(ranges.var_sum, Extent { min: 2.0, max: 3.0 });
    }

    #[test]
    fn nan_does_not_displace() {
        let mut tracker = RangeTracker::new();
        tracker.update(&sample(1.0, 1.0, 1.0));
        tracker.update(&sample(f64::NAN, f64::NAN, f64::NAN));
        tracker.update(&sample(2.0, f64::NEG_INFINITY, 1.0));

        let ranges = tracker.ranges().unwrap();
        assert_eq!(ranges.sq_diff, Extent { min: 1.0, max: 2.0 });
        assert_eq!(ranges.separation.min, f64::NEG_INFINITY);
        assert_eq!(ranges.separation.max, 1.0);
    }

    #[test]
    fn leading_nan_is_replaced() {
        let mut tracker = RangeTracker::new();
        tracker.update(&sample(f64::NAN, 1.0, f64::NAN));
        tracker.update(&sample(4.0, 2.0, 1.0));
        tracker.update(&sample(1.0, 3.0, f64::NAN));

        let ranges = tracker.ranges().unwrap();
        assert_eq!(ranges.sq_diff, Extent { min: 1.0, max: 4.0 });
        assert_eq!(ranges.separation, Extent { min: 1.0, max: 3.0 });
        assert_eq!(ranges.var_sum, Extent { min: 1.0, max: 1.0 });

        // merging in either order gives the same extents
        let mut nan_first = RangeTracker::new();
        nan_first.update(&sample(f64::NAN, 5.0, 2.0));
        let mut other = RangeTracker::new();
        other.update(&sample(9.0, 0.5, 3.0));
        let mut reversed = other.clone();
        reversed.merge(&nan_first);
        nan_first.merge(&other);
        assert_eq!(nan_first.ranges(), reversed.ranges());
        assert_eq!(
            nan_first.ranges().unwrap().sq_diff,
            Extent { min: 9.0, max: 9.0 }
        );
    }

    #[test]
    fn merge() {
        let mut left = RangeTracker::new();
        left.update(&sample(4.0, 1.0, 2.0));
        let mut right = RangeTracker::new();
        right.update(&sample(0.0, 3.0, 5.0));

        let mut empty = RangeTracker::new();
        empty.merge(&left);
        assert_eq!(empty.ranges(), left.ranges());

        left.merge(&RangeTracker::new());
        left.merge(&right);
        let ranges = left.ranges().unwrap();
        assert_eq!(ranges.sq_diff, Extent { min: 0.0, max: 4.0 });
        assert_eq!(ranges.separation, Extent { min: 1.0, max: 3.0 });
        assert_eq!(ranges.var_sum, Extent { min: 2.0, max: 5.0 });
    }
}
