//! Implements the bin geometry used to partition samples by angular
//! separation.
//!
//! The binning scheme is a little unusual. A value is assigned to the bin
//! whose *lower edge* is nearest to it, so bin `i` effectively covers
//! `[start + (i - 1/2)*size, start + (i + 1/2)*size)`. This is why the
//! reported bin centers are shifted by half a bin (see
//! [`RoundedBinEdges::bin_center`]).

/// Regular bins with uniform spacing that assign values by rounding
#[derive(Clone, Debug)]
pub struct RoundedBinEdges {
    start: f64,
    bin_size: f64,
    n_bins: usize,
}

impl RoundedBinEdges {
    /// Note that we initialize with the bin size rather than the upper edge
    pub fn new(start: f64, n_bins: usize, bin_size: f64) -> Result<Self, &'static str> {
        if n_bins == 0 {
            Err("Number of bins must be greater than zero")
        } else if !start.is_finite() {
            Err("The bin start must be finite")
        } else if !(bin_size.is_finite() && bin_size > 0.0) {
            Err("The bin size must be positive and finite")
        } else if !(start + (n_bins as f64) * bin_size).is_finite() {
            Err("received pathological values")
        } else {
            Ok(Self {
                start,
                bin_size,
                n_bins,
            })
        }
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// `start + n_bins * bin_size`
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + (self.n_bins as f64) * self.bin_size
    }

    /// The x-axis value reported for bin `i`. This is **NOT** the center of
    /// the interval that gets mapped to bin `i` (it's half a bin lower).
    #[inline]
    pub fn bin_center(&self, i: usize) -> f64 {
        (i as f64) * self.bin_size + self.start - self.bin_size / 2.0
    }

    /// Computes `round(|start - value| / bin_size)` without any bounds
    /// checks. The result may be `>= self.n_bins()`.
    ///
    /// Because of the absolute value, values below `start` are reflected
    /// back into the positive indices.
    #[inline]
    pub fn nearest_index(&self, value: f64) -> usize {
        let offset = (self.start - value) / self.bin_size;
        let magnitude = if offset < 0.0 { -offset } else { offset };
        crate::misc::round_half_away(magnitude)
    }

    /// Like [`Self::nearest_index`], but returns `None` for indices that
    /// don't correspond to a bin.
    #[inline]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let index = self.nearest_index(value);
        if index < self.n_bins {
            Some(index)
        } else {
            None
        }
    }
}

// we can't derive `Eq` since f64 doesn't implement the trait. Because we
// confirmed in the constructor that every value is finite, we can manually
// implement the trait
impl PartialEq for RoundedBinEdges {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start)
            && (self.bin_size == other.bin_size)
            && (self.n_bins == other.n_bins)
    }
}

impl Eq for RoundedBinEdges {}

/// Specifies which separations are considered to lie inside of the binned
/// domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DomainPolicy {
    /// Reproduces the historical predicate: a separation is rejected only
    /// when it is smaller than the *bin size* and larger than the upper
    /// edge at the same time. That can only happen when `end < bin_size`.
    ///
    /// Samples that pass this predicate but map to an index outside of the
    /// bins are reported as errors, rather than being silently dropped.
    #[default]
    Legacy,
    /// Rejects separations below the lower edge or above the upper edge.
    /// Samples that still round to an index outside of the bins (i.e. ones
    /// within half a bin of the upper edge) are also rejected.
    Bounded,
}

impl DomainPolicy {
    /// returns `true` when `separation` is excluded from the binned domain
    #[inline]
    pub fn rejects(&self, separation: f64, edges: &RoundedBinEdges) -> bool {
        match self {
            DomainPolicy::Legacy => separation < edges.bin_size() && separation > edges.end(),
            DomainPolicy::Bounded => separation < edges.start() || separation > edges.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_creation() {
        // Zero bins
        assert!(RoundedBinEdges::new(0.0, 0, 1.0).is_err());

        // bad bin sizes
        assert!(RoundedBinEdges::new(0.0, 5, 0.0).is_err());
        assert!(RoundedBinEdges::new(0.0, 5, -1.0).is_err());
        assert!(RoundedBinEdges::new(0.0, 5, f64::NAN).is_err());
        assert!(RoundedBinEdges::new(0.0, 5, f64::INFINITY).is_err());

        // Non-finite start
        assert!(RoundedBinEdges::new(f64::NAN, 5, 1.0).is_err());
        assert!(RoundedBinEdges::new(f64::NEG_INFINITY, 5, 1.0).is_err());

        // end overflows
        assert!(RoundedBinEdges::new(0.0, 4, f64::MAX).is_err());
    }

    #[test]
    fn geometry() {
        let edges = RoundedBinEdges::new(-2.5, 20, 0.1).unwrap();
        assert_eq!(edges.n_bins(), 20);
        assert!((edges.end() - (-0.5)).abs() < 1e-12);
        assert!((edges.bin_center(0) - (-2.55)).abs() < 1e-12);
        assert!((edges.bin_center(19) - (-0.65)).abs() < 1e-12);

        let edges = RoundedBinEdges::new(0.0, 3, 1.0).unwrap();
        assert_eq!(edges.bin_center(0), -0.5);
        assert_eq!(edges.bin_center(1), 0.5);
        assert_eq!(edges.bin_center(2), 1.5);
    }

    #[test]
    fn indexing_at_lower_edges() {
        let edges = RoundedBinEdges::new(-2.5, 20, 0.1).unwrap();
        for k in 0..20 {
            let value = -2.5 + (k as f64) * 0.1;
            assert_eq!(edges.bin_index(value), Some(k), "problem at k = {k}");
        }

        let edges = RoundedBinEdges::new(0.0, 3, 1.0).unwrap();
        for k in 0..3 {
            assert_eq!(edges.bin_index(k as f64), Some(k));
        }
    }

    #[test]
    fn indexing_rounds() {
        let edges = RoundedBinEdges::new(0.0, 3, 1.0).unwrap();
        assert_eq!(edges.bin_index(0.49), Some(0));
        // ties are rounded away from zero
        assert_eq!(edges.bin_index(0.5), Some(1));
        assert_eq!(edges.bin_index(1.49), Some(1));
        assert_eq!(edges.bin_index(2.4), Some(2));
        assert_eq!(edges.bin_index(2.5), None);
        assert_eq!(edges.nearest_index(2.5), 3);
        assert_eq!(edges.nearest_index(3.0), 3);

        // values below start get reflected
        assert_eq!(edges.bin_index(-1.0), Some(1));
        assert_eq!(edges.bin_index(-0.2), Some(0));
    }

    #[test]
    fn legacy_predicate() {
        // the usual case: end > bin_size, so nothing is rejected
        let edges = RoundedBinEdges::new(0.0, 3, 1.0).unwrap();
        let policy = DomainPolicy::Legacy;
        for value in [-100.0, -1.0, 0.0, 0.5, 2.0, 3.0, 3.5, 100.0] {
            assert!(!policy.rejects(value, &edges), "rejected {value}");
        }

        // end < bin_size: the open interval (end, bin_size) is rejected
        let edges = RoundedBinEdges::new(-2.5, 20, 0.1).unwrap();
        assert!(policy.rejects(-0.4, &edges));
        assert!(policy.rejects(0.0, &edges));
        assert!(policy.rejects(0.09, &edges));
        assert!(!policy.rejects(0.1, &edges));
        assert!(!policy.rejects(-0.5, &edges));
        assert!(!policy.rejects(-3.0, &edges));
        assert!(!policy.rejects(1.0, &edges));
    }

    #[test]
    fn bounded_predicate() {
        let edges = RoundedBinEdges::new(0.0, 3, 1.0).unwrap();
        let policy = DomainPolicy::Bounded;
        assert!(policy.rejects(-0.1, &edges));
        assert!(!policy.rejects(0.0, &edges));
        assert!(!policy.rejects(3.0, &edges)); // the upper edge is inclusive
        assert!(policy.rejects(3.1, &edges));
    }
}
