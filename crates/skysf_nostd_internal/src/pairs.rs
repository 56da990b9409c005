use core::ops::Range;
use ndarray::ArrayView2;

/// Collection of sky measurements.
///
/// We place the following constraints on the positions array:
/// - axis 0 is the slow axis. It always has a length of 2: the first row
///   holds longitudes (e.g. right ascension) and the second row holds
///   latitudes (e.g. declination). Both are measured in degrees.
/// - axis 1 is the fast axis. The length along this axis coincides with
///   the number of points. We require that it is contiguous (i.e. the stride
///   is unity).
///
/// The measured values and their uncertainties are stored in separate
/// slices (one entry per point).
#[derive(Clone)]
pub struct SkyPoints<'a> {
    positions: ArrayView2<'a, f64>,
    values: &'a [f64],
    errors: &'a [f64],
    n_points: usize,
}

impl<'a> SkyPoints<'a> {
    /// create a new instance
    pub fn new(
        positions: ArrayView2<'a, f64>,
        values: &'a [f64],
        errors: &'a [f64],
    ) -> Result<SkyPoints<'a>, &'static str> {
        let n_points = positions.shape()[1];
        if positions.shape()[0] != 2 {
            Err("positions must hold exactly 2 angular coordinates per point")
        } else if n_points > 1 && positions.strides()[1] != 1 {
            Err("positions must be contiguous along the fast axis")
        } else if values.len() != n_points {
            Err("values must have the same number of points as positions")
        } else if errors.len() != n_points {
            Err("errors must have the same number of points as positions")
        } else {
            Ok(Self {
                positions,
                values,
                errors,
                n_points,
            })
        }
    }

    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// longitude and latitude (in degrees) of point `idx`
    #[inline(always)]
    pub fn coordinates(&self, idx: usize) -> (f64, f64) {
        (self.positions[[0, idx]], self.positions[[1, idx]])
    }

    #[inline(always)]
    pub fn value(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    #[inline(always)]
    pub fn error(&self, idx: usize) -> f64 {
        self.errors[idx]
    }
}

/// Computes the angular separation between 2 points on the sky.
///
/// Coordinates are always passed in degrees. Implementations may report the
/// separation in degrees or some monotonic transform of it (e.g. log10).
pub trait SeparationMetric {
    fn separation(&self, lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64;
}

/// The quantities derived from a single pair of points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairSample {
    /// index of the first point (always smaller than `j`)
    pub i: usize,
    /// index of the second point
    pub j: usize,
    /// the squared difference between the measured values
    pub sq_diff: f64,
    /// the sum of the variances of the measured values
    pub var_sum: f64,
    /// the angular separation, as reported by the [`SeparationMetric`]
    pub separation: f64,
}

impl PairSample {
    /// `true` when every derived quantity is finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.separation.is_finite() && self.sq_diff.is_finite() && self.var_sum.is_finite()
    }
}

/// Iterates over every unique pair of points, in order of increasing `i`
/// and then increasing `j` (with `i < j`).
///
/// The iterator can be restricted to a range of first indices (aka rows).
/// This lets separate units of work process disjoint sets of pairs.
pub struct PairIter<'p, 'a, M: SeparationMetric> {
    points: &'p SkyPoints<'a>,
    metric: &'p M,
    i: usize,
    j: usize,
    i_stop: usize,
}

impl<'p, 'a, M: SeparationMetric> PairIter<'p, 'a, M> {
    /// iterate over all pairs
    pub fn new(points: &'p SkyPoints<'a>, metric: &'p M) -> Self {
        Self::over_rows(points, metric, 0..points.n_points)
    }

    /// iterate over the pairs whose first index lies in `rows`
    pub fn over_rows(points: &'p SkyPoints<'a>, metric: &'p M, rows: Range<usize>) -> Self {
        let i_stop = rows.end.min(points.n_points);
        let i = rows.start.min(i_stop);
        Self {
            points,
            metric,
            i,
            j: i + 1,
            i_stop,
        }
    }
}

impl<M: SeparationMetric> Iterator for PairIter<'_, '_, M> {
    type Item = PairSample;

    fn next(&mut self) -> Option<PairSample> {
        while self.i < self.i_stop {
            if self.j < self.points.n_points {
                let (i, j) = (self.i, self.j);
                self.j += 1;

                let diff = self.points.value(i) - self.points.value(j);
                let (err_i, err_j) = (self.points.error(i), self.points.error(j));
                let (lon_i, lat_i) = self.points.coordinates(i);
                let (lon_j, lat_j) = self.points.coordinates(j);
                return Some(PairSample {
                    i,
                    j,
                    sq_diff: diff * diff,
                    var_sum: err_i * err_i + err_j * err_j,
                    separation: self.metric.separation(lon_i, lat_i, lon_j, lat_j),
                });
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A stand-in metric: the absolute difference in latitudes
    struct LatitudeGap;

    impl SeparationMetric for LatitudeGap {
        fn separation(&self, _: f64, lat_a: f64, _: f64, lat_b: f64) -> f64 {
            if lat_a > lat_b {
                lat_a - lat_b
            } else {
                lat_b - lat_a
            }
        }
    }

    #[rustfmt::skip]
    const POSITIONS: [f64; 8] = [
        0.0, 0.0, 0.0, 10.0,
        0.0, 1.0, 2.0,  4.0,
    ];
    const VALUES: [f64; 4] = [5.0, 7.0, 5.0, 1.0];
    const ERRORS: [f64; 4] = [1.0, 2.0, 1.0, 0.5];

    fn points() -> SkyPoints<'static> {
        SkyPoints::new(
            ArrayView2::from_shape((2, 4), &POSITIONS).unwrap(),
            &VALUES,
            &ERRORS,
        )
        .unwrap()
    }

    #[test]
    fn invalid_creation() {
        let positions = [0.0; 6];
        let values = [0.0; 2];
        let errors = [0.0; 2];
        // wrong number of coordinates
        assert!(
            SkyPoints::new(
                ArrayView2::from_shape((3, 2), &positions).unwrap(),
                &values,
                &errors
            )
            .is_err()
        );
        // mismatched lengths
        assert!(
            SkyPoints::new(
                ArrayView2::from_shape((2, 3), &positions).unwrap(),
                &values,
                &errors
            )
            .is_err()
        );
        assert!(
            SkyPoints::new(
                ArrayView2::from_shape((2, 2), &positions[..4]).unwrap(),
                &values,
                &errors[..1]
            )
            .is_err()
        );
        // non-contiguous fast axis
        let transposed = ArrayView2::from_shape((3, 2), &positions)
            .unwrap()
            .reversed_axes();
        assert!(SkyPoints::new(transposed, &[0.0; 3], &[0.0; 3]).is_err());
    }

    #[test]
    fn enumeration_order() {
        let points = points();
        let expected = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let mut count = 0;
        for (sample, (i, j)) in PairIter::new(&points, &LatitudeGap).zip(expected) {
            assert_eq!((sample.i, sample.j), (i, j));
            count += 1;
        }
        assert_eq!(count, 6);
        assert_eq!(PairIter::new(&points, &LatitudeGap).count(), 6);
    }

    #[test]
    fn derived_quantities() {
        let points = points();
        let mut iter = PairIter::new(&points, &LatitudeGap);

        let first = iter.next().unwrap();
        assert_eq!(first.sq_diff, 4.0);
        assert_eq!(first.var_sum, 5.0);
        assert_eq!(first.separation, 1.0);

        let second = iter.next().unwrap();
        assert_eq!(second.sq_diff, 0.0);
        assert_eq!(second.var_sum, 2.0);
        assert_eq!(second.separation, 2.0);

        let third = iter.next().unwrap();
        assert_eq!(third.sq_diff, 16.0);
        assert_eq!(third.var_sum, 1.25);
        assert_eq!(third.separation, 4.0);
    }

    #[test]
    fn row_subsets() {
        let points = points();
        let mut iter = PairIter::over_rows(&points, &LatitudeGap, 1..3);
        let pairs: [(usize, usize); 3] = core::array::from_fn(|_| {
            let s = iter.next().unwrap();
            (s.i, s.j)
        });
        assert_eq!(pairs, [(1, 2), (1, 3), (2, 3)]);
        assert!(iter.next().is_none());

        // the last row never holds any pairs
        assert_eq!(PairIter::over_rows(&points, &LatitudeGap, 3..4).count(), 0);
        // out-of-bounds rows are clamped
        assert_eq!(PairIter::over_rows(&points, &LatitudeGap, 2..100).count(), 1);
        assert_eq!(PairIter::over_rows(&points, &LatitudeGap, 7..9).count(), 0);
    }

    #[test]
    fn too_few_points() {
        let positions = [1.0, 2.0];
        let single = SkyPoints::new(
            ArrayView2::from_shape((2, 1), &positions).unwrap(),
            &[3.0],
            &[0.1],
        )
        .unwrap();
        assert_eq!(PairIter::new(&single, &LatitudeGap).count(), 0);

        let nothing: [f64; 0] = [];
        let empty = SkyPoints::new(
            ArrayView2::from_shape((2, 0), &nothing).unwrap(),
            &nothing,
            &nothing,
        )
        .unwrap();
        assert_eq!(PairIter::new(&empty, &LatitudeGap).count(), 0);
    }
}
