use std::fmt::Write;

use ndarray::Array2;
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use skysf_nostd_internal::SkyPoints;

// this is used to generate reproducible sky measurements for tests and
// benchmarks
pub struct SkyTestData {
    // shape is (2, n_points): longitudes then latitudes
    position_list: Array2<f64>,
    value_list: Vec<f64>,
    error_list: Vec<f64>,
}

impl SkyTestData {
    pub fn from_columns(
        longitudes: &[f64],
        latitudes: &[f64],
        values: &[f64],
        errors: &[f64],
    ) -> SkyTestData {
        let n_points = values.len();
        assert_eq!(longitudes.len(), n_points);
        assert_eq!(latitudes.len(), n_points);
        assert_eq!(errors.len(), n_points);

        let mut position_list = Array2::<f64>::zeros([2, n_points]);
        for i in 0..n_points {
            position_list[[0, i]] = longitudes[i];
            position_list[[1, i]] = latitudes[i];
        }
        SkyTestData {
            position_list,
            value_list: values.to_vec(),
            error_list: errors.to_vec(),
        }
    }

    /// draws points uniformly within the rectangular patch of the sky
    /// spanned by `lon_range` and `lat_range` (in degrees)
    pub fn from_random_patch(
        n_points: usize,
        lon_range: [f64; 2],
        lat_range: [f64; 2],
        seed: u64,
    ) -> SkyTestData {
        let mut my_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let lon_dist = Uniform::try_from(lon_range[0]..lon_range[1]).unwrap();
        let lat_dist = Uniform::try_from(lat_range[0]..=lat_range[1]).unwrap();
        let value_dist = Uniform::try_from(-50.0..=50.0).unwrap();
        let error_dist = Uniform::try_from(0.5..=5.0).unwrap();

        let mut longitudes = vec![0.0; n_points];
        let mut latitudes = vec![0.0; n_points];
        let mut values = vec![0.0; n_points];
        let mut errors = vec![0.0; n_points];
        for i in 0..n_points {
            longitudes[i] = lon_dist.sample(&mut my_rng);
            latitudes[i] = lat_dist.sample(&mut my_rng);
            values[i] = value_dist.sample(&mut my_rng);
            errors[i] = error_dist.sample(&mut my_rng);
        }
        Self::from_columns(&longitudes, &latitudes, &values, &errors)
    }

    /// a 20 by 20 degree patch centered on (180, 0)
    pub fn from_random(n_points: usize, seed: u64) -> SkyTestData {
        Self::from_random_patch(n_points, [170.0, 190.0], [-10.0, 10.0], seed)
    }

    pub fn n_points(&self) -> usize {
        self.value_list.len()
    }

    pub fn sky_points<'a>(&'a self) -> SkyPoints<'a> {
        SkyPoints::new(
            self.position_list.view(),
            &self.value_list,
            &self.error_list,
        )
        .unwrap()
    }

    /// formats the points as an input file (one record per line)
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for i in 0..self.n_points() {
            // `{:?}` prints the shortest representation that round-trips
            writeln!(
                out,
                "{:?} {:?} {:?} {:?}",
                self.position_list[[0, i]],
                self.position_list[[1, i]],
                self.value_list[i],
                self.error_list[i]
            )
            .unwrap();
        }
        out
    }
}
