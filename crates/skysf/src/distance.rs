//! Angular separation between points on the celestial sphere
//!
//! Every metric accepts (longitude, latitude) pairs in degrees. The metrics
//! that end in `Log10` report the base-10 logarithm of the separation in
//! degrees, which means that coincident points produce `-inf` (these samples
//! are subsequently discarded during binning).

use skysf_nostd_internal::SeparationMetric;

/// Great-circle separation computed from the chord length between the unit
/// vectors, reported as `log10(degrees)`.
///
/// This is numerically well behaved for small separations.
#[derive(Clone, Copy, Debug, Default)]
pub struct HaversineLog10;

impl SeparationMetric for HaversineLog10 {
    #[inline(always)]
    fn separation(&self, lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
        let delta_lon = (lon_a - lon_b).to_radians();
        let (lat_a, lat_b) = (lat_a.to_radians(), lat_b.to_radians());

        let dz = lat_a.sin() - lat_b.sin();
        let dx = delta_lon.cos() * lat_a.cos() - lat_b.cos();
        let dy = delta_lon.sin() * lat_a.cos();
        let chord = (dx * dx + dy * dy + dz * dz).sqrt();
        (2.0 * (chord / 2.0).asin()).to_degrees().log10()
    }
}

/// Great-circle separation (in degrees) from the spherical law of cosines.
///
/// When rounding pushes the cosine of the separation to 1 or more, the
/// separation is reported as exactly 0. This metric loses precision for
/// small separations.
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalCosine;

impl SeparationMetric for SphericalCosine {
    #[inline(always)]
    fn separation(&self, lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
        let (lon_a, lat_a) = (lon_a.to_radians(), lat_a.to_radians());
        let (lon_b, lat_b) = (lon_b.to_radians(), lat_b.to_radians());

        let x = lon_a.cos() * lat_a.cos() * lon_b.cos() * lat_b.cos();
        let y = lon_a.sin() * lat_a.cos() * lon_b.sin() * lat_b.cos();
        let z = lat_a.sin() * lat_b.sin();
        let cos_sep = x + y + z;
        if cos_sep >= 1.0 {
            0.0
        } else {
            cos_sep.acos().to_degrees()
        }
    }
}

/// [`SphericalCosine`] followed by `log10`
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalCosineLog10;

impl SeparationMetric for SphericalCosineLog10 {
    #[inline(always)]
    fn separation(&self, lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
        SphericalCosine
            .separation(lon_a, lat_a, lon_b, lat_b)
            .log10()
    }
}

/// Selects one of the separation metrics at runtime
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngularDistance {
    /// see [`HaversineLog10`]
    #[default]
    HaversineLog10,
    /// see [`SphericalCosine`]
    SphericalCosine,
    /// see [`SphericalCosineLog10`]
    SphericalCosineLog10,
}

impl AngularDistance {
    pub fn name(&self) -> &'static str {
        match self {
            AngularDistance::HaversineLog10 => "haversine-log10",
            AngularDistance::SphericalCosine => "cosine",
            AngularDistance::SphericalCosineLog10 => "cosine-log10",
        }
    }

    /// `true` when separations are reported as `log10(degrees)`
    pub fn is_logarithmic(&self) -> bool {
        !matches!(self, AngularDistance::SphericalCosine)
    }
}
