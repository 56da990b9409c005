//! Drives the full calculation

use log::{debug, info};
use skysf_nostd_internal::{QuantityRanges, SeparationMetric, SkyPoints, n_pairs};

use crate::parallel::{Executor, PairReduction, SerialExecutor, ThreadedExecutor};
use crate::{
    AngularDistance, Error, HaversineLog10, HistogramConfig, RuntimeSpec, SampleTally,
    SphericalCosine, SphericalCosineLog10, StructureFunction,
};

/// Everything produced by a single calculation
#[derive(Clone, Debug)]
pub struct Report {
    pub structure_function: StructureFunction,
    pub tally: SampleTally,
    /// extents of the pairwise quantities (`None` when there are no pairs)
    pub ranges: Option<QuantityRanges>,
    pub n_pairs: u64,
}

/// Compute the structure function of `points`, using one of the built-in
/// separation metrics.
///
/// The separation units (degrees or `log10(degrees)`) are determined by
/// `metric`. The bin configuration must be expressed in the same units.
pub fn compute_structure_function(
    points: &SkyPoints,
    metric: AngularDistance,
    config: &HistogramConfig,
    runtime: &RuntimeSpec,
) -> Result<Report, Error> {
    let units = if metric.is_logarithmic() {
        "log10(degrees)"
    } else {
        "degrees"
    };
    info!(
        "using the {} separation metric (separations in {})",
        metric.name(),
        units
    );
    // dispatch once so that the pair loop is monomorphized for each metric
    match metric {
        AngularDistance::HaversineLog10 => {
            compute_structure_function_with(points, &HaversineLog10, config, runtime)
        }
        AngularDistance::SphericalCosine => {
            compute_structure_function_with(points, &SphericalCosine, config, runtime)
        }
        AngularDistance::SphericalCosineLog10 => {
            compute_structure_function_with(points, &SphericalCosineLog10, config, runtime)
        }
    }
}

/// Like [`compute_structure_function`], but accepts an arbitrary metric
pub fn compute_structure_function_with<M: SeparationMetric + Sync>(
    points: &SkyPoints,
    metric: &M,
    config: &HistogramConfig,
    runtime: &RuntimeSpec,
) -> Result<Report, Error> {
    let n_pairs = n_pairs(points.n_points());
    let edges = config.edges();
    info!(
        "binning {} pairs from {} points into {} bins (start: {}, size: {}, end: {}, domain: {:?})",
        n_pairs,
        points.n_points(),
        edges.n_bins(),
        edges.start(),
        edges.bin_size(),
        edges.end(),
        config.domain()
    );
    debug!(
        "running with {} team(s), threaded: {}",
        runtime.n_teams(),
        runtime.threaded()
    );

    let PairReduction { histogram, ranges } = if runtime.threaded() {
        ThreadedExecutor.drive_reduce(points, metric, config, runtime.n_teams())?
    } else {
        SerialExecutor.drive_reduce(points, metric, config, runtime.n_teams())?
    };

    let ranges = ranges.ranges().copied();
    if let Some(QuantityRanges {
        sq_diff,
        separation,
        var_sum,
    }) = ranges
    {
        info!("squared difference range: [{}, {}]", sq_diff.min, sq_diff.max);
        info!("separation range: [{}, {}]", separation.min, separation.max);
        info!("summed variance range: [{}, {}]", var_sum.min, var_sum.max);
    }

    let tally = *histogram.tally();
    info!(
        "{} valid values used for binning ({} invalid, {} outside of the binned domain)",
        tally.binned, tally.invalid, tally.out_of_domain
    );
    Ok(Report {
        structure_function: histogram.finalize(),
        tally,
        ranges,
        n_pairs,
    })
}
