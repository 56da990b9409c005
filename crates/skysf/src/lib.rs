/*!
Computes the angular structure function of scalar measurements scattered
across the sky.

# High-Level: Angular Structure Functions

Consider a set of points on the celestial sphere, each of which carries a
measured value (e.g. a Faraday rotation measure) and an uncertainty. For every
unique pair of points, we compute
- the squared difference between the measured values,
- the sum of the variances of the measured values,
- the angular separation between the points (or its base-10 logarithm).

The pairs are binned by separation and we report the mean of the first 2
quantities in every bin. Subtracting the mean summed variance from the mean
squared difference gives the structure function with the measurement noise
removed (see [`BinRow::debiased`]).

# User Guide

```
use ndarray::ArrayView2;
use skysf::{
    AngularDistance, DomainPolicy, HistogramConfig, RuntimeSpec, SkyPoints,
    compute_structure_function,
};

// first row holds longitudes, second row holds latitudes (in degrees)
let positions = [0.0, 0.0, 0.0,
                 0.0, 1.0, 2.0];
let values = [5.0, 7.0, 5.0];
let errors = [1.0, 1.0, 1.0];
let points = SkyPoints::new(
    ArrayView2::from_shape((2, 3), &positions).unwrap(),
    &values,
    &errors,
).unwrap();

let config = HistogramConfig::new(0.0, 3, 1.0, DomainPolicy::Legacy).unwrap();
let report = compute_structure_function(
    &points,
    AngularDistance::SphericalCosine,
    &config,
    &RuntimeSpec::serial(),
).unwrap();
let rows = report.structure_function.rows();
assert_eq!(rows[1].count, 2);
assert_eq!(rows[2].count, 1);
```

# Developer Guide

See the crate-level documentation for [`skysf_nostd_internal`].
*/

#![deny(rustdoc::broken_intra_doc_links)]

mod config;
mod distance;
mod error;
mod histogram;
mod io;
mod parallel;
mod pipeline;

pub use config::{HistogramConfig, RuntimeSpec};
pub use distance::{AngularDistance, HaversineLog10, SphericalCosine, SphericalCosineLog10};
pub use error::Error;
pub use histogram::{BinRow, Histogram, SampleTally, StructureFunction};
pub use io::{
    LoadOptions, PointTable, format_row, parse_points, read_points, write_rows,
    write_structure_function,
};
pub use parallel::{Executor, PairReduction, SerialExecutor, ThreadedExecutor};
pub use pipeline::{Report, compute_structure_function, compute_structure_function_with};
pub use skysf_nostd_internal::{
    BinOutcome, DomainPolicy, Extent, PairIter, PairSample, QuantityRanges, RangeTracker,
    RoundedBinEdges, SeparationMetric, SkyPoints, n_pairs,
};
