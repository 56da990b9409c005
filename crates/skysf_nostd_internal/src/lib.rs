/*!
Internal machinery for computing angular structure functions (that doesn't
require the standard library).

# Developer Guide

The calculation is organized as a stream of pair samples flowing into a
binned reduction:

- [`SkyPoints`] holds a read-only view of the measurements.
- [`PairIter`] walks every unique pair of points (in a fixed order) and
  produces a [`PairSample`]. The angular separation is computed by a type
  implementing [`SeparationMetric`]. The concrete metrics need trigonometric
  functions, so they live in the `skysf` crate.
- [`bin_sample`] decides which bin (if any) a sample contributes to and
  hands it to a [`Reducer`], which updates the accumulator state of that bin.
- [`RangeTracker`] watches the same stream for diagnostic purposes.

The accumulator state for every bin lives in a [`StatePackViewMut`]. Nothing
here owns that storage; the `skysf` crate is responsible for it.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]

mod binning;
mod bins;
mod misc;
mod pairs;
mod range;
mod reducer;
mod state;

pub use binning::{BinOutcome, OutOfRangeBin, bin_sample, reset_full_statepack};
pub use bins::{DomainPolicy, RoundedBinEdges};
pub use misc::{n_pairs, partition_rows, round_half_away};
pub use pairs::{PairIter, PairSample, SeparationMetric, SkyPoints};
pub use range::{Extent, QuantityRanges, RangeTracker};
pub use reducer::{PairMean, Reducer};
pub use state::{AccumStateView, AccumStateViewMut, StatePackViewMut};
