//! Maps individual pair samples onto bins and hands them to a reducer

use crate::bins::{DomainPolicy, RoundedBinEdges};
use crate::pairs::PairSample;
use crate::reducer::Reducer;
use crate::state::StatePackViewMut;

/// Describes what happened to a sample passed to [`bin_sample`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOutcome {
    /// The sample contributed to the bin with the contained index
    Binned(usize),
    /// At least one of the sample's quantities was `NaN` or infinite, so the
    /// sample was skipped
    Invalid,
    /// The sample's separation was outside of the binned domain, so the
    /// sample was skipped
    OutOfDomain,
}

/// Produced when a sample passes the domain check but its separation maps
/// to a bin index that doesn't exist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutOfRangeBin {
    pub separation: f64,
    pub index: usize,
    pub n_bins: usize,
}

/// Bins a single sample and updates the appropriate `accum_state` within
/// `statepack`.
///
/// The checks happen in the following order:
/// 1. samples with a non-finite quantity are skipped
/// 2. samples rejected by `policy` are skipped
/// 3. the bin index is computed from the separation. If it doesn't
///    correspond to a bin, [`DomainPolicy::Bounded`] skips the sample while
///    [`DomainPolicy::Legacy`] reports an error. The statepack is never
///    indexed out of bounds.
pub fn bin_sample(
    statepack: &mut StatePackViewMut,
    reducer: &impl Reducer,
    edges: &RoundedBinEdges,
    policy: DomainPolicy,
    sample: &PairSample,
) -> Result<BinOutcome, OutOfRangeBin> {
    debug_assert_eq!(statepack.n_states(), edges.n_bins());
    if !sample.is_finite() {
        return Ok(BinOutcome::Invalid);
    } else if policy.rejects(sample.separation, edges) {
        return Ok(BinOutcome::OutOfDomain);
    }

    match edges.bin_index(sample.separation) {
        Some(index) => {
            reducer.consume(&mut statepack.get_state_mut(index), sample);
            Ok(BinOutcome::Binned(index))
        }
        None if policy == DomainPolicy::Bounded => Ok(BinOutcome::OutOfDomain),
        None => Err(OutOfRangeBin {
            separation: sample.separation,
            index: edges.nearest_index(sample.separation),
            n_bins: edges.n_bins(),
        }),
    }
}

// not sure if this should actually be part of the public API, but it's useful
// in a handful of cases
pub fn reset_full_statepack(reducer: &impl Reducer, statepack: &mut StatePackViewMut) {
    for i in 0..statepack.n_states() {
        reducer.init_accum_state(&mut statepack.get_state_mut(i));
    }
}
