//! Define basic reducer machinery (that doesn't require the standard lib)
//!
//! # Reducer Machinery
//!
//! The binning of [`PairSample`]s is taken care of separately. A reducer is
//! responsible for computing the statistic within a single bin. We draw a
//! distinction between the current state of the reduction and the actual
//! reducer logic.
//! - We refer to the current state of a single reduction as the
//!   `accum_state`
//! - The reducer logic is encapsulated by the functions implemented by the
//!   [`Reducer`] trait. A Reducer modifies a single `accum_state` at a time.
//!
//! External code manages the `accum_state` of each bin (usually inside a
//! [`StatePackViewMut`](crate::StatePackViewMut)). Because the state of a
//! reduction over disjoint sets of samples can be merged, external code is
//! free to split the pairs into independent units of work.

use crate::pairs::PairSample;
use crate::state::{AccumStateView, AccumStateViewMut};
use ndarray::ArrayViewMut1;

/// Reducers operate on individual `accum_state`s.
pub trait Reducer {
    /// the number of f64 elements needed to track the accumulator data
    fn accum_state_size(&self) -> usize;

    /// initializes the storage tracking the accumulator's state.
    ///
    /// You need to call this function before you start working with the
    /// storage. You can also use this to reset the accumulator's state since
    /// it blindly overwrites any existing values.
    fn init_accum_state(&self, accum_state: &mut AccumStateViewMut);

    /// consume the sample to update the accum_state
    fn consume(&self, accum_state: &mut AccumStateViewMut, sample: &PairSample);

    /// merge the state information tracked by `accum_state` and `other`, and
    /// update `accum_state` accordingly
    fn merge(&self, accum_state: &mut AccumStateViewMut, other: &AccumStateView);

    /// extract all output-values from a single accum_state. Expects `value`
    /// to have the length given by `self.output_names().len()`
    fn value_from_accum_state(&self, value: &mut ArrayViewMut1<f64>, accum_state: &AccumStateView);

    /// Names of the output values produced from a single accum_state
    fn output_names(&self) -> &'static [&'static str];
}

/// Tracks the mean of the squared difference and the mean of the summed
/// variance in a single bin.
///
/// When a bin hasn't received any samples, both means are `NaN`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PairMean;

impl PairMean {
    const SQ_DIFF_TOTAL: usize = 0;
    const VAR_SUM_TOTAL: usize = 1;
    const COUNT: usize = 2;

    pub const VALUE_MEAN_SQ_DIFF: usize = 0;
    pub const VALUE_MEAN_VAR_SUM: usize = 1;
    pub const VALUE_COUNT: usize = 2;
    const OUTPUT_COMPONENTS: &'static [&'static str] = &["mean_sq_diff", "mean_var_sum", "count"];
}

impl Reducer for PairMean {
    fn accum_state_size(&self) -> usize {
        3_usize
    }

    fn init_accum_state(&self, accum_state: &mut AccumStateViewMut) {
        accum_state[Self::SQ_DIFF_TOTAL] = 0.0;
        accum_state[Self::VAR_SUM_TOTAL] = 0.0;
        accum_state[Self::COUNT] = 0.0;
    }

    #[inline(always)]
    fn consume(&self, accum_state: &mut AccumStateViewMut, sample: &PairSample) {
        accum_state[Self::SQ_DIFF_TOTAL] += sample.sq_diff;
        accum_state[Self::VAR_SUM_TOTAL] += sample.var_sum;
        accum_state[Self::COUNT] += 1.0;
    }

    fn merge(&self, accum_state: &mut AccumStateViewMut, other: &AccumStateView) {
        accum_state[Self::SQ_DIFF_TOTAL] += other[Self::SQ_DIFF_TOTAL];
        accum_state[Self::VAR_SUM_TOTAL] += other[Self::VAR_SUM_TOTAL];
        accum_state[Self::COUNT] += other[Self::COUNT];
    }

    fn value_from_accum_state(&self, value: &mut ArrayViewMut1<f64>, accum_state: &AccumStateView) {
        let count = accum_state[Self::COUNT];
        if count == 0.0 {
            value[[Self::VALUE_MEAN_SQ_DIFF]] = f64::NAN;
            value[[Self::VALUE_MEAN_VAR_SUM]] = f64::NAN;
        } else {
            value[[Self::VALUE_MEAN_SQ_DIFF]] = accum_state[Self::SQ_DIFF_TOTAL] / count;
            value[[Self::VALUE_MEAN_VAR_SUM]] = accum_state[Self::VAR_SUM_TOTAL] / count;
        }
        value[[Self::VALUE_COUNT]] = count;
    }

    fn output_names(&self) -> &'static [&'static str] {
        Self::OUTPUT_COMPONENTS
    }
}
