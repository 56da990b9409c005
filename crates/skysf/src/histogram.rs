//! Owned histogram of pair samples and the finalized output

use std::collections::HashMap;

use ndarray::{Array2, ArrayViewMut1, Axis};
use skysf_nostd_internal::{
    AccumStateView, BinOutcome, PairMean, PairSample, Reducer, StatePackViewMut, bin_sample,
    reset_full_statepack,
};

use crate::{Error, HistogramConfig};

/// Counts how every sample passed to a [`Histogram`] was handled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleTally {
    /// samples that contributed to a bin
    pub binned: u64,
    /// samples with a `NaN` or infinite quantity
    pub invalid: u64,
    /// samples outside of the binned domain
    pub out_of_domain: u64,
}

impl SampleTally {
    pub fn total(&self) -> u64 {
        self.binned + self.invalid + self.out_of_domain
    }

    fn record(&mut self, outcome: BinOutcome) {
        match outcome {
            BinOutcome::Binned(_) => self.binned += 1,
            BinOutcome::Invalid => self.invalid += 1,
            BinOutcome::OutOfDomain => self.out_of_domain += 1,
        }
    }

    fn merge(&mut self, other: &SampleTally) {
        self.binned += other.binned;
        self.invalid += other.invalid;
        self.out_of_domain += other.out_of_domain;
    }
}

/// Accumulates the sums and counts for every separation bin.
///
/// Histograms built from disjoint sets of samples can be combined with
/// [`Histogram::merge`].
#[derive(Clone, Debug)]
pub struct Histogram {
    config: HistogramConfig,
    // shape is (accum_state_size, n_bins)
    statepack: Array2<f64>,
    tally: SampleTally,
}

impl Histogram {
    pub fn new(config: HistogramConfig) -> Self {
        let mut statepack = Array2::<f64>::zeros((PairMean.accum_state_size(), config.n_bins()));
        reset_full_statepack(
            &PairMean,
            &mut StatePackViewMut::from_array_view(statepack.view_mut()),
        );
        Self {
            config,
            statepack,
            tally: SampleTally::default(),
        }
    }

    pub fn config(&self) -> &HistogramConfig {
        &self.config
    }

    pub fn tally(&self) -> &SampleTally {
        &self.tally
    }

    /// Add a single sample.
    ///
    /// An error is only returned when the legacy domain policy lets through
    /// a sample that doesn't map to a bin. The histogram is left untouched
    /// in that case.
    #[inline]
    pub fn add(&mut self, sample: &PairSample) -> Result<BinOutcome, Error> {
        let mut statepack = StatePackViewMut::from_array_view(self.statepack.view_mut());
        let outcome = bin_sample(
            &mut statepack,
            &PairMean,
            self.config.edges(),
            self.config.domain(),
            sample,
        )
        .map_err(|e| Error::bin_index_out_of_range(e.separation, e.index, e.n_bins))?;
        self.tally.record(outcome);
        Ok(outcome)
    }

    /// Add the contents of `other` to `self`
    ///
    /// # Panics
    /// Panics if the histograms don't share the same configuration
    pub fn merge(&mut self, other: &Histogram) {
        assert_eq!(
            self.config, other.config,
            "can't merge histograms with different configurations"
        );
        let mut statepack = StatePackViewMut::from_array_view(self.statepack.view_mut());
        for i in 0..statepack.n_states() {
            PairMean.merge(
                &mut statepack.get_state_mut(i),
                &AccumStateView::from_array_view(other.statepack.index_axis(Axis(1), i)),
            );
        }
        self.tally.merge(&other.tally);
    }

    /// Compute the per-bin means
    pub fn finalize(&self) -> StructureFunction {
        let edges = self.config.edges();
        let mut value = [0.0; 3];
        let rows = self
            .statepack
            .columns()
            .into_iter()
            .enumerate()
            .map(|(i, column)| {
                PairMean.value_from_accum_state(
                    &mut ArrayViewMut1::from(&mut value[..]),
                    &AccumStateView::from_array_view(column),
                );
                BinRow {
                    center: edges.bin_center(i),
                    mean_sq_diff: value[PairMean::VALUE_MEAN_SQ_DIFF],
                    mean_var_sum: value[PairMean::VALUE_MEAN_VAR_SUM],
                    count: value[PairMean::VALUE_COUNT] as u64,
                }
            })
            .collect();
        StructureFunction { rows }
    }
}

/// The finalized values of a single bin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinRow {
    /// the x-axis value reported for the bin (half a bin below the center of
    /// the interval mapped onto the bin)
    pub center: f64,
    /// mean squared difference between measurements (`NaN` for empty bins)
    pub mean_sq_diff: f64,
    /// mean summed variance of measurements (`NaN` for empty bins)
    pub mean_var_sum: f64,
    pub count: u64,
}

impl BinRow {
    /// The structure function with the measurement noise subtracted
    pub fn debiased(&self) -> f64 {
        self.mean_sq_diff - self.mean_var_sum
    }
}

/// One [`BinRow`] per bin, in bin order
#[derive(Clone, Debug, PartialEq)]
pub struct StructureFunction {
    rows: Vec<BinRow>,
}

impl StructureFunction {
    pub fn rows(&self) -> &[BinRow] {
        &self.rows
    }

    pub fn n_bins(&self) -> usize {
        self.rows.len()
    }

    /// the noise-subtracted structure function of every bin
    pub fn debiased(&self) -> Vec<f64> {
        self.rows.iter().map(BinRow::debiased).collect()
    }

    /// Returns each output quantity as a separate column.
    ///
    /// The keys are `"bin_center"` plus the reducer's output names
    /// (`"mean_sq_diff"`, `"mean_var_sum"`, `"count"`). This is primarily
    /// used for testing.
    pub fn columns(&self) -> HashMap<&'static str, Vec<f64>> {
        let names = PairMean.output_names();
        let mut out = HashMap::with_capacity(names.len() + 1);
        out.insert("bin_center", self.rows.iter().map(|r| r.center).collect());
        out.insert(
            names[PairMean::VALUE_MEAN_SQ_DIFF],
            self.rows.iter().map(|r| r.mean_sq_diff).collect(),
        );
        out.insert(
            names[PairMean::VALUE_MEAN_VAR_SUM],
            self.rows.iter().map(|r| r.mean_var_sum).collect(),
        );
        out.insert(
            names[PairMean::VALUE_COUNT],
            self.rows.iter().map(|r| r.count as f64).collect(),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skysf_nostd_internal::DomainPolicy;

    fn sample(sq_diff: f64, var_sum: f64, separation: f64) -> PairSample {
        PairSample {
            i: 0,
            j: 1,
            sq_diff,
            var_sum,
            separation,
        }
    }

    fn config(domain: DomainPolicy) -> HistogramConfig {
        HistogramConfig::new(0.0, 3, 1.0, domain).unwrap()
    }

    #[test]
    fn add_and_finalize() {
        let mut hist = Histogram::new(config(DomainPolicy::Legacy));
        hist.add(&sample(4.0, 2.0, 1.0)).unwrap();
        hist.add(&sample(0.0, 2.0, 2.0)).unwrap();
        hist.add(&sample(4.0, 2.0, 1.0)).unwrap();
        assert_eq!(
            hist.add(&sample(4.0, 2.0, f64::NAN)).unwrap(),
            BinOutcome::Invalid
        );

        assert_eq!(
            *hist.tally(),
            SampleTally {
                binned: 3,
                invalid: 1,
                out_of_domain: 0
            }
        );

        let output = hist.finalize();
        let rows = output.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].center, -0.5);
        assert!(rows[0].mean_sq_diff.is_nan());
        assert!(rows[0].mean_var_sum.is_nan());
        assert_eq!(rows[0].count, 0);
        assert_eq!(
            rows[1],
            BinRow {
                center: 0.5,
                mean_sq_diff: 4.0,
                mean_var_sum: 2.0,
                count: 2
            }
        );
        assert_eq!(rows[2].mean_sq_diff, 0.0);
        assert_eq!(rows[2].count, 1);
        assert_eq!(output.debiased()[1], 2.0);
        assert_eq!(output.debiased()[2], -2.0);
    }

    #[test]
    fn out_of_range_leaves_histogram_untouched() {
        let mut hist = Histogram::new(config(DomainPolicy::Legacy));
        assert!(hist.add(&sample(1.0, 1.0, 3.0)).is_err());
        assert_eq!(hist.tally().total(), 0);

        let mut hist = Histogram::new(config(DomainPolicy::Bounded));
        assert_eq!(
            hist.add(&sample(1.0, 1.0, 3.0)).unwrap(),
            BinOutcome::OutOfDomain
        );
        assert_eq!(hist.tally().out_of_domain, 1);
        assert!(hist.finalize().rows().iter().all(|row| row.count == 0));
    }

    #[test]
    fn merge() {
        let mut left = Histogram::new(config(DomainPolicy::Legacy));
        left.add(&sample(4.0, 1.0, 1.0)).unwrap();
        left.add(&sample(1.0, 1.0, f64::INFINITY)).unwrap();

        let mut right = Histogram::new(config(DomainPolicy::Legacy));
        right.add(&sample(2.0, 3.0, 1.0)).unwrap();
        right.add(&sample(5.0, 3.0, 0.0)).unwrap();

        left.merge(&right);
        assert_eq!(left.tally().binned, 3);
        assert_eq!(left.tally().invalid, 1);

        let columns = left.finalize().columns();
        assert_eq!(columns["count"], vec![1.0, 2.0, 0.0]);
        assert_eq!(columns["mean_sq_diff"][0], 5.0);
        assert_eq!(columns["mean_sq_diff"][1], 3.0);
        assert_eq!(columns["mean_var_sum"][1], 2.0);
        assert_eq!(columns["bin_center"], vec![-0.5, 0.5, 1.5]);
    }

    #[test]
    #[should_panic]
    fn merge_mismatched() {
        let mut left = Histogram::new(config(DomainPolicy::Legacy));
        let right = Histogram::new(config(DomainPolicy::Bounded));
        left.merge(&right);
    }
}
