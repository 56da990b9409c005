//! Configuration of a calculation
//!
//! We draw a distinction between parameters that determine the result
//! ([`HistogramConfig`]) and parameters that only impact performance
//! ([`RuntimeSpec`]). Changing the latter never changes the result beyond
//! differences in floating point summation order.

use std::num::NonZeroU32;

use skysf_nostd_internal::{DomainPolicy, RoundedBinEdges};

use crate::Error;

/// Describes how pair samples are binned by separation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistogramConfig {
    edges: RoundedBinEdges,
    domain: DomainPolicy,
}

impl HistogramConfig {
    /// Validates the bin geometry.
    ///
    /// `bin_start` and `bin_size` share the units of the separation metric
    /// (degrees or `log10(degrees)`).
    pub fn new(
        bin_start: f64,
        n_bins: usize,
        bin_size: f64,
        domain: DomainPolicy,
    ) -> Result<Self, Error> {
        let edges = RoundedBinEdges::new(bin_start, n_bins, bin_size).map_err(Error::bin_config)?;
        Ok(Self { edges, domain })
    }

    pub fn edges(&self) -> &RoundedBinEdges {
        &self.edges
    }

    pub fn domain(&self) -> DomainPolicy {
        self.domain
    }

    pub fn n_bins(&self) -> usize {
        self.edges.n_bins()
    }
}

/// Performance-related parameters.
///
/// The outer loop over pairs is split into `n_teams` contiguous chunks. Each
/// chunk is processed by a separate team with its own partial histogram and
/// the partial results are merged in team order. When `threaded` is `true`,
/// every team runs on its own thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeSpec {
    n_teams: NonZeroU32,
    threaded: bool,
}

impl RuntimeSpec {
    pub fn new(n_teams: NonZeroU32, threaded: bool) -> Self {
        Self { n_teams, threaded }
    }

    /// a single team on the calling thread
    pub fn serial() -> Self {
        Self::new(NonZeroU32::MIN, false)
    }

    pub fn n_teams(&self) -> NonZeroU32 {
        self.n_teams
    }

    pub fn threaded(&self) -> bool {
        self.threaded
    }
}

impl Default for RuntimeSpec {
    fn default() -> Self {
        Self::serial()
    }
}
