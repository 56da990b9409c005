//! Implements the backends for processing pairs in teams
//!
//! The rows of the pair loop (i.e. the first index of each pair) are split
//! into contiguous chunks that hold roughly equal numbers of pairs (see
//! [`partition_rows`]). Each team processes a single chunk with its own
//! [`Histogram`] and [`RangeTracker`]. Afterwards, the partial results are
//! merged in team order. Consequently, the output only depends on the number
//! of teams (not on the backend).

use std::num::NonZeroU32;
use std::ops::Range;

use log::{debug, info};
use skysf_nostd_internal::{
    PairIter, RangeTracker, SeparationMetric, SkyPoints, n_pairs, partition_rows,
};

use crate::{Error, Histogram, HistogramConfig};

/// The result of processing some (or all) of the pairs
#[derive(Clone, Debug)]
pub struct PairReduction {
    pub histogram: Histogram,
    pub ranges: RangeTracker,
}

impl PairReduction {
    fn new(config: &HistogramConfig) -> Self {
        Self {
            histogram: Histogram::new(config.clone()),
            ranges: RangeTracker::new(),
        }
    }

    fn merge(&mut self, other: &PairReduction) {
        self.histogram.merge(&other.histogram);
        self.ranges.merge(&other.ranges);
    }
}

/// Drives the reduction over every pair of points
pub trait Executor {
    fn drive_reduce<M: SeparationMetric + Sync>(
        &mut self,
        points: &SkyPoints,
        metric: &M,
        config: &HistogramConfig,
        n_teams: NonZeroU32,
    ) -> Result<PairReduction, Error>;
}

/// Processes one team after another on the calling thread
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn drive_reduce<M: SeparationMetric + Sync>(
        &mut self,
        points: &SkyPoints,
        metric: &M,
        config: &HistogramConfig,
        n_teams: NonZeroU32,
    ) -> Result<PairReduction, Error> {
        let team_rows = team_rows(points.n_points(), n_teams);
        let mut out: Option<PairReduction> = None;
        for (team_id, rows) in team_rows.into_iter().enumerate() {
            let team_result = process_rows(points, metric, config, team_id, rows)?;
            match out.as_mut() {
                Some(reduction) => reduction.merge(&team_result),
                None => out = Some(team_result),
            }
        }
        Ok(out.unwrap_or_else(|| PairReduction::new(config)))
    }
}

/// Processes every team on a separate (scoped) thread
pub struct ThreadedExecutor;

impl Executor for ThreadedExecutor {
    fn drive_reduce<M: SeparationMetric + Sync>(
        &mut self,
        points: &SkyPoints,
        metric: &M,
        config: &HistogramConfig,
        n_teams: NonZeroU32,
    ) -> Result<PairReduction, Error> {
        let team_rows = team_rows(points.n_points(), n_teams);
        let team_results: Vec<Result<PairReduction, Error>> = std::thread::scope(|scope| {
            let handles: Vec<_> = team_rows
                .into_iter()
                .enumerate()
                .map(|(team_id, rows)| {
                    scope.spawn(move || process_rows(points, metric, config, team_id, rows))
                })
                .collect();
            // join in team order so that the merge order is fixed
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        let mut out = PairReduction::new(config);
        for (team_id, team_result) in team_results.into_iter().enumerate() {
            let team_result = team_result?;
            if team_id == 0 {
                out = team_result;
            } else {
                out.merge(&team_result);
            }
        }
        Ok(out)
    }
}

/// Splits the rows between the teams. There is never more than one team per
/// point, since any extra teams would have nothing to do.
fn team_rows(n_points: usize, n_teams: NonZeroU32) -> Vec<Range<usize>> {
    let n_teams = (n_teams.get() as usize).min(n_points.max(1));
    let mut out = vec![0..0; n_teams];
    partition_rows(n_points, &mut out);
    out
}

/// the number of pairs whose first index lies in `rows`
fn pairs_in_rows(n_points: usize, rows: &Range<usize>) -> u64 {
    n_pairs(n_points - rows.start) - n_pairs(n_points - rows.end)
}

/// Process all pairs whose first index lies in `rows`
fn process_rows<M: SeparationMetric>(
    points: &SkyPoints,
    metric: &M,
    config: &HistogramConfig,
    team_id: usize,
    rows: Range<usize>,
) -> Result<PairReduction, Error> {
    let n_team_pairs = pairs_in_rows(points.n_points(), &rows);
    debug!("team {team_id}: processing rows {rows:?} ({n_team_pairs} pairs)");

    let mut out = PairReduction::new(config);
    let progress_stride = (n_team_pairs / 10).max(1);
    let mut n_processed = 0_u64;
    for sample in PairIter::over_rows(points, metric, rows) {
        out.ranges.update(&sample);
        out.histogram.add(&sample)?;

        n_processed += 1;
        if n_processed % progress_stride == 0 && n_processed < n_team_pairs {
            info!(
                "team {team_id}: processed {n_processed}/{n_team_pairs} pairs ({}%)",
                100 * n_processed / n_team_pairs
            );
        }
    }
    debug!("team {team_id}: done");
    Ok(out)
}
