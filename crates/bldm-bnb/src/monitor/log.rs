// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    frontier::Frontier,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use bldm_model::{model::Model, partition::Partition};
use num_traits::{PrimInt, Signed};
use std::time::{Duration, Instant};

/// Emits periodic progress lines through `tracing`.
///
/// The reported best covers this session's own candidates and every bound
/// it adopted from other search threads.
///
/// The clock is only consulted when `nodes_explored & clock_check_mask == 0`,
/// so the hot path stays free of system calls.
#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_max_diff: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_max_diff: None,
        }
    }

    /// Returns the best `max_diff` seen so far.
    #[inline]
    pub fn best_max_diff(&self) -> Option<T> {
        self.best_max_diff
    }

    #[inline(always)]
    fn record_best(&mut self, diff: T) {
        if self.best_max_diff.is_none_or(|best| diff < best) {
            self.best_max_diff = Some(diff);
        }
    }

    #[inline(always)]
    fn log_line(&mut self, frontier: &Frontier<T>, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let best = match self.best_max_diff {
            Some(best) => best.to_string(),
            None => "Inf".to_string(),
        };

        tracing::info!(
            elapsed_secs = now.duration_since(self.start_time).as_secs_f64(),
            nodes = stats.nodes_explored,
            frontier = frontier.len(),
            max_depth = stats.max_depth,
            best = %best,
            pruned_bound = stats.prunings_bound,
            pruned_cardinality = stats.prunings_cardinality,
            "search progress"
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_max_diff = None;
        tracing::debug!(
            items = model.num_items(),
            bins = model.bin_count(),
            group_size = model.group_size(),
            "search session started"
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        tracing::debug!(
            elapsed_secs = self.start_time.elapsed().as_secs_f64(),
            nodes = statistics.nodes_explored,
            leaves_accepted = statistics.leaves_accepted,
            "search session finished"
        );
    }

    fn on_node(&mut self, frontier: &Frontier<T>, statistics: &BnbSolverStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(frontier, statistics);
        }
    }

    fn on_prune(
        &mut self,
        _merged: &Partition<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_candidate(&mut self, candidate: &Partition<T>, _statistics: &BnbSolverStatistics) {
        self.record_best(candidate.max_diff());
    }

    fn on_leaf_rejected(&mut self, _leaf: &Partition<T>, _statistics: &BnbSolverStatistics) {}

    fn on_bound_tightened(&mut self, bound: T, _statistics: &BnbSolverStatistics) {
        self.record_best(bound);
    }
}
