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

//! Root-level parallel fan-out
//!
//! Every correspondence of the root merge spans an independent subtree. The
//! parallel solver hands each of them to a `rayon` worker running the same
//! `BnbSolver` below it. Workers share nothing but a `SharedIncumbent`: they
//! pull the global bound in before every correspondence and publish every
//! accepted leaf, and installation re-checks the bound under the lock, so a
//! late worker never commits a worse candidate. Ties from all workers are
//! kept.
//!
//! The tied candidates are collected in the incumbent; the order in which
//! workers install them is not deterministic, the set itself is.
//!
//! Every branch runs its own monitor session. Start and end of the whole
//! search are logged once here, and bounds a branch pulls from the shared
//! incumbent reach its monitor through `on_bound_tightened`.

use crate::{
    bnb::{BnbSolver, prune_reason},
    correspondence::{Correspondence, Correspondences},
    frontier::Frontier,
    incumbent::SharedIncumbentAdapter,
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use bldm_model::{model::Model, partition::Partition};
use bldm_search::{
    deadline::Deadline, incumbent::SharedIncumbent, num::SolverNumeric,
    result::TerminationReason,
};
use rayon::prelude::*;
use std::time::Instant;

/// Runs the root correspondences of a search on a dedicated thread pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelBnbSolver {
    num_threads: usize,
}

impl Default for ParallelBnbSolver {
    fn default() -> Self {
        Self::new(0)
    }
}

/// The fixed inputs every root branch shares.
struct RootSplit<'a, T> {
    model: &'a Model<T>,
    rest: &'a Frontier<T>,
    left: &'a Partition<T>,
    right: &'a Partition<T>,
    deadline: Deadline,
    incumbent: &'a SharedIncumbent<T>,
}

impl ParallelBnbSolver {
    /// Creates a solver using `num_threads` workers. `0` lets `rayon` pick
    /// the number of threads; `1` runs the plain sequential search.
    #[inline]
    pub fn new(num_threads: usize) -> Self {
        Self { num_threads }
    }

    /// Returns the configured number of worker threads.
    #[inline]
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Solves `model` before `deadline`. Every worker task gets its own
    /// monitor from `monitor_factory`.
    pub fn solve<T, F, S>(
        &self,
        model: &Model<T>,
        deadline: Deadline,
        monitor_factory: F,
    ) -> BnbSolverOutcome<T>
    where
        T: SolverNumeric,
        F: Fn() -> S + Sync,
        S: TreeSearchMonitor<T>,
    {
        if self.num_threads == 1 {
            return BnbSolver::new().solve(model, deadline, monitor_factory());
        }

        let mut rest = Frontier::from_partitions(model.initial_partitions());
        let Some((left, right)) = rest.pop_worst_pair() else {
            return BnbSolver::new().solve(model, deadline, monitor_factory());
        };

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()
        {
            Ok(pool) => pool,
            Err(err) => {
                tracing::warn!(error = %err, "failed to build thread pool, searching sequentially");
                return BnbSolver::new().solve(model, deadline, monitor_factory());
            }
        };

        let start_time = Instant::now();
        let mut stats = BnbSolverStatistics::default();
        if deadline.has_passed() {
            stats.on_abort();
            stats.set_total_time(start_time.elapsed());
            return BnbSolverOutcome::aborted(Vec::new(), "deadline reached", stats);
        }
        stats.on_node_explored(0);

        let roots: Vec<Correspondence> = Correspondences::between(&left, &right).collect();
        let incumbent = SharedIncumbent::new();
        let split = RootSplit {
            model,
            rest: &rest,
            left: &left,
            right: &right,
            deadline,
            incumbent: &incumbent,
        };

        tracing::info!(
            threads = pool.current_num_threads(),
            branches = roots.len(),
            items = model.num_items(),
            bins = model.bin_count(),
            "parallel search started"
        );

        let branches: Vec<(Option<String>, BnbSolverStatistics)> = pool.install(|| {
            roots
                .par_iter()
                .map(|correspondence| explore_branch(&split, correspondence, &monitor_factory))
                .collect()
        });

        let mut abort_reason = None;
        for (reason, branch_stats) in branches {
            stats.absorb(&branch_stats);
            if abort_reason.is_none() {
                abort_reason = reason;
            }
        }
        stats.set_total_time(start_time.elapsed());

        tracing::info!(
            elapsed_secs = stats.time_total.as_secs_f64(),
            nodes = stats.nodes_explored,
            leaves_accepted = stats.leaves_accepted,
            best = ?incumbent.upper_bound_as(),
            aborted = abort_reason.is_some(),
            "parallel search finished"
        );

        BnbSolverOutcome::from_search(incumbent.into_solutions(), abort_reason, stats)
    }
}

/// Searches the subtree below one root correspondence.
fn explore_branch<T, F, S>(
    split: &RootSplit<'_, T>,
    correspondence: &Correspondence,
    monitor_factory: &F,
) -> (Option<String>, BnbSolverStatistics)
where
    T: SolverNumeric,
    F: Fn() -> S + Sync,
    S: TreeSearchMonitor<T>,
{
    let mut stats = BnbSolverStatistics::default();
    stats.on_correspondence_generated();

    let merged = Partition::merge(split.left, split.right, correspondence);
    let best = split.incumbent.upper_bound_as().unwrap_or_else(T::max_value);
    if let Some(reason) = prune_reason(&split.rest.bound_with(&merged), best) {
        match reason {
            PruneReason::BoundDominated => stats.on_pruning_bound(),
            PruneReason::CardinalityImbalance => stats.on_pruning_cardinality(),
        }
        return (None, stats);
    }

    let mut frontier = split.rest.clone();
    frontier.insert(merged);

    let outcome = BnbSolver::new().solve_frontier(
        split.model,
        frontier,
        split.deadline,
        monitor_factory(),
        SharedIncumbentAdapter::new(split.incumbent),
    );
    let (_, termination_reason, mut branch_stats) = outcome.into_parts();

    // The branch root sits one level below the shared root.
    if branch_stats.nodes_explored > 0 {
        branch_stats.max_depth = branch_stats.max_depth.saturating_add(1);
    }
    branch_stats.absorb(&stats);

    let abort_reason = match termination_reason {
        TerminationReason::Aborted(reason) => Some(reason),
        _ => None,
    };
    (abort_reason, branch_stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use bldm_model::item::WeightedItem;
    use rand::{Rng, SeedableRng, rngs::SmallRng};
    use std::time::Duration;

    type IntegerType = i64;

    fn build_model(weights: &[IntegerType], group_size: usize) -> Model<IntegerType> {
        let items = weights
            .iter()
            .map(|&w| WeightedItem::unlabeled(w))
            .collect();
        Model::new(items, group_size).unwrap()
    }

    fn sorted_bins(partition: &Partition<IntegerType>) -> Vec<Vec<usize>> {
        let mut bins: Vec<Vec<usize>> = partition
            .bins()
            .iter()
            .map(|b| {
                let mut items: Vec<usize> = b.items().iter().map(|i| i.get()).collect();
                items.sort_unstable();
                items
            })
            .collect();
        bins.sort();
        bins
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = SmallRng::seed_from_u64(7);
        let solver = ParallelBnbSolver::new(4);

        for (n, g) in [(4, 2), (6, 2), (6, 3), (8, 4)] {
            for _ in 0..3 {
                let weights: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..50)).collect();
                let model = build_model(&weights, g);

                let sequential =
                    BnbSolver::new().solve(&model, Deadline::never(), NoOperationMonitor::new());
                let parallel = solver.solve(&model, Deadline::never(), NoOperationMonitor::new);

                assert_eq!(
                    parallel.termination_reason(),
                    &TerminationReason::OptimalityProven
                );
                assert_eq!(parallel.best_max_diff(), sequential.best_max_diff());

                let mut expected: Vec<_> =
                    sequential.solutions().iter().map(sorted_bins).collect();
                let mut actual: Vec<_> = parallel.solutions().iter().map(sorted_bins).collect();
                expected.sort();
                actual.sort();
                assert_eq!(actual, expected, "weights {:?}, group size {}", weights, g);
            }
        }
    }

    #[test]
    fn test_single_thread_runs_sequentially() {
        let model = build_model(&[10, 8, 6, 4], 2);
        let outcome =
            ParallelBnbSolver::new(1).solve(&model, Deadline::never(), NoOperationMonitor::new);
        assert_eq!(outcome.best_max_diff(), Some(0));
    }

    #[test]
    fn test_single_item_falls_back_to_sequential() {
        let model = build_model(&[3], 1);
        let outcome =
            ParallelBnbSolver::new(2).solve(&model, Deadline::never(), NoOperationMonitor::new);
        assert_eq!(outcome.solutions().len(), 1);
    }

    #[test]
    fn test_zero_deadline_aborts_without_work() {
        let weights: Vec<IntegerType> = (1..=24).collect();
        let model = build_model(&weights, 3);
        let outcome = ParallelBnbSolver::new(2).solve(
            &model,
            Deadline::after(Duration::ZERO),
            NoOperationMonitor::new,
        );

        assert!(outcome.termination_reason().is_aborted());
        assert!(outcome.solutions().is_empty());
        assert_eq!(outcome.statistics().nodes_explored, 0);
    }
}
