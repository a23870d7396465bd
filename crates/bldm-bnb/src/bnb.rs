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

//! Branch-and-bound differencing search for balanced partitions.
//!
//! Every item starts as its own partition: one bin holding the item plus
//! `m - 1` empty bins. A search node takes the two partitions with the worst
//! imbalance, enumerates the non-redundant ways to lay their bins on top of
//! each other (see `correspondence`), and recurses on each merged result
//! until a single partition covering all items is left. That leaf is a
//! candidate iff all bins hold the same number of items and its `max_diff`
//! does not exceed the best bound.
//!
//! A merged child is pruned when the frontier it would produce cannot beat
//! the best bound (`largest max_diff - sum of the others`) or can no longer
//! equalize its bin sizes. Tied-optimal leaves are all kept.
//!
//! The frontier is mutated in place and restored on the way back, so the
//! only allocations per node are the merged partitions themselves. The
//! deadline and the monitor are polled at the top of every node and before
//! every correspondence; once either asks to stop, no new work is opened and
//! the candidates found so far are returned.

use crate::{
    correspondence::Correspondences,
    frontier::{Frontier, FrontierBound},
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use bldm_model::{model::Model, partition::Partition};
use bldm_search::{
    deadline::Deadline, incumbent::SharedIncumbent, monitor::search_monitor::SearchCommand,
    num::SolverNumeric,
};
use num_traits::{PrimInt, Signed};

/// The recursive differencing solver.
///
/// The solver owns the frontier while a search runs; between solves the
/// frontier is empty.
#[derive(Clone, Debug)]
pub struct BnbSolver<T>
where
    T: PrimInt + Signed,
{
    frontier: Frontier<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: PrimInt + Signed,
{
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            frontier: Frontier::default(),
        }
    }

    /// Solve the given model before `deadline`, reporting to `monitor`.
    /// This variant does not use a shared incumbent and thus
    /// acts as a standalone, single threaded solver.
    #[inline]
    pub fn solve<S>(
        &mut self,
        model: &Model<T>,
        deadline: Deadline,
        monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
        T: SolverNumeric,
    {
        let frontier = Frontier::from_partitions(model.initial_partitions());
        self.solve_frontier(model, frontier, deadline, monitor, NoSharedIncumbent::new())
    }

    /// Solve the given model while synchronizing the best bound and the
    /// tied-best candidates through `incumbent`.
    ///
    /// The returned outcome only carries the candidates this run still holds
    /// at the end; the complete tied set lives in the incumbent.
    #[inline]
    pub fn solve_with_incumbent<S>(
        &mut self,
        model: &Model<T>,
        deadline: Deadline,
        monitor: S,
        incumbent: &SharedIncumbent<T>,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
        T: SolverNumeric,
    {
        let frontier = Frontier::from_partitions(model.initial_partitions());
        self.solve_frontier(
            model,
            frontier,
            deadline,
            monitor,
            SharedIncumbentAdapter::new(incumbent),
        )
    }

    /// Searches from an arbitrary frontier. Used by the parallel solver to
    /// continue below a root correspondence.
    pub(crate) fn solve_frontier<S, I>(
        &mut self,
        model: &Model<T>,
        frontier: Frontier<T>,
        deadline: Deadline,
        mut monitor: S,
        incumbent: I,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
        I: IncumbentStore<T>,
        T: SolverNumeric,
    {
        debug_assert!(
            frontier.iter().all(|p| p.num_bins() == model.bin_count()),
            "called `BnbSolver::solve_frontier` with partitions of the wrong bin count"
        );

        self.frontier = frontier;
        let session = BnbSolverSearchSession::new(self, model, deadline, &mut monitor, incumbent);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Drops the frontier left over from the last run.
    #[inline]
    fn reset(&mut self) {
        self.frontier = Frontier::default();
    }
}

/// Decides whether a merged child can be discarded, given the frontier
/// bound it would produce and the current best `max_diff`.
#[inline]
pub(crate) fn prune_reason<T>(bound: &FrontierBound<T>, best_max_diff: T) -> Option<PruneReason>
where
    T: PrimInt + Signed,
{
    if bound.imbalance_lower_bound > best_max_diff {
        Some(PruneReason::BoundDominated)
    } else if bound.cardinality_infeasible() {
        Some(PruneReason::CardinalityImbalance)
    } else {
        None
    }
}

/// Tied-best candidates of one search node and the bound they establish.
#[derive(Debug, Clone)]
struct SolutionPool<T> {
    bound: T,
    solutions: Vec<Partition<T>>,
}

impl<T> SolutionPool<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn new(bound: T) -> Self {
        Self {
            bound,
            solutions: Vec::new(),
        }
    }

    #[inline]
    fn bound(&self) -> T {
        self.bound
    }

    /// Takes the candidates a child returned: a strictly better batch
    /// replaces the pool, a tying one is appended.
    fn absorb(&mut self, batch: Vec<Partition<T>>) {
        let Some(diff) = batch.first().map(Partition::max_diff) else {
            return;
        };
        match self.solutions.first().map(Partition::max_diff) {
            Some(best) if diff == best => self.solutions.extend(batch),
            Some(best) if diff > best => {}
            _ if diff <= self.bound => {
                self.solutions = batch;
                self.bound = diff;
            }
            _ => {}
        }
    }

    /// Lowers the bound to `bound` if that is tighter, dropping candidates
    /// that no longer meet it.
    #[inline]
    fn tighten(&mut self, bound: T) {
        if bound < self.bound {
            self.bound = bound;
            self.solutions.retain(|p| p.max_diff() <= bound);
        }
    }

    #[inline]
    fn into_solutions(self) -> Vec<Partition<T>> {
        self.solutions
    }
}

/// A search session for the differencing solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, T, S, I>
where
    T: SolverNumeric,
    I: IncumbentStore<T>,
{
    solver: &'a mut BnbSolver<T>,
    model: &'a Model<T>,
    deadline: Deadline,
    monitor: &'a mut S,
    incumbent: I,
    abort_reason: Option<String>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, S, I> std::fmt::Debug for BnbSolverSearchSession<'a, T, S, I>
where
    T: SolverNumeric,
    S: TreeSearchMonitor<T>,
    I: IncumbentStore<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("frontier", &self.solver.frontier)
            .field("deadline", &self.deadline)
            .field("abort_reason", &self.abort_reason)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S, I> BnbSolverSearchSession<'a, T, S, I>
where
    T: SolverNumeric,
    S: TreeSearchMonitor<T>,
    I: IncumbentStore<T>,
{
    /// Create a new search session.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        model: &'a Model<T>,
        deadline: Deadline,
        monitor: &'a mut S,
        incumbent: I,
    ) -> Self {
        Self {
            solver,
            model,
            deadline,
            monitor,
            incumbent,
            abort_reason: None,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> BnbSolverOutcome<T> {
        self.monitor.on_enter_search(self.model, &self.stats);

        let bound = self.incumbent.initial_upper_bound();
        if bound < T::max_value() {
            self.monitor.on_bound_tightened(bound, &self.stats);
        }
        let solutions = self.search(bound, 0);

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        BnbSolverOutcome::from_search(solutions, self.abort_reason, self.stats)
    }

    /// Returns `true` once the deadline has passed or a monitor asked to stop.
    /// The first reason is remembered, so every later checkpoint stops too.
    fn should_stop(&mut self) -> bool {
        if self.abort_reason.is_some() {
            return true;
        }
        let reason = if self.deadline.has_passed() {
            "deadline reached".to_string()
        } else if let SearchCommand::Terminate(reason) = self.monitor.search_command(&self.stats) {
            reason
        } else {
            return false;
        };
        self.stats.on_abort();
        self.abort_reason = Some(reason);
        true
    }

    /// Explores the current frontier and returns the tied-best candidates
    /// found below it, none of them worse than `bound`.
    fn search(&mut self, bound: T, depth: u64) -> Vec<Partition<T>> {
        if self.should_stop() {
            return Vec::new();
        }

        self.stats.on_node_explored(depth);
        self.monitor.on_node(&self.solver.frontier, &self.stats);

        let Some((left, right)) = self.solver.frontier.pop_worst_pair() else {
            return self.evaluate_leaf(bound);
        };

        let mut pool = SolutionPool::new(bound);
        for correspondence in Correspondences::between(&left, &right) {
            if self.should_stop() {
                break;
            }
            let shared = self.incumbent.tighten(pool.bound());
            if shared < pool.bound() {
                self.monitor.on_bound_tightened(shared, &self.stats);
                pool.tighten(shared);
            }
            self.stats.on_correspondence_generated();

            let merged = Partition::merge(&left, &right, &correspondence);
            let frontier_bound = self.solver.frontier.bound_with(&merged);
            if let Some(reason) = prune_reason(&frontier_bound, pool.bound()) {
                match reason {
                    PruneReason::BoundDominated => self.stats.on_pruning_bound(),
                    PruneReason::CardinalityImbalance => self.stats.on_pruning_cardinality(),
                }
                self.monitor.on_prune(&merged, reason, &self.stats);
                continue;
            }

            let position = self.solver.frontier.insert(merged);
            let found = self.search(pool.bound(), depth + 1);
            self.solver.frontier.remove(position);
            pool.absorb(found);
        }

        self.solver.frontier.restore_worst(right);
        self.solver.frontier.restore_worst(left);
        pool.into_solutions()
    }

    /// Checks the single partition left in the frontier.
    fn evaluate_leaf(&mut self, bound: T) -> Vec<Partition<T>> {
        let Some(leaf) = self.solver.frontier.worst() else {
            return Vec::new();
        };

        if leaf.max_card_diff() == 0 && leaf.max_diff() <= bound {
            self.stats.on_leaf_accepted();
            self.monitor.on_candidate(leaf, &self.stats);
            self.incumbent.on_candidate(leaf);
            vec![leaf.clone()]
        } else {
            self.stats.on_leaf_rejected();
            self.monitor.on_leaf_rejected(leaf, &self.stats);
            Vec::new()
        }
    }
}
