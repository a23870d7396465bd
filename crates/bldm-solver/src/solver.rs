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

use crate::error::BalanceError;
use bldm_bnb::{
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogMonitor, wrapper::WrapperMonitor,
    },
    parallel::ParallelBnbSolver,
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use bldm_model::{
    item::WeightedItem,
    model::{InvalidInputError, Model},
    solution::Solution,
};
use bldm_search::{
    deadline::Deadline,
    monitor::interrupt::InterruptMonitor,
    num::SolverNumeric,
    result::{SolverResult, TerminationReason},
};
use std::{
    sync::{Arc, atomic::AtomicBool},
    time::{Duration, Instant},
};

/// Nodes between two clock reads of the progress log.
const LOG_CLOCK_CHECK_MASK: u64 = 4095;

/// What a finished solve produced.
#[derive(Debug, Clone)]
pub struct SolveOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl<T> SolveOutcome<T>
where
    T: SolverNumeric,
{
    /// Returns the result with resolved solutions.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Consumes the outcome and returns the result.
    #[inline]
    pub fn into_result(self) -> SolverResult<T> {
        self.result
    }

    /// Returns the tied-best solutions, possibly none.
    #[inline]
    pub fn solutions(&self) -> &[Solution<T>] {
        self.result.solutions()
    }

    /// Returns the first of the tied-best solutions.
    #[inline]
    pub fn best(&self) -> Option<&Solution<T>> {
        self.solutions().first()
    }

    /// Returns why the search stopped.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the search statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Returns `true` if the search space was exhausted.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }
}

impl<T> SolveOutcome<T>
where
    T: SolverNumeric,
{
    /// Resolves the partitions of a search outcome against the model's items.
    /// Candidates of a search cut short are reported as `Feasible`.
    fn resolve(model: &Model<T>, outcome: BnbSolverOutcome<T>) -> Self {
        let (partitions, termination_reason, statistics) = outcome.into_parts();

        let solutions: Vec<Solution<T>> = partitions
            .iter()
            .map(|partition| partition.resolve(model.items()))
            .collect();
        let result = match (&termination_reason, solutions.is_empty()) {
            (TerminationReason::OptimalityProven, _) => SolverResult::Optimal(solutions),
            (TerminationReason::InfeasibilityProven, _) => SolverResult::Infeasible,
            (TerminationReason::Aborted(_), true) => SolverResult::Unknown,
            (TerminationReason::Aborted(_), false) => SolverResult::Feasible(solutions),
        };

        Self {
            result,
            termination_reason,
            statistics,
        }
    }
}

impl<T> std::fmt::Display for SolveOutcome<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.result, self.termination_reason)
    }
}

/// Splits weighted items into groups of equal size with minimal spread.
///
/// Configure it through `SolverBuilder`. A solver holds no per-run state and
/// can be reused for any number of inputs.
#[derive(Debug, Clone)]
pub struct Solver {
    time_limit: Option<Duration>,
    threads: usize,
    log_interval: Option<Duration>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Default for Solver {
    fn default() -> Self {
        SolverBuilder::new().build()
    }
}

impl Solver {
    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit.is_some()
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Validates `items`, then searches for the tied-best partitions into
    /// groups of `group_size` items.
    ///
    /// Running out of time is not an error: the outcome then holds the
    /// candidates found so far, or none.
    pub fn solve<T>(
        &self,
        items: Vec<WeightedItem<T>>,
        group_size: usize,
    ) -> Result<SolveOutcome<T>, InvalidInputError>
    where
        T: SolverNumeric,
    {
        let item_count = items.len();
        let model = Model::new(items, group_size).inspect_err(|err| {
            tracing::debug!(item_count, group_size, error = %err, "rejected input");
        })?;
        tracing::debug!(
            total_weight = %model.total_weight(),
            "input validated"
        );

        let start_time = Instant::now();
        let deadline = Deadline::from_budget(self.time_limit);
        tracing::info!(
            items = model.num_items(),
            bins = model.bin_count(),
            group_size = model.group_size(),
            budget = ?self.time_limit,
            threads = self.threads,
            "starting balanced partition search"
        );

        let outcome = ParallelBnbSolver::new(self.threads).solve(&model, deadline, || {
            self.build_monitor::<T>()
        });
        let outcome = SolveOutcome::resolve(&model, outcome);

        tracing::info!(
            result = %outcome.result,
            reason = %outcome.termination_reason,
            nodes = outcome.statistics.nodes_explored,
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "balanced partition search finished"
        );

        Ok(outcome)
    }

    /// Monitor stack for one search thread.
    fn build_monitor<T>(&self) -> CompositeTreeSearchMonitor<'_, T>
    where
        T: SolverNumeric,
    {
        let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
        if let Some(flag) = &self.interrupt {
            monitor.add_monitor(WrapperMonitor::new::<T>(InterruptMonitor::new(flag.as_ref())));
        }
        if let Some(interval) = self.log_interval {
            monitor.add_monitor(LogMonitor::<T>::new(interval, LOG_CLOCK_CHECK_MASK));
        }
        monitor
    }
}

#[derive(Debug, Clone)]
pub struct SolverBuilder {
    time_limit: Option<Duration>,
    threads: usize,
    log_interval: Option<Duration>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Default for SolverBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            time_limit: None,
            threads: 1,
            log_interval: None,
            interrupt: None,
        }
    }

    /// Stops opening new work once `limit` has elapsed. A zero limit returns
    /// before the first candidate.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Like `with_time_limit`, but `None` removes the limit.
    #[inline]
    pub fn with_optional_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Number of search threads. `1` (the default) runs the sequential
    /// search, `0` uses one thread per core.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Emits a progress line through `tracing` at most once per `interval`.
    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    /// Stops the search once `flag` is set.
    #[inline]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    #[inline]
    pub fn build(self) -> Solver {
        Solver {
            time_limit: self.time_limit,
            threads: self.threads,
            log_interval: self.log_interval,
            interrupt: self.interrupt,
        }
    }
}

/// Splits `items` into groups of exactly `group_size` items, minimizing the
/// gap between the heaviest and the lightest group.
///
/// Returns every tied-best partition found within `time_budget` (`None`
/// searches to completion).
pub fn balanced_partition<T>(
    items: Vec<WeightedItem<T>>,
    group_size: usize,
    time_budget: Option<Duration>,
) -> Result<Vec<Solution<T>>, BalanceError>
where
    T: SolverNumeric,
{
    let outcome = SolverBuilder::new()
        .with_optional_time_limit(time_budget)
        .build()
        .solve(items, group_size)?;

    let solutions = outcome.into_result().into_solutions();
    if solutions.is_empty() {
        return Err(BalanceError::NoSolutionFound);
    }
    Ok(solutions)
}

/// `balanced_partition` for bare weights; each item is labelled with its
/// weight.
pub fn balanced_partition_values<T>(
    weights: &[T],
    group_size: usize,
    time_budget: Option<Duration>,
) -> Result<Vec<Solution<T>>, BalanceError>
where
    T: SolverNumeric,
{
    let items = weights.iter().copied().map(WeightedItem::unlabeled).collect();
    balanced_partition(items, group_size, time_budget)
}
