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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing and
//! controlling the differencing search. Callbacks track the solver lifecycle,
//! and a monitor can stop execution via `SearchCommand` (default: Continue).
//!
//! Lifecycle highlights
//! - enter → node → {prune | descend} → candidate/rejected leaf → exit
//! - `on_bound_tightened` may fire at any node when workers share a bound.
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; a monitor belongs to exactly one search thread.
//! - A `Terminate` command is treated exactly like a passed deadline.

use crate::{frontier::Frontier, stats::BnbSolverStatistics};
use bldm_model::{model::Model, partition::Partition};
use bldm_search::monitor::search_monitor::SearchCommand;
use num_traits::{PrimInt, Signed};

/// Reasons for discarding a merged partition without descending into it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The frontier's imbalance lower bound already exceeds the best `max_diff`.
    BoundDominated,
    /// One bin holds more items than all other partitions together can balance.
    CardinalityImbalance,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::CardinalityImbalance => write!(f, "CardinalityImbalance"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called to determine the next action of the search.
    fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called when a search node (a frontier state) is entered.
    fn on_node(&mut self, frontier: &Frontier<T>, statistics: &BnbSolverStatistics);
    /// Called when a merged partition is discarded.
    fn on_prune(
        &mut self,
        merged: &Partition<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    );
    /// Called when a complete partition is accepted as a candidate.
    fn on_candidate(&mut self, candidate: &Partition<T>, statistics: &BnbSolverStatistics);
    /// Called when a complete partition fails the size or bound check.
    fn on_leaf_rejected(&mut self, leaf: &Partition<T>, statistics: &BnbSolverStatistics);
    /// Called when the search adopts a tighter bound from its incumbent
    /// store, i.e. a candidate found by another search thread.
    fn on_bound_tightened(&mut self, bound: T, statistics: &BnbSolverStatistics);
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::PruneReason;

    #[test]
    fn test_prune_reason_display() {
        assert_eq!(format!("{}", PruneReason::BoundDominated), "BoundDominated");
        assert_eq!(
            format!("{}", PruneReason::CardinalityImbalance),
            "CardinalityImbalance"
        );
    }
}
