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
use bldm_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
use num_traits::{PrimInt, Signed};

/// Adapts a solver-agnostic `SearchMonitor` to the tree search.
///
/// Nodes are forwarded as steps and accepted leaves as found solutions;
/// prune and rejection events have no counterpart and are dropped.
pub struct WrapperMonitor<M> {
    inner: M,
    name: String,
}

impl<M> WrapperMonitor<M> {
    /// Creates a new `WrapperMonitor` that wraps the given search monitor.
    #[inline(always)]
    pub fn new<T>(inner: M) -> Self
    where
        T: PrimInt + Signed,
        M: SearchMonitor<T>,
    {
        let name = format!("WrapperMonitor({})", inner.name());
        Self { inner, name }
    }

    /// Returns the wrapped monitor.
    #[inline(always)]
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Consumes the wrapper and returns the wrapped monitor.
    #[inline(always)]
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M> std::fmt::Debug for WrapperMonitor<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl<T, M> TreeSearchMonitor<T> for WrapperMonitor<M>
where
    T: PrimInt + Signed,
    M: SearchMonitor<T>,
{
    #[inline(always)]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _model: &Model<T>, _statistics: &BnbSolverStatistics) {
        self.inner.on_enter_search();
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_node(&mut self, _frontier: &Frontier<T>, _statistics: &BnbSolverStatistics) {
        self.inner.on_step();
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        _merged: &Partition<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    #[inline(always)]
    fn on_candidate(&mut self, candidate: &Partition<T>, _statistics: &BnbSolverStatistics) {
        self.inner.on_solution_found(candidate);
    }

    #[inline(always)]
    fn on_leaf_rejected(&mut self, _leaf: &Partition<T>, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_bound_tightened(&mut self, _bound: T, _statistics: &BnbSolverStatistics) {}
}
