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
use bldm_search::monitor::search_monitor::SearchCommand;
use num_traits::{PrimInt, Signed};

#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T>
where
    T: PrimInt + Signed,
{
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for NoOperationMonitor<T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _model: &Model<T>, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_node(&mut self, _frontier: &Frontier<T>, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_prune(
        &mut self,
        _merged: &Partition<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    #[inline(always)]
    fn on_candidate(&mut self, _candidate: &Partition<T>, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_leaf_rejected(&mut self, _leaf: &Partition<T>, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_bound_tightened(&mut self, _bound: T, _statistics: &BnbSolverStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::NoOperationMonitor;
    use crate::monitor::tree_search_monitor::TreeSearchMonitor;
    use crate::stats::BnbSolverStatistics;
    use bldm_search::monitor::search_monitor::SearchCommand;

    #[test]
    fn test_no_op_monitor_always_continues() {
        let mut monitor = NoOperationMonitor::<i64>::new();
        let stats = BnbSolverStatistics::default();
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        assert_eq!(monitor.name(), "NoOperationMonitor");
    }
}
