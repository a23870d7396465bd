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

/// Fans every callback out to a list of monitors.
///
/// `search_command` asks the monitors in insertion order and returns the
/// first command that is not `Continue`.
pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> std::fmt::Debug for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<T> + 'a>] {
        &self.monitors
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, model: &Model<T>, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(model, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_node(&mut self, frontier: &Frontier<T>, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_node(frontier, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        merged: &Partition<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(merged, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_candidate(&mut self, candidate: &Partition<T>, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_candidate(candidate, statistics);
        }
    }

    #[inline(always)]
    fn on_leaf_rejected(&mut self, leaf: &Partition<T>, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_leaf_rejected(leaf, statistics);
        }
    }

    #[inline(always)]
    fn on_bound_tightened(&mut self, bound: T, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_bound_tightened(bound, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use bldm_model::index::ItemIndex;
    use std::cell::Cell;

    struct CountingMonitor<'c> {
        candidates: &'c Cell<usize>,
        command: SearchCommand,
        asked: &'c Cell<usize>,
        bounds: &'c Cell<usize>,
    }

    impl<'c> TreeSearchMonitor<i64> for CountingMonitor<'c> {
        fn name(&self) -> &str {
            "CountingMonitor"
        }
        fn on_enter_search(&mut self, _model: &Model<i64>, _statistics: &BnbSolverStatistics) {}
        fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}
        fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
            self.asked.set(self.asked.get() + 1);
            self.command.clone()
        }
        fn on_node(&mut self, _frontier: &Frontier<i64>, _statistics: &BnbSolverStatistics) {}
        fn on_prune(
            &mut self,
            _merged: &Partition<i64>,
            _reason: PruneReason,
            _statistics: &BnbSolverStatistics,
        ) {
        }
        fn on_candidate(&mut self, _candidate: &Partition<i64>, _statistics: &BnbSolverStatistics) {
            self.candidates.set(self.candidates.get() + 1);
        }
        fn on_leaf_rejected(&mut self, _leaf: &Partition<i64>, _statistics: &BnbSolverStatistics) {}
        fn on_bound_tightened(&mut self, _bound: i64, _statistics: &BnbSolverStatistics) {
            self.bounds.set(self.bounds.get() + 1);
        }
    }

    #[test]
    fn test_callbacks_reach_every_monitor() {
        let candidates = Cell::new(0);
        let asked = Cell::new(0);
        let bounds = Cell::new(0);
        let mut composite = CompositeTreeSearchMonitor::new();
        composite.add_monitor(CountingMonitor {
            candidates: &candidates,
            command: SearchCommand::Continue,
            asked: &asked,
            bounds: &bounds,
        });
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(CountingMonitor {
            candidates: &candidates,
            command: SearchCommand::Continue,
            asked: &asked,
            bounds: &bounds,
        });
        assert_eq!(composite.len(), 3);

        let stats = BnbSolverStatistics::default();
        let leaf = Partition::singleton(ItemIndex::new(0), 5i64, 1);
        composite.on_candidate(&leaf, &stats);
        assert_eq!(candidates.get(), 2);
        composite.on_bound_tightened(3, &stats);
        assert_eq!(bounds.get(), 2);

        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);
        assert_eq!(asked.get(), 2);
    }

    #[test]
    fn test_search_command_short_circuits() {
        let candidates = Cell::new(0);
        let asked = Cell::new(0);
        let bounds = Cell::new(0);
        let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
        composite.add_monitor(CountingMonitor {
            candidates: &candidates,
            command: SearchCommand::Terminate("first".into()),
            asked: &asked,
            bounds: &bounds,
        });
        composite.add_monitor(CountingMonitor {
            candidates: &candidates,
            command: SearchCommand::Terminate("second".into()),
            asked: &asked,
            bounds: &bounds,
        });

        let stats = BnbSolverStatistics::default();
        assert_eq!(
            composite.search_command(&stats),
            SearchCommand::Terminate("first".into())
        );
        assert_eq!(asked.get(), 1);
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeTreeSearchMonitor::<i64>::default();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&BnbSolverStatistics::default()),
            SearchCommand::Continue
        );
    }
}
