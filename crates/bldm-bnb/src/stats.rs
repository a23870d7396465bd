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

use std::time::Duration;

/// Statistics collected during a branch-and-bound run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BnbSolverStatistics {
    /// Total search nodes (recursive calls) visited.
    pub nodes_explored: u64,
    /// Bin correspondences produced by the enumerator.
    pub correspondences_generated: u64,
    /// Correspondences pruned because the frontier bound exceeded the best `max_diff`.
    pub prunings_bound: u64,
    /// Correspondences pruned because bin cardinalities could no longer equalize.
    pub prunings_cardinality: u64,
    /// Complete partitions accepted as candidates.
    pub leaves_accepted: u64,
    /// Complete partitions rejected (unequal sizes or worse than the bound).
    pub leaves_rejected: u64,
    /// The deepest merge level reached.
    pub max_depth: u64,
    /// Number of times a checkpoint found the deadline or a stop request.
    pub aborts: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self, depth: u64) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_correspondence_generated(&mut self) {
        self.correspondences_generated = self.correspondences_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_cardinality(&mut self) {
        self.prunings_cardinality = self.prunings_cardinality.saturating_add(1);
    }

    #[inline]
    pub fn on_leaf_accepted(&mut self) {
        self.leaves_accepted = self.leaves_accepted.saturating_add(1);
    }

    #[inline]
    pub fn on_leaf_rejected(&mut self) {
        self.leaves_rejected = self.leaves_rejected.saturating_add(1);
    }

    #[inline]
    pub fn on_abort(&mut self) {
        self.aborts = self.aborts.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total number of pruned correspondences.
    #[inline]
    pub fn prunings(&self) -> u64 {
        self.prunings_bound.saturating_add(self.prunings_cardinality)
    }

    /// Folds the counters of another (parallel) run into this one.
    /// Times are not summed; the caller sets the wall-clock total.
    pub fn absorb(&mut self, other: &Self) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.correspondences_generated = self
            .correspondences_generated
            .saturating_add(other.correspondences_generated);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.prunings_cardinality = self
            .prunings_cardinality
            .saturating_add(other.prunings_cardinality);
        self.leaves_accepted = self.leaves_accepted.saturating_add(other.leaves_accepted);
        self.leaves_rejected = self.leaves_rejected.saturating_add(other.leaves_rejected);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.aborts = self.aborts.saturating_add(other.aborts);
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bldm-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Correspondences:       {}", self.correspondences_generated)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (cardinality):{}", self.prunings_cardinality)?;
        writeln!(f, "  Leaves accepted:       {}", self.leaves_accepted)?;
        writeln!(f, "  Leaves rejected:       {}", self.leaves_rejected)?;
        writeln!(f, "  Aborts:                {}", self.aborts)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_depth() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_node_explored(0);
        stats.on_node_explored(3);
        stats.on_node_explored(2);
        stats.on_pruning_bound();
        stats.on_pruning_cardinality();
        stats.on_pruning_cardinality();

        assert_eq!(stats.nodes_explored, 3);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.prunings(), 3);
    }

    #[test]
    fn test_absorb_sums_counters_and_keeps_deepest() {
        let mut a = BnbSolverStatistics {
            nodes_explored: 10,
            max_depth: 4,
            leaves_accepted: 1,
            ..Default::default()
        };
        let b = BnbSolverStatistics {
            nodes_explored: 5,
            max_depth: 7,
            leaves_accepted: 2,
            aborts: 1,
            time_total: Duration::from_secs(9),
            ..Default::default()
        };
        a.absorb(&b);

        assert_eq!(a.nodes_explored, 15);
        assert_eq!(a.max_depth, 7);
        assert_eq!(a.leaves_accepted, 3);
        assert_eq!(a.aborts, 1);
        assert_eq!(a.time_total, Duration::ZERO);
    }

    #[test]
    fn test_display_mentions_counters() {
        let stats = BnbSolverStatistics {
            nodes_explored: 42,
            ..Default::default()
        };
        let rendered = format!("{}", stats);
        assert!(rendered.starts_with("Bldm-BnB Solver Statistics:"));
        assert!(rendered.contains("Nodes explored:        42"));
    }
}
