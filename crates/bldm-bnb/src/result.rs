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

use crate::stats::BnbSolverStatistics;
use bldm_model::partition::Partition;
use bldm_search::result::TerminationReason;
use num_traits::{PrimInt, Signed};

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    solutions: Vec<Partition<T>>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl<T> BnbSolverOutcome<T>
where
    T: PrimInt + Signed,
{
    /// The tree was exhausted and `solutions` are all tied-optimal candidates.
    ///
    /// # Panics
    ///
    /// Panics if `solutions` is empty.
    #[inline]
    pub fn optimal(solutions: Vec<Partition<T>>, statistics: BnbSolverStatistics) -> Self {
        assert!(
            !solutions.is_empty(),
            "called `BnbSolverOutcome::optimal` without solutions"
        );
        Self {
            solutions,
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics) -> Self {
        Self {
            solutions: Vec::new(),
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(
        solutions: Vec<Partition<T>>,
        reason: R,
        statistics: BnbSolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        Self {
            solutions,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Picks the constructor matching how the search ended.
    #[inline]
    pub fn from_search(
        solutions: Vec<Partition<T>>,
        abort_reason: Option<String>,
        statistics: BnbSolverStatistics,
    ) -> Self {
        match abort_reason {
            Some(reason) => Self::aborted(solutions, reason, statistics),
            None if solutions.is_empty() => Self::infeasible(statistics),
            None => Self::optimal(solutions, statistics),
        }
    }

    /// Returns the tied-best partitions (possibly empty).
    #[inline]
    pub fn solutions(&self) -> &[Partition<T>] {
        &self.solutions
    }

    /// Consumes the outcome and returns the tied-best partitions.
    #[inline]
    pub fn into_solutions(self) -> Vec<Partition<T>> {
        self.solutions
    }

    /// Returns the `max_diff` shared by all returned partitions.
    #[inline]
    pub fn best_max_diff(&self) -> Option<T> {
        self.solutions.first().map(Partition::max_diff)
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Splits the outcome into its parts.
    #[inline]
    pub fn into_parts(self) -> (Vec<Partition<T>>, TerminationReason, BnbSolverStatistics) {
        (self.solutions, self.termination_reason, self.statistics)
    }
}
