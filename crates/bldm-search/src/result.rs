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

use bldm_model::solution::Solution;
use num_traits::{PrimInt, Signed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// The search tree was exhausted without an equal-size candidate.
    Infeasible,
    /// The search tree was exhausted; these are all tied-optimal partitions found.
    Optimal(Vec<Solution<T>>),
    /// The search was cut short; these are the best partitions found so far.
    Feasible(Vec<Solution<T>>),
    /// The search was cut short before any candidate was confirmed.
    Unknown,
}

impl<T> SolverResult<T> {
    /// Returns the solutions carried by this result, if any.
    #[inline]
    pub fn solutions(&self) -> &[Solution<T>] {
        match self {
            SolverResult::Optimal(solutions) | SolverResult::Feasible(solutions) => solutions,
            SolverResult::Infeasible | SolverResult::Unknown => &[],
        }
    }

    /// Consumes the result and returns its solutions.
    #[inline]
    pub fn into_solutions(self) -> Vec<Solution<T>> {
        match self {
            SolverResult::Optimal(solutions) | SolverResult::Feasible(solutions) => solutions,
            SolverResult::Infeasible | SolverResult::Unknown => Vec::new(),
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solutions) => match solutions.first() {
                Some(best) => write!(
                    f,
                    "Optimal(max_diff={}, ties={})",
                    best.max_diff(),
                    solutions.len()
                ),
                None => write!(f, "Optimal(none)"),
            },
            SolverResult::Feasible(solutions) => match solutions.first() {
                Some(best) => write!(
                    f,
                    "Feasible(max_diff={}, ties={})",
                    best.max_diff(),
                    solutions.len()
                ),
                None => write!(f, "Feasible(none)"),
            },
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search tree was fully explored.
    OptimalityProven,
    /// The search tree was fully explored and held no equal-size candidate.
    InfeasibilityProven,
    /// The search stopped early (deadline, interrupt, ...).
    /// The string says why.
    Aborted(String),
}

impl TerminationReason {
    /// Returns `true` if the search did not run to completion.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, TerminationReason::Aborted(_))
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bldm_model::{item::WeightedItem, solution::Group};

    fn solution(max_diff: i64) -> Solution<i64> {
        Solution::new(
            vec![Group::new(vec![WeightedItem::new("A", 3)], 3)],
            max_diff,
        )
    }

    #[test]
    fn test_solutions_accessor() {
        let optimal = SolverResult::Optimal(vec![solution(0), solution(0)]);
        assert_eq!(optimal.solutions().len(), 2);
        assert!(SolverResult::<i64>::Unknown.solutions().is_empty());
        assert!(SolverResult::<i64>::Infeasible.into_solutions().is_empty());
        assert_eq!(SolverResult::Feasible(vec![solution(2)]).into_solutions().len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", SolverResult::Optimal(vec![solution(0), solution(0)])),
            "Optimal(max_diff=0, ties=2)"
        );
        assert_eq!(
            format!("{}", SolverResult::Feasible(vec![solution(5)])),
            "Feasible(max_diff=5, ties=1)"
        );
        assert_eq!(format!("{}", SolverResult::<i64>::Unknown), "Unknown");
        assert_eq!(
            format!("{}", TerminationReason::Aborted("deadline reached".into())),
            "Aborted: deadline reached"
        );
    }

    #[test]
    fn test_is_aborted() {
        assert!(TerminationReason::Aborted(String::new()).is_aborted());
        assert!(!TerminationReason::OptimalityProven.is_aborted());
    }
}
