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

use bldm_model::model::InvalidInputError;

/// Why `balanced_partition` could not return a partition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    /// The input was rejected before any search started.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// No equal-size partition was confirmed before the deadline. A longer
    /// budget may still succeed.
    #[error("no equal-size partition was found before the deadline")]
    NoSolutionFound,
}

impl BalanceError {
    /// Returns `true` if the input was rejected.
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, BalanceError::InvalidInput(_))
    }

    /// Returns `true` if the search ran but confirmed no partition.
    #[inline]
    pub fn is_no_solution_found(&self) -> bool {
        matches!(self, BalanceError::NoSolutionFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_invalid_input() {
        let err: BalanceError = InvalidInputError::IndivisibleItemCount {
            item_count: 5,
            group_size: 2,
        }
        .into();

        assert!(err.is_invalid_input());
        assert!(!err.is_no_solution_found());
        assert_eq!(
            err.to_string(),
            "invalid input: cannot divide 5 items evenly into groups of 2"
        );
    }

    #[test]
    fn test_no_solution_found_display() {
        let err = BalanceError::NoSolutionFound;
        assert!(err.is_no_solution_found());
        assert_eq!(
            err.to_string(),
            "no equal-size partition was found before the deadline"
        );
    }
}
