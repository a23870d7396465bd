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

//! # Solver Numeric Trait
//!
//! Collects the integer capabilities the search needs from a weight type
//! into a single bound: primitive signed arithmetic, lossless widening to
//! `i64` (so a bound can live in an `AtomicI64`) and the reverse conversion,
//! printing, and thread-safety for the parallel search.
//!
//! Implemented for `i8`, `i16`, `i32` and `i64`.

use num_traits::{PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for weight types that can be used in the solver.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + Into<i64>
    + TryFrom<i64>
    + std::fmt::Debug
    + std::fmt::Display
    + Hash
    + Send
    + Sync
    + 'static
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + Into<i64>
        + TryFrom<i64>
        + std::fmt::Debug
        + std::fmt::Display
        + Hash
        + Send
        + Sync
        + 'static
{
}

#[cfg(test)]
mod tests {
    use super::SolverNumeric;

    fn widen<T: SolverNumeric>(value: T) -> i64 {
        value.into()
    }

    #[test]
    fn test_common_weight_types_qualify() {
        assert_eq!(widen(5i8), 5);
        assert_eq!(widen(-3i16), -3);
        assert_eq!(widen(1_000i32), 1_000);
        assert_eq!(widen(i64::MAX), i64::MAX);
    }
}
