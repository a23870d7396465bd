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

//! # Bldm Solver
//!
//! Fair team assignment: split `n` weighted items (players and their skill
//! values) into groups of exactly `g` items so that the heaviest and the
//! lightest group differ as little as possible.
//!
//! The search is anytime. Give it a time budget and it returns the best
//! partitions confirmed before the budget ran out; without a budget it runs
//! to completion and proves optimality.
//!
//! ## Modules
//!
//! - `solver`: `Solver`/`SolverBuilder` and the `balanced_partition`
//!   convenience entry points.
//! - `error`: `BalanceError`, the top-level error taxonomy.
//!
//! ## Example
//!
//! ```
//! use bldm_model::item::WeightedItem;
//! use bldm_solver::solver::balanced_partition;
//!
//! let items = vec![
//!     WeightedItem::new("A", 10),
//!     WeightedItem::new("B", 8),
//!     WeightedItem::new("C", 6),
//!     WeightedItem::new("D", 4),
//! ];
//! let solutions = balanced_partition(items, 2, None).unwrap();
//!
//! let best = &solutions[0];
//! assert_eq!(best.max_diff(), 0);
//! assert!(best.groups().iter().all(|group| group.total() == 14));
//! ```

pub mod error;
pub mod solver;
