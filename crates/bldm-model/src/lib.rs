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

//! # Bldm Model
//!
//! Data model for balanced k-way partitioning: split `n` weighted items into
//! `m = n / g` groups of exactly `g` items each, minimizing the gap between
//! the heaviest and the lightest group.
//!
//! ## Modules
//!
//! - `item`: `WeightedItem<T>`, an immutable `(label, weight)` pair.
//! - `bin`: `Bin<T>`, one group of item indices plus its weight sum.
//! - `partition`: `Partition<T>`, exactly `m` bins sorted by descending sum
//!   with derived statistics, plus the pairwise `merge` under a bin
//!   correspondence and the worst-imbalance-first comparator.
//! - `model`: validated input (`Model<T>`) and `InvalidInputError`.
//! - `solution`: resolved output (`Solution<T>`, `Group<T>`).
//! - `index`: typed `ItemIndex`/`BinIndex`.
//!
//! Weights are signed primitive integers (`num_traits::PrimInt + Signed`);
//! negative values are rejected by `Model::new`.

pub mod bin;
pub mod index;
pub mod item;
pub mod model;
pub mod partition;
pub mod solution;
