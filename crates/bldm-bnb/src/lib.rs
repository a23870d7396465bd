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

//! Bldm-BnB: branch-and-bound differencing for balanced partitions
//!
//! Splits weighted items into groups of exactly `g` items so that the gap
//! between the heaviest and the lightest group is as small as possible. The
//! search starts from one singleton partition per item and repeatedly merges
//! the two worst-balanced partitions under every non-redundant bin
//! correspondence, pruning merges whose frontier provably cannot beat the
//! best candidate so far.
//!
//! Core flow
//! - Provide a validated `bldm_model::Model<T>`.
//! - Pick a `bldm_search::Deadline` and a `TreeSearchMonitor`.
//! - Run `bnb::BnbSolver` directly, or `parallel::ParallelBnbSolver` to fan
//!   the root correspondences out to a thread pool.
//!
//! Design highlights
//! - Tight inner loop: the frontier is mutated in place and restored on the
//!   way back; merged partitions are the only per-node allocations.
//! - Deterministic: the sequential solver returns the same tied set in the
//!   same order on every run.
//! - Cooperative cancellation: deadline and monitors are polled at every
//!   node and before every correspondence.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `correspondence`: enumeration of non-redundant bin correspondences.
//! - `frontier`: sorted frontier and the pruning bound.
//! - `monitor`: tree-search monitors (log, composite, wrappers).
//! - `parallel`: root-level fan-out on a `rayon` pool.
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod correspondence;
pub mod frontier;
mod incumbent;
pub mod monitor;
pub mod parallel;
pub mod result;
pub mod stats;
