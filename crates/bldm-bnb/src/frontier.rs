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

//! Frontier of not-yet-merged partitions
//!
//! The frontier is kept sorted by ascending `max_diff`, so the two worst
//! partitions sit at the tail and can be popped in O(1). The search mutates
//! one frontier in place: it pops the worst pair, inserts each merged child,
//! recurses, removes the child again and finally restores the pair. After
//! every node the frontier is exactly what it was on entry.
//!
//! `bound_with` evaluates the pruning bound of the frontier that *would*
//! result from inserting a merged partition, without inserting it.

use bldm_model::partition::Partition;
use num_traits::{PrimInt, Signed};

/// Ascending-by-`max_diff` collection of partitions awaiting a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontier<T> {
    partitions: Vec<Partition<T>>,
}

/// Lower bounds derived from a frontier in a single pass.
///
/// Merging two partitions can at best cancel their imbalances against each
/// other, so the largest imbalance minus the sum of all others bounds the
/// imbalance any completion can reach. The same holds for cardinalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierBound<T> {
    /// Largest `max_diff` minus the sum of all other `max_diff` values.
    pub imbalance_lower_bound: T,
    /// Largest `max_card_diff` in the frontier.
    pub largest_card_diff: usize,
    /// Sum of all other `max_card_diff` values.
    pub remaining_card_diff: usize,
}

impl<T> FrontierBound<T>
where
    T: PrimInt + Signed,
{
    /// Returns `true` if no completion can make every bin the same size.
    #[inline]
    pub fn cardinality_infeasible(&self) -> bool {
        self.largest_card_diff > self.remaining_card_diff
    }
}

/// Keeps the largest value seen and the sum of all others.
#[derive(Debug, Clone, Copy)]
struct GreatestAndRest<V> {
    greatest: V,
    rest: V,
}

impl<V> GreatestAndRest<V>
where
    V: Copy + PartialOrd + std::ops::Add<Output = V>,
{
    #[inline(always)]
    fn new(zero: V) -> Self {
        Self {
            greatest: zero,
            rest: zero,
        }
    }

    #[inline(always)]
    fn push(&mut self, value: V) {
        if value > self.greatest {
            self.rest = self.rest + self.greatest;
            self.greatest = value;
        } else {
            self.rest = self.rest + value;
        }
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self {
            partitions: Vec::new(),
        }
    }
}

impl<T> Frontier<T>
where
    T: PrimInt + Signed,
{
    /// Builds a frontier from arbitrary partitions.
    ///
    /// Partitions of equal `max_diff` keep their relative order, so the one
    /// given last is extracted first.
    pub fn from_partitions(mut partitions: Vec<Partition<T>>) -> Self {
        partitions.sort_by_key(Partition::max_diff);
        Self { partitions }
    }

    /// Returns the number of partitions.
    #[inline]
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Returns `true` if the frontier holds no partitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Returns the partition with the largest `max_diff`.
    #[inline]
    pub fn worst(&self) -> Option<&Partition<T>> {
        self.partitions.last()
    }

    /// Iterates from the best balanced to the worst partition.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Partition<T>> {
        self.partitions.iter()
    }

    /// Removes and returns the partition with the largest `max_diff`.
    #[inline]
    pub fn pop_worst(&mut self) -> Option<Partition<T>> {
        self.partitions.pop()
    }

    /// Removes the two worst partitions, worst first, if there are at least two.
    #[inline]
    pub fn pop_worst_pair(&mut self) -> Option<(Partition<T>, Partition<T>)> {
        if self.len() < 2 {
            return None;
        }
        let left = self.partitions.pop()?;
        let right = self.partitions.pop()?;
        Some((left, right))
    }

    /// Puts back a partition previously returned by `pop_worst`.
    ///
    /// Partitions must be restored in reverse order of popping.
    #[inline]
    pub fn restore_worst(&mut self, partition: Partition<T>) {
        debug_assert!(
            self.partitions
                .last()
                .is_none_or(|tail| tail.max_diff() <= partition.max_diff()),
            "called `Frontier::restore_worst` with a partition better than the current worst"
        );
        self.partitions.push(partition);
    }

    /// Inserts a partition behind all partitions of equal or smaller
    /// `max_diff` and returns its position.
    #[inline]
    pub fn insert(&mut self, partition: Partition<T>) -> usize {
        let diff = partition.max_diff();
        let position = self.partitions.partition_point(|p| p.max_diff() <= diff);
        self.partitions.insert(position, partition);
        position
    }

    /// Removes the partition at `position`, as returned by `insert`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[inline]
    pub fn remove(&mut self, position: usize) -> Partition<T> {
        assert!(
            position < self.len(),
            "called `Frontier::remove` with position out of bounds: the len is {} but the position is {}",
            self.len(),
            position
        );
        self.partitions.remove(position)
    }

    /// Computes the pruning bound of this frontier with `merged` added.
    pub fn bound_with(&self, merged: &Partition<T>) -> FrontierBound<T> {
        let mut imbalance = GreatestAndRest::new(T::zero());
        let mut cardinality = GreatestAndRest::new(0usize);

        for partition in self.partitions.iter().chain(std::iter::once(merged)) {
            imbalance.push(partition.max_diff());
            cardinality.push(partition.max_card_diff());
        }

        FrontierBound {
            imbalance_lower_bound: imbalance.greatest - imbalance.rest,
            largest_card_diff: cardinality.greatest,
            remaining_card_diff: cardinality.rest,
        }
    }

    /// Consumes the frontier and returns its partitions, best balanced first.
    #[inline]
    pub fn into_partitions(self) -> Vec<Partition<T>> {
        self.partitions
    }
}

impl<'a, T> IntoIterator for &'a Frontier<T> {
    type Item = &'a Partition<T>;
    type IntoIter = std::slice::Iter<'a, Partition<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.partitions.iter()
    }
}
