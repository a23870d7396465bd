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

//! # Partition
//!
//! An immutable assignment of (some of) the items into exactly `m` bins,
//! together with the statistics the search needs, computed once at
//! construction:
//!
//! - bins are kept sorted by descending sum; among equal sums, fuller bins
//!   come first so that every empty bin sits at the tail,
//! - `max_diff`: heaviest bin sum minus lightest bin sum,
//! - `max_card_diff`: largest minus smallest bin cardinality,
//! - `empty_bin_count` and `unique_bin_count`. All empty bins beyond the
//!   first are interchangeable and collapse into a single logical slot, so
//!   `unique_bin_count = m - max(empty_bin_count - 1, 0)`.
//!
//! A partition never changes after construction; `Partition::merge` always
//! builds a new value.

use crate::{
    bin::Bin,
    index::{BinIndex, ItemIndex},
    item::WeightedItem,
    solution::{Group, Solution},
};
use num_traits::{PrimInt, Signed};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition<T> {
    bins: Vec<Bin<T>>,
    max_diff: T,
    max_card_diff: usize,
    empty_bin_count: usize,
    unique_bin_count: usize,
}

impl<T> Partition<T>
where
    T: PrimInt + Signed,
{
    /// Builds a partition from its bins, sorting them and deriving all statistics.
    ///
    /// # Panics
    ///
    /// Panics if `bins` is empty.
    pub fn new(mut bins: Vec<Bin<T>>) -> Self {
        assert!(
            !bins.is_empty(),
            "called `Partition::new` with no bins: a partition needs at least one bin"
        );

        bins.sort_by(|a, b| {
            b.sum()
                .cmp(&a.sum())
                .then_with(|| b.len().cmp(&a.len()))
        });

        let heaviest = bins[0].sum();
        let lightest = bins[bins.len() - 1].sum();

        let (min_card, max_card) = bins
            .iter()
            .fold((usize::MAX, 0usize), |(lo, hi), bin| {
                (lo.min(bin.len()), hi.max(bin.len()))
            });

        let empty_bin_count = bins.iter().filter(|bin| bin.is_empty()).count();
        let unique_bin_count = bins.len() - empty_bin_count.saturating_sub(1);

        Self {
            max_diff: heaviest - lightest,
            max_card_diff: max_card - min_card,
            empty_bin_count,
            unique_bin_count,
            bins,
        }
    }

    /// Builds the starting partition of a single item: the item in one bin
    /// plus `bin_count - 1` empty bins.
    ///
    /// # Panics
    ///
    /// Panics if `bin_count` is zero.
    pub fn singleton(item: ItemIndex, weight: T, bin_count: usize) -> Self {
        assert!(
            bin_count > 0,
            "called `Partition::singleton` with a bin count of zero"
        );

        let mut bins = Vec::with_capacity(bin_count);
        bins.push(Bin::singleton(item, weight));
        bins.resize_with(bin_count, Bin::empty);
        Self::new(bins)
    }

    /// Combines two partitions under a bin correspondence.
    ///
    /// Bin `i` of the result holds `left.bin(i)` together with
    /// `right.bin(correspondence[i])`; the result is re-sorted and its
    /// statistics derived from scratch.
    ///
    /// # Panics
    ///
    /// Panics if the partitions disagree on the number of bins or the
    /// correspondence has the wrong length. In debug builds, also panics if
    /// the correspondence is not a bijection.
    pub fn merge(left: &Self, right: &Self, correspondence: &[BinIndex]) -> Self {
        assert_eq!(
            left.num_bins(),
            right.num_bins(),
            "called `Partition::merge` with partitions of different bin counts: {} vs {}",
            left.num_bins(),
            right.num_bins()
        );
        assert_eq!(
            correspondence.len(),
            left.num_bins(),
            "called `Partition::merge` with a correspondence of length {} for {} bins",
            correspondence.len(),
            left.num_bins()
        );
        debug_assert!(
            is_bijection(correspondence),
            "called `Partition::merge` with a correspondence that is not a bijection: {:?}",
            correspondence
        );

        let bins = left
            .bins
            .iter()
            .zip(correspondence)
            .map(|(bin, &target)| bin.union(&right.bins[target.get()]))
            .collect();

        Self::new(bins)
    }

    /// Returns the difference between the heaviest and the lightest bin.
    #[inline]
    pub fn max_diff(&self) -> T {
        self.max_diff
    }

    /// Returns the difference between the largest and the smallest bin cardinality.
    #[inline]
    pub fn max_card_diff(&self) -> usize {
        self.max_card_diff
    }

    /// Returns the number of bins without items.
    #[inline]
    pub fn empty_bin_count(&self) -> usize {
        self.empty_bin_count
    }

    /// Returns the number of bins that are not interchangeable empty duplicates.
    #[inline]
    pub fn unique_bin_count(&self) -> usize {
        self.unique_bin_count
    }

    /// Returns the number of bins.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Returns the total number of items placed in this partition.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    /// Returns the bins, heaviest first.
    #[inline]
    pub fn bins(&self) -> &[Bin<T>] {
        &self.bins
    }

    /// Returns the bin at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn bin(&self, index: BinIndex) -> &Bin<T> {
        let index = index.get();
        assert!(
            index < self.num_bins(),
            "called `Partition::bin` with bin index out of bounds: the len is {} but the index is {}",
            self.num_bins(),
            index
        );
        &self.bins[index]
    }

    /// Returns the cardinality of every bin, in bin order.
    #[inline]
    pub fn cardinalities(&self) -> impl Iterator<Item = usize> + '_ {
        self.bins.iter().map(Bin::len)
    }

    /// Replaces item indices by the items themselves.
    ///
    /// # Panics
    ///
    /// Panics if a bin references an index outside of `items`.
    pub fn resolve(&self, items: &[WeightedItem<T>]) -> Solution<T> {
        let groups = self
            .bins
            .iter()
            .map(|bin| {
                let members = bin
                    .items()
                    .iter()
                    .map(|index| items[index.get()].clone())
                    .collect();
                Group::new(members, bin.sum())
            })
            .collect();

        Solution::new(groups, self.max_diff)
    }
}

/// Orders partitions worst-imbalance-first (descending `max_diff`).
///
/// Only used to decide which partitions the search merges next; it says
/// nothing about the contents being equal.
#[inline]
pub fn worst_imbalance_first<T>(a: &Partition<T>, b: &Partition<T>) -> Ordering
where
    T: PrimInt + Signed,
{
    b.max_diff().cmp(&a.max_diff())
}

fn is_bijection(correspondence: &[BinIndex]) -> bool {
    let mut seen = vec![false; correspondence.len()];
    correspondence.iter().all(|index| {
        let i = index.get();
        i < seen.len() && !std::mem::replace(&mut seen[i], true)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn bi(i: usize) -> BinIndex {
        BinIndex::new(i)
    }

    fn perm(indices: &[usize]) -> Vec<BinIndex> {
        indices.iter().copied().map(bi).collect()
    }

    #[test]
    fn test_singleton_statistics() {
        let p = Partition::singleton(ii(0), 10i64, 4);

        assert_eq!(p.num_bins(), 4);
        assert_eq!(p.num_items(), 1);
        assert_eq!(p.max_diff(), 10);
        assert_eq!(p.max_card_diff(), 1);
        assert_eq!(p.empty_bin_count(), 3);
        // One real bin plus one representative for the three empty bins.
        assert_eq!(p.unique_bin_count(), 2);
        assert_eq!(p.cardinalities().collect::<Vec<_>>(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_single_bin_partition() {
        let p = Partition::singleton(ii(0), 5i64, 1);
        assert_eq!(p.max_diff(), 0);
        assert_eq!(p.max_card_diff(), 0);
        assert_eq!(p.unique_bin_count(), 1);
    }

    #[test]
    fn test_bins_are_sorted_descending_with_empty_bins_last() {
        let bins = vec![
            Bin::empty(),
            Bin::singleton(ii(0), 0i64),
            Bin::singleton(ii(1), 3i64),
            Bin::singleton(ii(2), 0i64).union(&Bin::singleton(ii(3), 0i64)),
        ];
        let p = Partition::new(bins);

        let sums: Vec<_> = p.bins().iter().map(Bin::sum).collect();
        assert_eq!(sums, vec![3, 0, 0, 0]);
        // Zero-weight bins with items precede the truly empty bin.
        let cards: Vec<_> = p.cardinalities().collect();
        assert_eq!(cards, vec![1, 2, 1, 0]);
        assert_eq!(p.empty_bin_count(), 1);
        assert_eq!(p.unique_bin_count(), 4);
    }

    #[test]
    fn test_merge_applies_correspondence() {
        let a = Partition::new(vec![Bin::singleton(ii(0), 10i64), Bin::singleton(ii(1), 8)]);
        let b = Partition::new(vec![Bin::singleton(ii(2), 6i64), Bin::singleton(ii(3), 4)]);

        // 10 + 4 and 8 + 6
        let crossed = Partition::merge(&a, &b, &perm(&[1, 0]));
        assert_eq!(crossed.max_diff(), 0);
        assert_eq!(crossed.max_card_diff(), 0);
        assert_eq!(crossed.num_items(), 4);

        // 10 + 6 and 8 + 4
        let straight = Partition::merge(&a, &b, &perm(&[0, 1]));
        assert_eq!(straight.max_diff(), 4);
        let sums: Vec<_> = straight.bins().iter().map(Bin::sum).collect();
        assert_eq!(sums, vec![16, 12]);

        // Inputs are untouched.
        assert_eq!(a.max_diff(), 2);
        assert_eq!(b.max_diff(), 2);
    }

    #[test]
    fn test_merge_of_singletons_updates_unique_count() {
        let a = Partition::singleton(ii(0), 10i64, 3);
        let b = Partition::singleton(ii(1), 8i64, 3);

        let together = Partition::merge(&a, &b, &perm(&[0, 1, 2]));
        assert_eq!(together.empty_bin_count(), 2);
        assert_eq!(together.unique_bin_count(), 2);
        assert_eq!(together.max_diff(), 18);
        assert_eq!(together.max_card_diff(), 2);

        let apart = Partition::merge(&a, &b, &perm(&[1, 0, 2]));
        assert_eq!(apart.empty_bin_count(), 1);
        assert_eq!(apart.unique_bin_count(), 3);
        assert_eq!(apart.max_diff(), 10);
        assert_eq!(apart.max_card_diff(), 1);
    }

    #[test]
    #[should_panic(expected = "called `Partition::merge` with a correspondence of length")]
    fn test_merge_rejects_short_correspondence() {
        let a = Partition::singleton(ii(0), 1i64, 2);
        let b = Partition::singleton(ii(1), 1i64, 2);
        let _ = Partition::merge(&a, &b, &perm(&[0]));
    }

    #[test]
    #[should_panic(expected = "called `Partition::new` with no bins")]
    fn test_new_rejects_zero_bins() {
        let _ = Partition::<i64>::new(Vec::new());
    }

    #[test]
    fn test_worst_imbalance_first_ordering() {
        let light = Partition::singleton(ii(0), 1i64, 2);
        let heavy = Partition::singleton(ii(1), 9i64, 2);

        let mut partitions = vec![light.clone(), heavy.clone()];
        partitions.sort_by(worst_imbalance_first);
        assert_eq!(partitions[0], heavy);
        assert_eq!(partitions[1], light);
        assert_eq!(worst_imbalance_first(&light, &light), Ordering::Equal);
    }

    #[test]
    fn test_resolve_maps_items() {
        let items = vec![
            WeightedItem::new("A", 10i64),
            WeightedItem::new("B", 8),
            WeightedItem::new("C", 6),
            WeightedItem::new("D", 4),
        ];
        let a = Partition::new(vec![Bin::singleton(ii(0), 10i64), Bin::singleton(ii(1), 8)]);
        let b = Partition::new(vec![Bin::singleton(ii(2), 6i64), Bin::singleton(ii(3), 4)]);
        let merged = Partition::merge(&a, &b, &perm(&[1, 0]));

        let solution = merged.resolve(&items);
        assert_eq!(solution.max_diff(), 0);
        assert_eq!(solution.num_groups(), 2);
        for group in solution.groups() {
            assert_eq!(group.total(), 14);
            assert_eq!(group.len(), 2);
        }
    }

    #[test]
    fn test_is_bijection() {
        assert!(is_bijection(&perm(&[2, 0, 1])));
        assert!(!is_bijection(&perm(&[1, 1, 0])));
        assert!(!is_bijection(&perm(&[0, 3, 1])));
    }
}
