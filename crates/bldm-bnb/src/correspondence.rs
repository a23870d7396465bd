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

//! Bin correspondences between two partitions
//!
//! Merging partition `L` into partition `R` needs a bijection telling which
//! bin of `R` joins each bin of `L`. Trying all `m!` bijections is wasteful:
//! empty bins are interchangeable, so only the unique bins of `L` need an
//! individually chosen partner.
//!
//! Enumeration
//! - `R`'s candidates are its `u = R.unique_bin_count()` unique bins, where
//!   the lightest one (`u - 1`) is available `m - u + 1` times: it stands for
//!   "any of `R`'s interchangeable empty bins".
//! - Every size-`k` multiset selection of those candidates
//!   (`k = L.unique_bin_count()`) is taken once, and every distinct ordering
//!   of it is assigned to `L`'s unique bins in order.
//! - The unchosen candidates fill `L`'s remaining (empty) bins; their order
//!   is immaterial.
//! - Finally each occurrence of the repeated slot is resolved to a distinct
//!   physical empty bin, so every yielded correspondence is a true bijection.
//!
//! Candidates are ranked lightest first, so the first correspondences pair
//! `L`'s heaviest bins with `R`'s lightest ones. This differencing order
//! reaches good complete partitions early and sharpens pruning.

use bldm_model::{index::BinIndex, partition::Partition};
use num_traits::{PrimInt, Signed};
use smallvec::SmallVec;

/// A bijection over bin indices: left bin `i` joins right bin `c[i]`.
pub type Correspondence = SmallVec<[BinIndex; 8]>;

type Ranks = SmallVec<[usize; 8]>;

/// Iterator over the non-redundant correspondences between two partitions.
///
/// Internally every candidate of the right partition is identified by its
/// rank: rank `0` is the lightest unique bin (the repeatable slot), rank `r`
/// is right bin `u - 1 - r`.
#[derive(Debug, Clone)]
pub struct Correspondences {
    bin_count: usize,
    chosen: usize,
    right_unique: usize,
    spare: usize,
    min_spare_taken: usize,
    spare_taken: usize,
    distinct: Ranks,
    ordering: Ranks,
    exhausted: bool,
}

impl Correspondences {
    /// Enumerates the correspondences for merging `left` with `right`.
    ///
    /// # Panics
    ///
    /// Panics if the partitions disagree on the number of bins.
    #[inline]
    pub fn between<T>(left: &Partition<T>, right: &Partition<T>) -> Self
    where
        T: PrimInt + Signed,
    {
        assert_eq!(
            left.num_bins(),
            right.num_bins(),
            "called `Correspondences::between` with partitions of different bin counts: {} vs {}",
            left.num_bins(),
            right.num_bins()
        );
        Self::new(
            left.num_bins(),
            left.unique_bin_count(),
            right.unique_bin_count(),
        )
    }

    /// Enumerates correspondences from raw counts.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= left_unique <= bin_count` and
    /// `1 <= right_unique <= bin_count`.
    pub fn new(bin_count: usize, left_unique: usize, right_unique: usize) -> Self {
        assert!(
            (1..=bin_count).contains(&left_unique),
            "called `Correspondences::new` with left unique count {} for {} bins",
            left_unique,
            bin_count
        );
        assert!(
            (1..=bin_count).contains(&right_unique),
            "called `Correspondences::new` with right unique count {} for {} bins",
            right_unique,
            bin_count
        );

        let spare = bin_count - right_unique + 1;
        let distinct_available = right_unique - 1;
        let max_spare_taken = left_unique.min(spare);
        let min_spare_taken = left_unique.saturating_sub(distinct_available);

        let mut this = Self {
            bin_count,
            chosen: left_unique,
            right_unique,
            spare,
            min_spare_taken,
            spare_taken: max_spare_taken,
            distinct: Ranks::new(),
            ordering: Ranks::new(),
            exhausted: false,
        };
        this.reset_distinct();
        this
    }

    /// Returns the number of bins every correspondence covers.
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Starts the lexicographically first selection of distinct ranks for
    /// the current number of spare slots taken.
    fn reset_distinct(&mut self) {
        self.distinct.clear();
        self.distinct.extend(1..=self.chosen - self.spare_taken);
        self.load_ordering();
    }

    /// Starts the first (sorted) ordering of the current selection.
    fn load_ordering(&mut self) {
        self.ordering.clear();
        self.ordering
            .extend(std::iter::repeat_n(0, self.spare_taken));
        self.ordering.extend_from_slice(&self.distinct);
    }

    fn advance(&mut self) {
        if next_permutation(&mut self.ordering) {
            return;
        }
        if next_combination(&mut self.distinct, self.right_unique - 1) {
            self.load_ordering();
            return;
        }
        if self.spare_taken > self.min_spare_taken {
            self.spare_taken -= 1;
            self.reset_distinct();
            return;
        }
        self.exhausted = true;
    }

    fn current(&self) -> Correspondence {
        let lightest = self.right_unique - 1;

        let mut slots = Ranks::with_capacity(self.bin_count);
        slots.extend(self.ordering.iter().map(|&rank| lightest - rank));
        slots.extend(std::iter::repeat_n(lightest, self.spare - self.spare_taken));
        slots.extend(
            (1..=lightest)
                .filter(|rank| !self.distinct.contains(rank))
                .map(|rank| lightest - rank),
        );
        debug_assert_eq!(slots.len(), self.bin_count);

        // The repeated slot occurs exactly `spare` times; spread it over the
        // physical bins `lightest..bin_count`.
        let mut next_spare = lightest;
        slots
            .into_iter()
            .map(|slot| {
                if slot == lightest {
                    next_spare += 1;
                    BinIndex::new(next_spare - 1)
                } else {
                    BinIndex::new(slot)
                }
            })
            .collect()
    }
}

impl Iterator for Correspondences {
    type Item = Correspondence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let correspondence = self.current();
        self.advance();
        Some(correspondence)
    }
}

impl std::iter::FusedIterator for Correspondences {}

/// Rearranges `values` into the next lexicographically greater permutation.
/// Repeated values yield each distinct permutation once.
/// Returns `false` (leaving `values` untouched) if it already is the last one.
fn next_permutation(values: &mut [usize]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..values.len() - 1).rev().find(|&i| values[i] < values[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..values.len())
        .rev()
        .find(|&j| values[j] > values[pivot])
        .unwrap_or(pivot + 1);
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}

/// Advances an ascending selection of distinct values from `1..=max` to the
/// next one in lexicographic order. Returns `false` after the last selection.
fn next_combination(values: &mut [usize], max: usize) -> bool {
    let len = values.len();
    for i in (0..len).rev() {
        let limit = max - (len - 1 - i);
        if values[i] < limit {
            values[i] += 1;
            for j in i + 1..len {
                values[j] = values[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
