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

use crate::index::ItemIndex;
use num_traits::{PrimInt, Signed};
use smallvec::SmallVec;

/// One of the `m` groups of a partition.
///
/// Items are referenced by their position in the model's item list; the bin
/// only carries the running weight sum next to them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bin<T> {
    items: SmallVec<[ItemIndex; 4]>,
    sum: T,
}

impl<T> Bin<T>
where
    T: PrimInt + Signed,
{
    /// Creates a bin without any items.
    #[inline]
    pub fn empty() -> Self {
        Self {
            items: SmallVec::new(),
            sum: T::zero(),
        }
    }

    /// Creates a bin holding exactly one item.
    #[inline]
    pub fn singleton(item: ItemIndex, weight: T) -> Self {
        let mut items = SmallVec::new();
        items.push(item);
        Self { items, sum: weight }
    }

    /// Returns a new bin holding the items of both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        let mut items = SmallVec::with_capacity(self.items.len() + other.items.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Self {
            items,
            sum: self.sum + other.sum,
        }
    }

    /// Returns the total weight of the items in this bin.
    #[inline]
    pub fn sum(&self) -> T {
        self.sum
    }

    /// Returns the number of items in this bin.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the bin holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items of this bin.
    #[inline]
    pub fn items(&self) -> &[ItemIndex] {
        &self.items
    }
}
