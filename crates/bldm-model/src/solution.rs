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

use crate::item::WeightedItem;
use num_traits::{PrimInt, Signed};

/// One group of a finished solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group<T> {
    items: Vec<WeightedItem<T>>,
    total: T,
}

impl<T> Group<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new group.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `total` is not the sum of the item weights.
    pub fn new(items: Vec<WeightedItem<T>>, total: T) -> Self {
        debug_assert!(
            items
                .iter()
                .fold(T::zero(), |acc, item| acc + item.weight())
                == total,
            "called `Group::new` with a total that does not match the item weights"
        );
        Self { items, total }
    }

    /// Returns the items of this group.
    #[inline]
    pub fn items(&self) -> &[WeightedItem<T>] {
        &self.items
    }

    /// Returns the summed weight of this group.
    #[inline]
    pub fn total(&self) -> T {
        self.total
    }

    /// Returns the number of items in this group.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the group has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A complete equal-size partition with labels resolved.
///
/// Groups are ordered heaviest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    groups: Vec<Group<T>>,
    max_diff: T,
}

impl<T> Solution<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new `Solution`.
    pub fn new(groups: Vec<Group<T>>, max_diff: T) -> Self {
        Self { groups, max_diff }
    }

    /// Returns the difference between the heaviest and the lightest group.
    #[inline]
    pub fn max_diff(&self) -> T {
        self.max_diff
    }

    /// Returns the groups, heaviest first.
    #[inline]
    pub fn groups(&self) -> &[Group<T>] {
        &self.groups
    }

    /// Returns the number of groups.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns the total number of items over all groups.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for group in &self.groups {
            let mut members: Vec<&WeightedItem<T>> = group.items.iter().collect();
            members.sort_by(|a, b| b.weight().cmp(&a.weight()));
            for member in members {
                write!(f, "{} ", member)?;
            }
            writeln!(f, "= {}", group.total)?;
        }
        Ok(())
    }
}
