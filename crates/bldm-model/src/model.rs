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

//! Validated problem instance.
//!
//! `Model::new` checks the input once, before any search starts, and sorts
//! the items by descending weight so that the search meets the heaviest
//! items first. Everything downstream may assume:
//!
//! - at least one item and a positive group size that divides the item count,
//! - no negative weights,
//! - the total weight fits into `T`, so no bin sum can overflow.

use crate::{index::ItemIndex, item::WeightedItem, partition::Partition};
use num_traits::{PrimInt, Signed};

/// Reasons for rejecting an input before searching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("no items to partition")]
    EmptyInput,

    #[error("group size must be positive")]
    ZeroGroupSize,

    #[error("cannot divide {item_count} items evenly into groups of {group_size}")]
    IndivisibleItemCount {
        item_count: usize,
        group_size: usize,
    },

    #[error("item '{label}' has a negative weight")]
    NegativeWeight { label: String },

    #[error("total weight of all items overflows the weight type")]
    WeightOverflow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model<T> {
    items: Vec<WeightedItem<T>>,
    group_size: usize,
    bin_count: usize,
    total_weight: T,
}

impl<T> Model<T>
where
    T: PrimInt + Signed,
{
    /// Validates the input and builds a model with items sorted by
    /// descending weight. Items of equal weight keep their input order.
    pub fn new(
        mut items: Vec<WeightedItem<T>>,
        group_size: usize,
    ) -> Result<Self, InvalidInputError> {
        if group_size == 0 {
            return Err(InvalidInputError::ZeroGroupSize);
        }
        if items.is_empty() {
            return Err(InvalidInputError::EmptyInput);
        }
        if items.len() % group_size != 0 {
            return Err(InvalidInputError::IndivisibleItemCount {
                item_count: items.len(),
                group_size,
            });
        }
        if let Some(item) = items.iter().find(|item| item.weight().is_negative()) {
            return Err(InvalidInputError::NegativeWeight {
                label: item.label().to_string(),
            });
        }

        let total_weight = items
            .iter()
            .try_fold(T::zero(), |acc, item| acc.checked_add(&item.weight()))
            .ok_or(InvalidInputError::WeightOverflow)?;

        items.sort_by(|a, b| b.weight().cmp(&a.weight()));
        let bin_count = items.len() / group_size;

        Ok(Self {
            items,
            group_size,
            bin_count,
            total_weight,
        })
    }

    /// Returns the items, heaviest first.
    #[inline]
    pub fn items(&self) -> &[WeightedItem<T>] {
        &self.items
    }

    /// Returns the number of items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the requested number of items per group.
    #[inline]
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Returns the number of groups `m`.
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Returns the summed weight of all items.
    #[inline]
    pub fn total_weight(&self) -> T {
        self.total_weight
    }

    /// Builds one singleton partition per item, in item order.
    pub fn initial_partitions(&self) -> Vec<Partition<T>> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| Partition::singleton(ItemIndex::new(i), item.weight(), self.bin_count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(weights: &[(&str, i64)]) -> Vec<WeightedItem<i64>> {
        weights.iter().map(|&(l, w)| WeightedItem::new(l, w)).collect()
    }

    #[test]
    fn test_model_sorts_items_descending() {
        let model = Model::new(items(&[("A", 4), ("B", 10), ("C", 6), ("D", 8)]), 2).unwrap();

        let labels: Vec<_> = model.items().iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["B", "D", "C", "A"]);
        assert_eq!(model.bin_count(), 2);
        assert_eq!(model.group_size(), 2);
        assert_eq!(model.num_items(), 4);
        assert_eq!(model.total_weight(), 28);
    }

    #[test]
    fn test_sort_is_stable_for_equal_weights() {
        let model = Model::new(items(&[("x", 1), ("y", 1), ("z", 2), ("w", 1)]), 2).unwrap();
        let labels: Vec<_> = model.items().iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["z", "x", "y", "w"]);
    }

    #[test]
    fn test_indivisible_item_count_is_rejected() {
        let err = Model::new(items(&[("A", 1), ("B", 2), ("C", 3), ("D", 4), ("E", 5)]), 2)
            .unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::IndivisibleItemCount {
                item_count: 5,
                group_size: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot divide 5 items evenly into groups of 2"
        );
    }

    #[test]
    fn test_zero_group_size_is_rejected() {
        let err = Model::new(items(&[("A", 1)]), 0).unwrap_err();
        assert_eq!(err, InvalidInputError::ZeroGroupSize);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Model::<i64>::new(Vec::new(), 3).unwrap_err();
        assert_eq!(err, InvalidInputError::EmptyInput);
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let err = Model::new(items(&[("A", 1), ("B", -2)]), 1).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::NegativeWeight {
                label: "B".to_string()
            }
        );
    }

    #[test]
    fn test_weight_overflow_is_rejected() {
        let input = vec![
            WeightedItem::new("A", i8::MAX),
            WeightedItem::new("B", 1i8),
        ];
        let err = Model::new(input, 1).unwrap_err();
        assert_eq!(err, InvalidInputError::WeightOverflow);
    }

    #[test]
    fn test_initial_partitions_are_singletons() {
        let model = Model::new(items(&[("A", 3), ("B", 9), ("C", 5)]), 1).unwrap();
        let partitions = model.initial_partitions();

        assert_eq!(partitions.len(), 3);
        let diffs: Vec<_> = partitions.iter().map(|p| p.max_diff()).collect();
        assert_eq!(diffs, vec![9, 5, 3]);
        for p in &partitions {
            assert_eq!(p.num_bins(), 3);
            assert_eq!(p.num_items(), 1);
            assert_eq!(p.empty_bin_count(), 2);
        }
    }
}
