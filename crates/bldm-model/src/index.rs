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

//! # Strongly Typed Indices
//!
//! Phantom-tagged wrappers around `usize` so that item positions (into the
//! model's item arena) and bin positions (inside a `Partition`) cannot be
//! swapped by accident. Both compile down to a transparent `usize`.

use std::marker::PhantomData;

/// A tag naming an index domain for `Display`/`Debug`.
pub trait IndexTag: Clone + Copy {
    const NAME: &'static str;
}

/// A `usize` index that belongs to the domain described by `Tag`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<Tag> {
    index: usize,
    _tag: PhantomData<Tag>,
}

impl<Tag> TypedIndex<Tag> {
    /// Creates a new typed index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _tag: PhantomData,
        }
    }

    /// Returns the raw `usize` value.
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.index
    }
}

impl<Tag> From<usize> for TypedIndex<Tag> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<Tag> From<TypedIndex<Tag>> for usize {
    #[inline(always)]
    fn from(index: TypedIndex<Tag>) -> Self {
        index.get()
    }
}

impl<Tag> std::fmt::Display for TypedIndex<Tag>
where
    Tag: IndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", Tag::NAME, self.index)
    }
}

impl<Tag> std::fmt::Debug for TypedIndex<Tag>
where
    Tag: IndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", Tag::NAME, self.index)
    }
}

/// A tag type for item indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ItemIndexTag;

impl IndexTag for ItemIndexTag {
    const NAME: &'static str = "ItemIndex";
}

/// Position of an item in the model's (weight-sorted) item list.
pub type ItemIndex = TypedIndex<ItemIndexTag>;

/// A tag type for bin indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BinIndexTag;

impl IndexTag for BinIndexTag {
    const NAME: &'static str = "BinIndex";
}

/// Position of a bin inside a partition (bins are sorted by descending sum).
pub type BinIndex = TypedIndex<BinIndexTag>;
