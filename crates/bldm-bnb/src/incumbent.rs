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

//! Where the search keeps its best bound
//!
//! A sequential search only needs its local bound. Parallel workers share a
//! `SharedIncumbent`: they pull the global bound in before each
//! correspondence and publish every accepted leaf so the other workers can
//! prune against it.

use bldm_model::partition::Partition;
use bldm_search::{incumbent::SharedIncumbent, num::SolverNumeric};
use std::marker::PhantomData;

pub trait IncumbentStore<T>
where
    T: SolverNumeric,
{
    /// Returns the bound the search starts with.
    fn initial_upper_bound(&self) -> T;
    /// Synchronizes the current local best `max_diff` with the backing store.
    fn tighten(&self, current_local_best: T) -> T;
    /// Notifies the backing that a complete candidate was accepted.
    fn on_candidate(&self, candidate: &Partition<T>);
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct NoSharedIncumbent<T>(PhantomData<T>);

impl<T> Default for NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    /// Creates a new `NoSharedIncumbent` instance.
    #[inline(always)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> IncumbentStore<T> for NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn initial_upper_bound(&self) -> T {
        T::max_value()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        current_local_best
    }

    #[inline(always)]
    fn on_candidate(&self, _: &Partition<T>) {}
}

#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct SharedIncumbentAdapter<'a, T> {
    inner: &'a SharedIncumbent<T>,
}

impl<'a, T> SharedIncumbentAdapter<'a, T> {
    /// Creates a new `SharedIncumbentAdapter` that wraps the given
    /// `SharedIncumbent`.
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent<T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> IncumbentStore<T> for SharedIncumbentAdapter<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn initial_upper_bound(&self) -> T {
        self.inner.upper_bound_as().unwrap_or_else(T::max_value)
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: T) -> T {
        match self.inner.upper_bound_as() {
            Some(shared) => shared.min(current_local_best),
            None => current_local_best,
        }
    }

    #[inline(always)]
    fn on_candidate(&self, candidate: &Partition<T>) {
        self.inner.try_install(std::slice::from_ref(candidate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bldm_model::{bin::Bin, index::ItemIndex};

    type IntegerType = i64;

    fn make_partition(a: IntegerType, b: IntegerType) -> Partition<IntegerType> {
        Partition::new(vec![
            Bin::singleton(ItemIndex::new(0), a),
            Bin::singleton(ItemIndex::new(1), b),
        ])
    }

    #[test]
    fn test_no_shared_incumbent_keeps_local_bound() {
        let store = NoSharedIncumbent::<IntegerType>::new();
        assert_eq!(store.initial_upper_bound(), IntegerType::MAX);
        assert_eq!(store.tighten(17), 17);
        store.on_candidate(&make_partition(3, 1));
        assert_eq!(store.tighten(17), 17);
    }

    #[test]
    fn test_adapter_starts_unbounded() {
        let shared = SharedIncumbent::<IntegerType>::new();
        let store = SharedIncumbentAdapter::new(&shared);
        assert_eq!(store.initial_upper_bound(), IntegerType::MAX);
        assert_eq!(store.tighten(42), 42);
    }

    #[test]
    fn test_adapter_publishes_and_tightens() {
        let shared = SharedIncumbent::<IntegerType>::new();
        let store = SharedIncumbentAdapter::new(&shared);

        store.on_candidate(&make_partition(10, 4));
        assert_eq!(shared.upper_bound(), 6);
        assert_eq!(store.initial_upper_bound(), 6);

        // The shared bound wins when it is tighter, the local one otherwise.
        assert_eq!(store.tighten(9), 6);
        assert_eq!(store.tighten(2), 2);
    }

    #[test]
    fn test_adapter_ignores_worse_candidates() {
        let shared = SharedIncumbent::<IntegerType>::new();
        let store = SharedIncumbentAdapter::new(&shared);

        store.on_candidate(&make_partition(5, 4));
        store.on_candidate(&make_partition(9, 1));
        assert_eq!(shared.upper_bound(), 1);
        assert_eq!(shared.snapshot().len(), 1);
    }
}
