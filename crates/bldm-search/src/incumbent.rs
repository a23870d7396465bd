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

//! # Shared Incumbent (Best Partitions Holder)
//!
//! A concurrent container for the tied-best partitions discovered so far.
//! Workers of a parallel search read the current best `max_diff` through a
//! lock-free atomic to tighten their own bound, and publish complete
//! candidates through `try_install`, which re-checks the bound under the
//! lock so a racing worker can never commit a worse result.
//!
//! Unlike a single-solution incumbent, ties are kept: a candidate whose
//! `max_diff` equals the current best is appended to the list.
//!
//! ```rust
//! use bldm_search::incumbent::SharedIncumbent;
//! use bldm_model::{index::ItemIndex, partition::Partition};
//!
//! let inc: SharedIncumbent<i64> = SharedIncumbent::new();
//! let candidate = Partition::singleton(ItemIndex::new(0), 7, 1);
//!
//! assert!(inc.try_install(std::slice::from_ref(&candidate)));
//! assert_eq!(inc.upper_bound(), 0);
//! assert_eq!(inc.snapshot().len(), 1);
//! ```

use bldm_model::partition::Partition;
use num_traits::{PrimInt, Signed};
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicI64, Ordering},
};

/// A concurrent holder for the best (incumbent) partitions found during search.
///
/// This structure maintains:
/// - an `AtomicI64` upper bound for fast, lock-free reads, and
/// - a `Mutex<Vec<Partition<T>>>` with the tied-best partitions, which is the
///   source of truth.
///
/// The atomic is read and written with `Ordering::Relaxed`; it only serves to
/// skip obviously worse candidates without locking. `i64::MAX` means that no
/// partition has been installed yet.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    upper_bound: AtomicI64,
    solutions: Mutex<Vec<Partition<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with nothing installed.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            upper_bound: AtomicI64::new(i64::MAX),
            solutions: Mutex::new(Vec::new()),
        }
    }

    /// Returns the current upper bound.
    #[inline]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound.load(Ordering::Relaxed)
    }

    /// Returns the current upper bound converted to `T`, or `None` while no
    /// partition is installed or the bound does not fit into `T`.
    #[inline]
    pub fn upper_bound_as(&self) -> Option<T>
    where
        T: TryFrom<i64>,
    {
        match self.upper_bound() {
            i64::MAX => None,
            bound => T::try_from(bound).ok(),
        }
    }

    /// Returns a copy of the currently installed partitions.
    #[inline]
    pub fn snapshot(&self) -> Vec<Partition<T>>
    where
        T: Clone,
    {
        self.solutions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consumes the incumbent and returns the installed partitions.
    #[inline]
    pub fn into_solutions(self) -> Vec<Partition<T>> {
        self.solutions
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Offers a batch of tied candidates (all with the same `max_diff`).
    ///
    /// A strictly better batch replaces the installed partitions and lowers
    /// the bound; a tying batch is appended; anything worse is ignored.
    /// Returns `true` if the batch was kept.
    pub fn try_install(&self, candidates: &[Partition<T>]) -> bool
    where
        T: PrimInt + Signed + Into<i64>,
    {
        let Some(first) = candidates.first() else {
            return false;
        };
        debug_assert!(
            candidates.iter().all(|c| c.max_diff() == first.max_diff()),
            "called `SharedIncumbent::try_install` with candidates of different max_diff"
        );

        let objective: i64 = first.max_diff().into();
        if objective > self.upper_bound() {
            return false;
        }

        let mut guard = self.solutions.lock().unwrap_or_else(PoisonError::into_inner);
        // Another worker may have installed something while we waited for the
        // lock; compare against the locked list, not the atomic hint.
        let current = guard
            .first()
            .map_or(i64::MAX, |installed| installed.max_diff().into());

        if objective < current {
            guard.clear();
            guard.extend_from_slice(candidates);
            self.upper_bound.store(objective, Ordering::Relaxed);
            true
        } else if objective == current {
            guard.extend_from_slice(candidates);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SharedIncumbent;
    use bldm_model::{bin::Bin, index::ItemIndex, partition::Partition};
    use std::sync::Arc;
    use std::thread;

    /// Two bins with the given sums; `max_diff = |a - b|`.
    fn make_partition(a: i64, b: i64) -> Partition<i64> {
        Partition::new(vec![
            Bin::singleton(ItemIndex::new(0), a),
            Bin::singleton(ItemIndex::new(1), b),
        ])
    }

    #[test]
    fn test_initial_state() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        assert_eq!(inc.upper_bound(), i64::MAX);
        assert_eq!(inc.upper_bound_as(), None);
        assert!(inc.snapshot().is_empty());
        assert_eq!(format!("{}", inc), format!("Incumbent(upper_bound: {})", i64::MAX));
    }

    #[test]
    fn test_install_better_replaces() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();

        assert!(inc.try_install(&[make_partition(10, 2)]));
        assert_eq!(inc.upper_bound(), 8);

        assert!(inc.try_install(&[make_partition(5, 2)]));
        assert_eq!(inc.upper_bound(), 3);
        assert_eq!(inc.upper_bound_as(), Some(3));

        let snap = inc.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].max_diff(), 3);
    }

    #[test]
    fn test_ties_are_appended_and_worse_rejected() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();

        assert!(inc.try_install(&[make_partition(7, 4)]));
        assert!(inc.try_install(&[make_partition(6, 3), make_partition(9, 6)]));
        assert!(!inc.try_install(&[make_partition(9, 1)]));

        assert_eq!(inc.upper_bound(), 3);
        assert_eq!(inc.snapshot().len(), 3);
    }

    #[test]
    fn test_empty_batch_is_ignored() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        assert!(!inc.try_install(&[]));
        assert_eq!(inc.upper_bound(), i64::MAX);
    }

    #[test]
    fn test_upper_bound_as_narrow_type() {
        let inc: SharedIncumbent<i8> = SharedIncumbent::new();
        let p = Partition::new(vec![
            Bin::singleton(ItemIndex::new(0), 100i8),
            Bin::singleton(ItemIndex::new(1), 1i8),
        ]);
        assert!(inc.try_install(&[p]));
        assert_eq!(inc.upper_bound_as(), Some(99i8));
    }

    #[test]
    fn test_concurrent_installs_minimum_wins() {
        let inc = Arc::new(SharedIncumbent::<i64>::new());
        let diffs = vec![300, 200, 400, 50, 120, 75, 500, 60, 90, 50];

        let handles: Vec<_> = diffs
            .iter()
            .copied()
            .map(|d| {
                let inc = Arc::clone(&inc);
                thread::spawn(move || inc.try_install(&[make_partition(d + 10, 10)]))
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().any(|&r| r));

        assert_eq!(inc.upper_bound(), 50);
        let snap = inc.snapshot();
        // Both tied minima survive, whatever the interleaving.
        assert_eq!(snap.len(), 2);
        assert!(snap.iter().all(|p| p.max_diff() == 50));
    }

    #[test]
    fn test_into_solutions() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        inc.try_install(&[make_partition(4, 4)]);
        let solutions = inc.into_solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].max_diff(), 0);
    }
}
