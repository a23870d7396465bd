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

//! # Deadline
//!
//! An absolute wall-clock instant after which the search stops opening new
//! work. The search polls it cooperatively (at the top of every node and
//! before every correspondence); nothing is ever preempted.
//!
//! A missing budget means "never expires". A zero budget expires at once,
//! so the search returns without a candidate.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Default for Deadline {
    fn default() -> Self {
        Self::never()
    }
}

impl Deadline {
    /// A deadline that never passes.
    #[inline]
    pub fn never() -> Self {
        Self { at: None }
    }

    /// A deadline at the given instant.
    #[inline]
    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    /// A deadline `budget` from now. Budgets too large to represent never pass.
    #[inline]
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// `after(budget)` if a budget is given, `never()` otherwise.
    #[inline]
    pub fn from_budget(budget: Option<Duration>) -> Self {
        budget.map_or_else(Self::never, Self::after)
    }

    /// Returns `true` if this deadline can pass at all.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.at.is_some()
    }

    /// Returns the instant of this deadline, if bounded.
    #[inline]
    pub fn instant(&self) -> Option<Instant> {
        self.at
    }

    /// Returns `true` once the deadline has been reached.
    #[inline]
    pub fn has_passed(&self) -> bool {
        match self.at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    /// Returns the time left, `Some(Duration::ZERO)` once passed, or `None`
    /// if unbounded.
    #[inline]
    pub fn remaining(&self) -> Option<Duration> {
        self.at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

impl std::fmt::Display for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.remaining() {
            Some(left) => write!(f, "Deadline(remaining: {:.3?})", left),
            None => write!(f, "Deadline(never)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Deadline;
    use std::time::{Duration, Instant};

    #[test]
    fn test_never_does_not_pass() {
        let deadline = Deadline::never();
        assert!(!deadline.is_bounded());
        assert!(!deadline.has_passed());
        assert_eq!(deadline.remaining(), None);
        assert_eq!(Deadline::default(), deadline);
        assert_eq!(format!("{}", deadline), "Deadline(never)");
    }

    #[test]
    fn test_zero_budget_passes_immediately() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.is_bounded());
        assert!(deadline.has_passed());
        assert_eq!(deadline.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_long_budget_is_pending() {
        let deadline = Deadline::from_budget(Some(Duration::from_secs(3600)));
        assert!(!deadline.has_passed());
        let left = deadline.remaining().unwrap();
        assert!(left > Duration::from_secs(3500));
    }

    #[test]
    fn test_from_budget_none_is_never() {
        assert_eq!(Deadline::from_budget(None), Deadline::never());
    }

    #[test]
    fn test_past_instant_has_passed() {
        let earlier = Instant::now();
        std::thread::sleep(Duration::from_millis(2));
        assert!(Deadline::at(earlier).has_passed());
    }

    #[test]
    fn test_unrepresentable_budget_never_passes() {
        let deadline = Deadline::after(Duration::MAX);
        assert!(!deadline.has_passed());
    }
}
