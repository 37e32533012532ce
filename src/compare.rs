//! Comparison relations
//!
//! A heap is ordered by a [`Compare`] implementation chosen at construction.
//! The relation must be a strict weak ordering: irreflexive, asymmetric and
//! transitive, with incomparability an equivalence. The element it never
//! ranks below any other is the one `peek`/`pop` return.
//!
//! - [`Natural`] uses `Ord` and yields a maximum-first heap, like
//!   `std::collections::BinaryHeap`.
//! - [`Reversed`] flips `Ord` and yields a minimum-first heap.
//! - Any `Fn(&T, &T) -> bool` closure is a relation too.
//!
//! ```rust
//! use leftist_queue::compare::{Compare, Natural, Reversed};
//!
//! assert!(Natural.less(&1, &2));
//! assert!(Reversed.less(&2, &1));
//!
//! let by_abs = |a: &i32, b: &i32| a.abs() < b.abs();
//! assert!(by_abs.less(&1, &-2));
//! ```

/// A strict weak ordering over `T`
pub trait Compare<T: ?Sized> {
    /// Returns `true` when `a` is ranked strictly below `b`
    fn less(&self, a: &T, b: &T) -> bool;
}

/// `a < b` under `Ord`; heaps ordered by it pop the maximum first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// `b < a` under `Ord`; heaps ordered by it pop the minimum first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reversed;

impl<T: Ord + ?Sized> Compare<T> for Reversed {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
