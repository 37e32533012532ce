//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait with the `BinaryHeap`-style push/peek/pop surface
//! - [`MergeableHeap`]: Extended trait adding union of two heaps
//!
//! Generic test suites and benchmarks are written against these traits, so any
//! heap in this crate can be dropped into them.

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The operation needs at least one element but the heap holds none
    #[error("container is empty")]
    Empty,
}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the most extreme element
/// - `peek` returns the most extreme element without removing it
///
/// Which element is "most extreme" is decided by the heap's comparison
/// relation; see [`Compare`](crate::compare::Compare).
///
/// # Example
///
/// ```rust
/// use leftist_queue::Heap;
/// use leftist_queue::leftist::LeftistHeap;
///
/// let mut heap: LeftistHeap<i32> = Heap::new();
/// Heap::push(&mut heap, 3);
/// Heap::push(&mut heap, 1);
/// Heap::push(&mut heap, 2);
///
/// assert_eq!(Heap::peek(&heap), Some(&3));
/// assert_eq!(Heap::pop(&mut heap), Some(3));
/// ```
pub trait Heap<T> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(log n) for leftist heaps.
    fn push(&mut self, item: T);

    /// Returns the most extreme element without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<&T>;

    /// Removes and returns the most extreme element
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<T>;
}

/// Heaps that can absorb another heap of the same type
pub trait MergeableHeap<T>: Heap<T> {
    /// Merges another heap into this one, consuming the other heap
    ///
    /// # Time Complexity
    /// O(log n + log m) for leftist heaps.
    fn merge(&mut self, other: Self);
}
