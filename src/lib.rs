//! Mergeable priority queues for Rust
//!
//! This crate provides a leftist-heap-backed priority queue with value
//! semantics: cloning a queue deep-copies every element, and two queues can be
//! merged in O(log n) by relinking nodes rather than copying them.
//!
//! # Features
//!
//! - **Leftist Heap**: O(log n) push, pop and merge; O(1) peek
//! - **Pluggable ordering**: any strict weak ordering via [`Compare`]; the
//!   default [`Natural`] ordering pops the maximum first
//! - **Panic safety**: a comparator that panics during push, pop or merge
//!   leaves every queue involved unchanged
//!
//! # Example
//!
//! ```rust
//! use leftist_queue::leftist::LeftistHeap;
//! use leftist_queue::compare::Reversed;
//!
//! let mut heap = LeftistHeap::with_compare(Reversed);
//! heap.push(5);
//! heap.push(3);
//! heap.push(7);
//! assert_eq!(heap.top(), Ok(&3));
//!
//! let mut other = LeftistHeap::with_compare(Reversed);
//! other.push(1);
//! heap.append(&mut other);
//! assert_eq!(heap.pop(), Ok(1));
//! assert!(other.is_empty());
//! ```

pub mod compare;
pub mod leftist;
pub mod traits;

// Re-export the main types for convenience
pub use compare::{Compare, Natural, Reversed};
pub use leftist::LeftistHeap;
pub use traits::{Heap, HeapError, MergeableHeap};
