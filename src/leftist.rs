//! Leftist Heap implementation
//!
//! A leftist heap is a heap-ordered binary tree in which every node's left
//! subtree is at least as "deep" as its right one, measured by null path
//! length (NPL): the distance to the nearest node with a missing child.
//! That keeps the right spine at most `log2(n + 1)` nodes long, and merging
//! two heaps only ever walks right spines:
//! - O(log n) push, pop and merge
//! - O(1) peek
//!
//! Every mutating operation is built on one merge primitive. The primitive
//! runs in two phases: a read-only *plan* over both right spines, where every
//! comparator call happens, followed by an infallible *link* that replays the
//! plan. A comparator that panics therefore leaves the heap untouched.
//!
//! # Time Complexity
//!
//! | Operation | Complexity        |
//! |-----------|-------------------|
//! | `push`    | O(log n)          |
//! | `pop`     | O(log n)          |
//! | `peek`    | O(1)              |
//! | `append`  | O(log n + log m)  |
//! | `clone`   | O(n)              |
//!
//! # Example
//!
//! ```rust
//! use leftist_queue::leftist::LeftistHeap;
//!
//! let mut x = LeftistHeap::new();
//! x.push(10);
//! x.push(20);
//!
//! let mut y = LeftistHeap::new();
//! y.push(15);
//! y.push(5);
//!
//! x.append(&mut y);
//! assert!(y.is_empty());
//! assert_eq!(x.into_sorted_vec(), vec![20, 15, 10, 5]);
//! ```

use crate::compare::{Compare, Natural};
use crate::traits::{Heap, HeapError, MergeableHeap};
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, trace};

/// Inline capacity of the spine scratch buffers
///
/// A right spine of an n-node leftist heap has at most `log2(n + 1)` nodes,
/// so merges of heaps below 2^32 elements never allocate for bookkeeping.
const SPINE_INLINE: usize = 64;

/// Type alias for an owning child slot
type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    item: T,
    /// Null path length: `npl(right) + 1`
    npl: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(item: T) -> Box<Self> {
        Box::new(Node {
            item,
            npl: 1,
            left: None,
            right: None,
        })
    }
}

#[inline]
fn npl<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.npl)
}

/// Which input supplies the next node of the merged right spine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    First,
    Second,
}

type MergePlan = SmallVec<[Pick; SPINE_INLINE]>;

/// Walks both right spines and records the winner at each step.
///
/// Ties go to `first`. Only borrows the trees, so a panicking comparator
/// cannot leave them half-linked.
fn plan_merge<T, C: Compare<T>>(first: &Link<T>, second: &Link<T>, compare: &C) -> MergePlan {
    let mut plan = MergePlan::new();
    let mut a = first.as_deref();
    let mut b = second.as_deref();

    while let (Some(x), Some(y)) = (a, b) {
        if compare.less(&x.item, &y.item) {
            plan.push(Pick::Second);
            b = y.right.as_deref();
        } else {
            plan.push(Pick::First);
            a = x.right.as_deref();
        }
    }

    plan
}

/// Replays a plan produced by [`plan_merge`] for the same two trees.
fn link<T>(mut first: Link<T>, mut second: Link<T>, plan: &[Pick]) -> Link<T> {
    let mut spine: SmallVec<[Box<Node<T>>; SPINE_INLINE]> = SmallVec::with_capacity(plan.len());

    for pick in plan {
        let source = match pick {
            Pick::First => &mut first,
            Pick::Second => &mut second,
        };
        if let Some(mut node) = source.take() {
            *source = node.right.take();
            spine.push(node);
        }
    }

    // The plan stops once one spine runs out; whatever is left of the other
    // hangs off the deepest winner unchanged.
    let mut merged = first.or(second);
    while let Some(mut node) = spine.pop() {
        node.right = merged;
        if npl(&node.left) < npl(&node.right) {
            std::mem::swap(&mut node.left, &mut node.right);
        }
        node.npl = npl(&node.right) + 1;
        merged = Some(node);
    }

    merged
}

/// Frees a tree with an explicit stack.
///
/// Left spines are unbounded (ascending pushes into a max-first heap build a
/// left chain of length n), so the default recursive `Box` drop could
/// overflow the stack.
fn release<T>(root: Link<T>) {
    let mut pending: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

/// Partially built subtrees, released without recursion if a clone unwinds
struct Forest<T>(Vec<Link<T>>);

impl<T> Drop for Forest<T> {
    fn drop(&mut self) {
        for root in self.0.drain(..) {
            release(root);
        }
    }
}

enum Step<'a, T> {
    Enter(&'a Link<T>),
    Leave(&'a Node<T>),
}

/// Deep-copies a tree in post-order, keeping each node's cached NPL
fn clone_tree<T: Clone>(root: &Link<T>) -> Link<T> {
    let mut steps = vec![Step::Enter(root)];
    let mut built = Forest(Vec::new());

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(None) => built.0.push(None),
            Step::Enter(Some(node)) => {
                steps.push(Step::Leave(&**node));
                steps.push(Step::Enter(&node.right));
                steps.push(Step::Enter(&node.left));
            }
            Step::Leave(node) => {
                // Clone before popping children so an unwinding clone leaves
                // them inside the forest.
                let item = node.item.clone();
                let right = built.0.pop().flatten();
                let left = built.0.pop().flatten();
                built.0.push(Some(Box::new(Node {
                    item,
                    npl: node.npl,
                    left,
                    right,
                })));
            }
        }
    }

    built.0.pop().flatten()
}

/// Leftist Heap
///
/// A mergeable priority queue ordered by `C`. With the default [`Natural`]
/// relation the largest element comes out first, as with
/// `std::collections::BinaryHeap`.
///
/// # Failure guarantees
///
/// Comparator panics propagate to the caller. `push`, `pop` and `append`
/// call the comparator before relinking anything, so a panic leaves every heap
/// involved exactly as it was. A panicking element `Clone` during
/// [`Clone::clone`] leaks nothing and leaves the source untouched.
///
/// # Example
///
/// ```rust
/// use leftist_queue::leftist::LeftistHeap;
/// use leftist_queue::HeapError;
///
/// let mut heap = LeftistHeap::new();
/// heap.push(5);
/// heap.push(3);
/// heap.push(8);
/// heap.push(1);
///
/// assert_eq!(heap.top(), Ok(&8));
/// assert_eq!(heap.pop(), Ok(8));
/// assert_eq!(heap.pop(), Ok(5));
/// assert_eq!(heap.pop(), Ok(3));
/// assert_eq!(heap.pop(), Ok(1));
/// assert_eq!(heap.pop(), Err(HeapError::Empty));
/// ```
pub struct LeftistHeap<T, C = Natural> {
    root: Link<T>,
    len: usize,
    compare: C,
}

impl<T: Ord> LeftistHeap<T> {
    /// Creates an empty maximum-first heap
    pub fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<T, C: Compare<T>> LeftistHeap<T, C> {
    /// Creates an empty heap ordered by `compare`
    ///
    /// ```rust
    /// use leftist_queue::leftist::LeftistHeap;
    ///
    /// let mut heap = LeftistHeap::with_compare(|a: &i32, b: &i32| a > b);
    /// heap.push(2);
    /// heap.push(1);
    /// assert_eq!(heap.peek(), Some(&1));
    /// ```
    pub fn with_compare(compare: C) -> Self {
        LeftistHeap {
            root: None,
            len: 0,
            compare,
        }
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the comparison relation the heap is ordered by
    pub fn compare(&self) -> &C {
        &self.compare
    }

    /// Returns the most extreme element, or `None` if the heap is empty
    pub fn peek(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.item)
    }

    /// Returns the most extreme element
    ///
    /// # Errors
    ///
    /// [`HeapError::Empty`] if the heap holds no elements.
    pub fn top(&self) -> Result<&T, HeapError> {
        self.peek().ok_or_else(|| {
            debug!("top on empty leftist heap");
            HeapError::Empty
        })
    }

    /// Inserts an element
    pub fn push(&mut self, item: T) {
        let single = Some(Node::leaf(item));
        let plan = plan_merge(&self.root, &single, &self.compare);
        self.root = link(self.root.take(), single, &plan);
        self.len += 1;
    }

    /// Removes and returns the most extreme element
    ///
    /// # Errors
    ///
    /// [`HeapError::Empty`] if the heap holds no elements; the heap is not
    /// modified.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        let plan = match self.root.as_deref() {
            Some(root) => plan_merge(&root.left, &root.right, &self.compare),
            None => {
                debug!("pop on empty leftist heap");
                return Err(HeapError::Empty);
            }
        };

        let root = self.root.take().ok_or(HeapError::Empty)?;
        let Node {
            item, left, right, ..
        } = *root;
        self.root = link(left, right, &plan);
        self.len -= 1;

        Ok(item)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty
    ///
    /// No element is copied; `other`'s nodes are relinked into this heap's
    /// right spine. The merged heap is ordered by `self`'s relation.
    ///
    /// # Time Complexity
    /// O(log n + log m)
    pub fn append(&mut self, other: &mut Self) {
        trace!(
            receiver = self.len,
            donor = other.len,
            "appending leftist heaps"
        );

        let plan = plan_merge(&self.root, &other.root, &self.compare);
        self.root = link(self.root.take(), other.root.take(), &plan);
        self.len += std::mem::take(&mut other.len);
    }

    /// Removes every element
    pub fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }

    /// Consumes the heap and returns its elements in pop order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }

    /// Checks heap order, the leftist property, every cached NPL and the
    /// element count. O(n).
    pub fn is_valid(&self) -> bool {
        if self.root.is_none() != (self.len == 0) {
            return false;
        }

        let mut count = 0;
        let mut pending: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            if npl(&node.left) < npl(&node.right) || node.npl != npl(&node.right) + 1 {
                return false;
            }
            for child in [&node.left, &node.right].into_iter().flatten() {
                if self.compare.less(&node.item, &child.item) {
                    return false;
                }
                pending.push(&**child);
            }
        }

        count == self.len
    }
}

impl<T, C> Drop for LeftistHeap<T, C> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<T: Clone, C: Clone> Clone for LeftistHeap<T, C> {
    fn clone(&self) -> Self {
        trace!(len = self.len, "cloning leftist heap");
        LeftistHeap {
            root: clone_tree(&self.root),
            len: self.len,
            compare: self.compare.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        trace!(
            len = source.len,
            released = self.len,
            "cloning leftist heap in place"
        );
        release(self.root.take());
        self.len = 0;
        self.compare = source.compare.clone();
        self.root = clone_tree(&source.root);
        self.len = source.len;
    }
}

impl<T, C: Compare<T> + Default> Default for LeftistHeap<T, C> {
    fn default() -> Self {
        Self::with_compare(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for LeftistHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeftistHeap")
            .field("len", &self.len)
            .field("top", &self.root.as_deref().map(|node| &node.item))
            .finish()
    }
}

impl<T, C: Compare<T>> Extend<T> for LeftistHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for LeftistHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

impl<T, C: Compare<T> + Default> Heap<T> for LeftistHeap<T, C> {
    fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        LeftistHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        LeftistHeap::len(self)
    }

    fn push(&mut self, item: T) {
        LeftistHeap::push(self, item)
    }

    fn peek(&self) -> Option<&T> {
        LeftistHeap::peek(self)
    }

    fn pop(&mut self) -> Option<T> {
        LeftistHeap::pop(self).ok()
    }
}

impl<T, C: Compare<T> + Default> MergeableHeap<T> for LeftistHeap<T, C> {
    fn merge(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Reversed;

    fn right_spine_len<T, C>(heap: &LeftistHeap<T, C>) -> usize {
        let mut len = 0;
        let mut cursor = heap.root.as_deref();
        while let Some(node) = cursor {
            len += 1;
            cursor = node.right.as_deref();
        }
        len
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = LeftistHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.push(5);
        heap.push(3);
        heap.push(8);
        heap.push(1);

        assert_eq!(heap.len(), 4);
        assert_eq!(heap.top(), Ok(&8));
        assert_eq!(heap.pop(), Ok(8));
        assert_eq!(heap.top(), Ok(&5));
        assert_eq!(heap.pop(), Ok(5));
        assert_eq!(heap.top(), Ok(&3));
        assert_eq!(heap.pop(), Ok(3));
        assert_eq!(heap.top(), Ok(&1));
        assert_eq!(heap.pop(), Ok(1));
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), Err(HeapError::Empty));
    }

    #[test]
    fn test_empty_errors_leave_heap_alone() {
        let mut heap: LeftistHeap<i32> = LeftistHeap::new();
        assert_eq!(heap.top(), Err(HeapError::Empty));
        assert_eq!(heap.pop(), Err(HeapError::Empty));
        assert_eq!(heap.len(), 0);
        assert!(heap.is_valid());

        heap.push(1);
        assert_eq!(heap.pop(), Ok(1));
        assert_eq!(heap.top(), Err(HeapError::Empty));
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_leaf_npl() {
        let mut heap = LeftistHeap::new();
        heap.push(1);
        let root = heap.root.as_deref().unwrap();
        assert_eq!(root.npl, 1);
        assert!(root.left.is_none() && root.right.is_none());
    }

    #[test]
    fn test_second_push_goes_left() {
        let mut heap = LeftistHeap::new();
        heap.push(2);
        heap.push(1);

        let root = heap.root.as_deref().unwrap();
        assert_eq!(root.item, 2);
        assert_eq!(root.left.as_ref().map(|n| n.item), Some(1));
        assert!(root.right.is_none());
        assert_eq!(root.npl, 1);
    }

    #[test]
    fn test_right_spine_is_logarithmic() {
        let mut heap = LeftistHeap::new();
        for i in 0..4096 {
            heap.push((i * 7919) % 4096);
            let bound = usize::BITS - (heap.len() + 1).leading_zeros();
            assert!(right_spine_len(&heap) <= bound as usize);
        }
        assert!(heap.is_valid());
    }

    #[test]
    fn test_append() {
        let mut x = LeftistHeap::new();
        x.push(10);
        x.push(20);

        let mut y = LeftistHeap::new();
        y.push(15);
        y.push(5);

        x.append(&mut y);

        assert_eq!(x.len(), 4);
        assert_eq!(y.len(), 0);
        assert!(y.is_empty());
        assert_eq!(y.top(), Err(HeapError::Empty));
        assert!(x.is_valid());
        assert!(y.is_valid());
        assert_eq!(x.into_sorted_vec(), vec![20, 15, 10, 5]);
    }

    #[test]
    fn test_append_with_empty() {
        let mut x = LeftistHeap::new();
        let mut y = LeftistHeap::new();
        x.append(&mut y);
        assert!(x.is_empty() && y.is_empty());

        y.push(3);
        x.append(&mut y);
        assert_eq!(x.len(), 1);
        assert!(y.is_empty());

        x.append(&mut y);
        assert_eq!(x.pop(), Ok(3));
    }

    #[test]
    fn test_reversed_is_min_first() {
        let mut heap = LeftistHeap::with_compare(Reversed);
        heap.extend([4, 1, 3, 2]);
        assert_eq!(heap.top(), Ok(&1));
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_closure_ordering() {
        let mut heap = LeftistHeap::with_compare(|a: &(u32, char), b: &(u32, char)| a.0 < b.0);
        heap.push((2, 'b'));
        heap.push((9, 'i'));
        heap.push((4, 'd'));
        assert_eq!(heap.pop(), Ok((9, 'i')));
        assert_eq!(heap.pop(), Ok((4, 'd')));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a: LeftistHeap<i32> = (1..=10).collect();
        let mut b = a.clone();
        assert!(b.is_valid());

        b.push(100);
        assert_eq!(b.pop(), Ok(100));
        assert_eq!(b.pop(), Ok(10));
        assert_eq!(a.len(), 10);
        assert_eq!(a.top(), Ok(&10));

        a.clear();
        assert_eq!(b.len(), 9);
        assert_eq!(b.top(), Ok(&9));
    }

    #[test]
    fn test_clone_preserves_shape() {
        let heap: LeftistHeap<i32> = [7, 3, 9, 1, 4, 8].into_iter().collect();
        let copy = heap.clone();
        assert_eq!(right_spine_len(&copy), right_spine_len(&heap));
        assert_eq!(npl(&copy.root), npl(&heap.root));
        assert_eq!(copy.into_sorted_vec(), heap.clone().into_sorted_vec());
    }

    #[test]
    fn test_clone_from_replaces_contents() {
        let source: LeftistHeap<i32> = [1, 2, 3].into_iter().collect();
        let mut target: LeftistHeap<i32> = (10..20).collect();

        target.clone_from(&source);

        assert_eq!(target.len(), 3);
        assert!(target.is_valid());
        assert_eq!(target.into_sorted_vec(), vec![3, 2, 1]);
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_duplicates() {
        let mut heap = LeftistHeap::new();
        for _ in 0..5 {
            heap.push(7);
        }
        heap.push(3);
        assert!(heap.is_valid());
        assert_eq!(heap.into_sorted_vec(), vec![7, 7, 7, 7, 7, 3]);
    }

    #[test]
    fn test_is_valid_detects_broken_order() {
        let mut heap = LeftistHeap::new();
        heap.push(2);
        heap.push(1);
        if let Some(root) = heap.root.as_deref_mut() {
            root.item = 0;
        }
        assert!(!heap.is_valid());
    }

    #[test]
    fn test_is_valid_detects_bad_count() {
        let mut heap = LeftistHeap::new();
        heap.push(1);
        heap.len = 2;
        assert!(!heap.is_valid());
    }

    #[test]
    fn test_debug_output() {
        let mut heap = LeftistHeap::new();
        heap.push(4);
        heap.push(9);
        assert_eq!(format!("{:?}", heap), "LeftistHeap { len: 2, top: Some(9) }");
    }
}
