//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait with push/peek/pop/merge
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key` and handle-based operations
//!
//! The base [`Heap`] trait follows Rust's standard heap API patterns (but as a
//! min-heap over separate priorities), while [`DecreaseKeyHeap`] adds the
//! operations needed by algorithms like Dijkstra's shortest path.

use thiserror::Error;

/// Error type for handle-based heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The handle does not refer to a live node (it was freed, or never existed)
    #[error("handle does not refer to a live node")]
    InvalidHandle,
    /// The node exists but is not currently linked into any heap
    #[error("node is not linked into a heap")]
    NotInHeap,
    /// The node is still linked into a heap and cannot be inserted, re-keyed or freed
    #[error("node is already linked into a heap")]
    AlreadyLinked,
}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::Heap;
/// use fibonacci_sssp::queue::FibonacciQueue;
///
/// let mut heap = FibonacciQueue::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::{DecreaseKeyHeap, Heap};
/// use fibonacci_sssp::queue::FibonacciQueue;
///
/// let mut heap = FibonacciQueue::new();
/// let handle = heap.push_with_handle(10, "item");
/// assert_eq!(heap.decrease_key(&handle, 5), Ok(true));
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element identified by `handle`
    ///
    /// A `new_priority` that is not strictly smaller than the current one is
    /// ignored and reported as `Ok(false)`; the heap is left untouched.
    /// `Ok(true)` means the priority was lowered.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element was already popped,
    /// or [`HeapError::NotInHeap`] if the handle names a detached node.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<bool, HeapError>;
}
