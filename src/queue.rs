//! Owned Fibonacci priority queue
//!
//! [`FibonacciQueue`] bundles a [`NodeArena`] with a [`FibonacciHeap`] so the
//! heap can be used like any other priority queue through the [`Heap`] and
//! [`DecreaseKeyHeap`] traits. Popped elements are freed from the arena, so
//! their handles become invalid.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity         |
//! |----------------|--------------------|
//! | `push`         | O(1)               |
//! | `peek`         | O(1)               |
//! | `pop`          | O(log n) amortized |
//! | `decrease_key` | O(1) amortized     |
//! | `merge`        | O(m), m = donor size |
//!
//! Merging two owned queues has to move the donor's nodes into this queue's
//! arena, which invalidates the donor's handles. Heaps sharing one arena
//! merge in O(1) through [`FibonacciHeap::merge`].

use crate::arena::{NodeArena, NodeId};
use crate::fibonacci::{FibonacciHeap, InvariantViolation};
use crate::traits::{DecreaseKeyHeap, Heap, HeapError};
use slotmap::SecondaryMap;

/// Fibonacci heap that owns its node storage
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::queue::FibonacciQueue;
/// use fibonacci_sssp::{DecreaseKeyHeap, Heap};
///
/// let mut heap = FibonacciQueue::new();
/// let h = heap.push_with_handle(30, "c");
/// heap.push(10, "a");
/// heap.push(20, "b");
///
/// heap.decrease_key(&h, 2).unwrap();
/// assert_eq!(heap.pop(), Some((2, "c")));
/// assert_eq!(heap.pop(), Some((10, "a")));
/// ```
#[derive(Debug)]
pub struct FibonacciQueue<T, P> {
    arena: NodeArena<T, P>,
    heap: FibonacciHeap<T, P>,
}

impl<T, P: Ord> FibonacciQueue<T, P> {
    /// Creates an empty queue with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            heap: FibonacciHeap::new(),
        }
    }

    /// Priority and payload of a queued element
    pub fn get(&self, handle: &NodeId) -> Option<(&P, &T)> {
        self.arena
            .get(*handle)
            .map(|node| (node.priority(), node.item()))
    }

    /// Checks the structural invariants of the underlying forest
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.heap.validate(&self.arena)
    }

    /// Moves all of `other`'s nodes into this queue's arena, links included,
    /// and returns a heap over the moved nodes
    fn adopt_forest(&mut self, other: Self) -> FibonacciHeap<T, P> {
        let Self {
            arena: mut donor_arena,
            heap: donor,
        } = other;

        let mut remap: SecondaryMap<NodeId, NodeId> = SecondaryMap::with_capacity(donor_arena.len());
        for (old, node) in donor_arena.drain() {
            let new = self.arena.adopt(node);
            remap.insert(old, new);
        }

        for &new in remap.values() {
            let node = self.arena.node_mut(new);
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|p| remap[p]);
            node.child = node.child.map(|c| remap[c]);
        }

        FibonacciHeap::from_parts(donor.peek_min().map(|min| remap[min]), donor.len())
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciQueue<T, P> {
    fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            heap: FibonacciHeap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.heap.peek(&self.arena)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        let id = self.heap.extract_min(&mut self.arena)?;
        self.arena.remove(id).ok()
    }

    fn merge(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other;
            return;
        }
        let mut adopted = self.adopt_forest(other);
        self.heap.merge(&mut self.arena, &mut adopted);
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciQueue<T, P> {
    type Handle = NodeId;

    fn push_with_handle(&mut self, priority: P, item: T) -> NodeId {
        let id = self.arena.alloc(priority, item);
        self.heap.link_root(&mut self.arena, id);
        id
    }

    fn decrease_key(&mut self, handle: &NodeId, new_priority: P) -> Result<bool, HeapError> {
        if !self.arena.contains(*handle) {
            return Err(HeapError::InvalidHandle);
        }
        self.heap.decrease_key(&mut self.arena, *handle, new_priority)
    }
}

impl<T, P: Ord> Default for FibonacciQueue<T, P> {
    fn default() -> Self {
        <Self as Heap<T, P>>::new()
    }
}
