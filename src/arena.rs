//! Node storage for the Fibonacci heap
//!
//! Heap nodes live in a [`NodeArena`] backed by a `slotmap`, and are addressed
//! by generational [`NodeId`] handles. The heap itself only threads handles
//! together; it never allocates or frees a node.
//!
//! # Design
//!
//! - Each node carries its key and payload next to the heap's structural
//!   fields (parent, one child, left/right siblings, degree, mark).
//! - A node is either *free* (allocated, not in any heap) or *linked*.
//!   Keys can only be rewritten freely while a node is free; once linked, the
//!   owning heap's `decrease_key` is the only way to change it.
//! - Generational keys make a handle that outlived its node detectable:
//!   lookups return `None` / [`HeapError::InvalidHandle`] instead of
//!   touching a recycled slot.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::arena::NodeArena;
//! use fibonacci_sssp::fibonacci::FibonacciHeap;
//!
//! let mut arena = NodeArena::new();
//! let mut heap = FibonacciHeap::new();
//!
//! let a = arena.alloc(7, "a");
//! let b = arena.alloc(3, "b");
//! heap.insert(&mut arena, a).unwrap();
//! heap.insert(&mut arena, b).unwrap();
//!
//! assert_eq!(heap.peek_min(), Some(b));
//! assert_eq!(arena.key(b), Some(&3));
//! ```

use crate::traits::{Handle, HeapError};
use index_ring::RingStore;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Generational handle to a node stored in a [`NodeArena`]
    pub struct NodeId;
}

impl Handle for NodeId {}

/// A heap node: key and payload plus the links of its sibling ring
/// and its parent/child relation.
#[derive(Debug, Clone)]
pub struct HeapNode<T, P> {
    pub(crate) priority: P,
    pub(crate) item: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) child: Option<NodeId>,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
    pub(crate) linked: bool,
}

impl<T, P> HeapNode<T, P> {
    /// The node's priority
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// The node's payload
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Parent handle, `None` for roots and free nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// One arbitrary child; the rest are on that child's sibling ring
    pub fn child(&self) -> Option<NodeId> {
        self.child
    }

    /// Left neighbour on the sibling ring
    pub fn left(&self) -> NodeId {
        self.left
    }

    /// Right neighbour on the sibling ring
    pub fn right(&self) -> NodeId {
        self.right
    }

    /// Number of direct children
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether the node lost a child since it was last linked under a parent
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Whether the node currently belongs to a heap
    pub fn is_linked(&self) -> bool {
        self.linked
    }
}

/// Slot-map arena owning heap nodes
///
/// Several heaps may share one arena; merging heaps over the same arena is
/// then O(1). A heap must only ever be used with the arena its nodes live in.
#[derive(Debug, Clone)]
pub struct NodeArena<T, P> {
    nodes: SlotMap<NodeId, HeapNode<T, P>>,
}

impl<T, P> NodeArena<T, P> {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Creates an empty arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocates a free node and returns its handle
    ///
    /// The node starts as a ring of one with no parent, no children and no mark.
    pub fn alloc(&mut self, priority: P, item: T) -> NodeId {
        self.nodes.insert_with_key(|id| HeapNode {
            priority,
            item,
            parent: None,
            child: None,
            left: id,
            right: id,
            degree: 0,
            marked: false,
            linked: false,
        })
    }

    /// Frees a node and returns its priority and payload
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] for a stale handle,
    /// [`HeapError::AlreadyLinked`] if the node is still part of a heap.
    pub fn remove(&mut self, id: NodeId) -> Result<(P, T), HeapError> {
        match self.nodes.get(id) {
            None => Err(HeapError::InvalidHandle),
            Some(node) if node.linked => Err(HeapError::AlreadyLinked),
            Some(_) => self
                .nodes
                .remove(id)
                .map(|node| (node.priority, node.item))
                .ok_or(HeapError::InvalidHandle),
        }
    }

    /// Rewrites the priority of a free node
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] for a stale handle,
    /// [`HeapError::AlreadyLinked`] if the node is part of a heap (use
    /// the heap's `decrease_key` instead).
    pub fn set_priority(&mut self, id: NodeId, priority: P) -> Result<(), HeapError> {
        let node = self.nodes.get_mut(id).ok_or(HeapError::InvalidHandle)?;
        if node.linked {
            return Err(HeapError::AlreadyLinked);
        }
        node.priority = priority;
        Ok(())
    }

    /// Returns the node behind `id`, if it is still allocated
    pub fn get(&self, id: NodeId) -> Option<&HeapNode<T, P>> {
        self.nodes.get(id)
    }

    /// Returns the priority of a node
    pub fn priority(&self, id: NodeId) -> Option<&P> {
        self.nodes.get(id).map(|node| &node.priority)
    }

    /// Alias of [`priority`](Self::priority)
    pub fn key(&self, id: NodeId) -> Option<&P> {
        self.priority(id)
    }

    /// Returns the payload of a node
    pub fn item(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.item)
    }

    /// Returns the payload of a node mutably; the priority stays untouched
    pub fn item_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.item)
    }

    /// Returns true if `id` refers to an allocated node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns true if `id` is allocated and linked into a heap
    pub fn is_linked(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.linked)
    }

    /// Number of allocated nodes (free and linked)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node is allocated
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all allocated nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HeapNode<T, P>)> {
        self.nodes.iter()
    }

    pub(crate) fn node(&self, id: NodeId) -> &HeapNode<T, P> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut HeapNode<T, P> {
        &mut self.nodes[id]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut HeapNode<T, P>> {
        self.nodes.get_mut(id)
    }

    /// Moves a node, links included, into a fresh slot
    pub(crate) fn adopt(&mut self, node: HeapNode<T, P>) -> NodeId {
        self.nodes.insert(node)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (NodeId, HeapNode<T, P>)> + '_ {
        self.nodes.drain()
    }
}

impl<T, P> Default for NodeArena<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> RingStore<NodeId> for NodeArena<T, P> {
    #[inline]
    fn next(&self, key: NodeId) -> NodeId {
        self.nodes[key].right
    }

    #[inline]
    fn prev(&self, key: NodeId) -> NodeId {
        self.nodes[key].left
    }

    #[inline]
    fn set_next(&mut self, key: NodeId, next: NodeId) {
        self.nodes[key].right = next;
    }

    #[inline]
    fn set_prev(&mut self, key: NodeId, prev: NodeId) {
        self.nodes[key].left = prev;
    }
}
