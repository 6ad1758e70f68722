//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized extract_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list (the root ring), and so are the children of
//! every node. The heap keeps a handle to the minimum root and its size.
//!
//! # Storage
//!
//! [`FibonacciHeap`] does not own its nodes. They live in a
//! [`NodeArena`](crate::arena::NodeArena) and every operation takes that arena.
//! Inserting a node links it in, extracting it unlinks it again; freeing the
//! slot is up to the caller. This lets a consumer allocate one node per
//! domain object up front and keep stable handles to them, and lets several
//! heaps over one arena be merged in O(1).
//!
//! Nodes do not record which heap they belong to. With several heaps over
//! one arena, a handle must only be passed to the heap it was inserted into,
//! or the heap that heap was merged into. The arena only tells whether a
//! node is linked into *some* heap.
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
//! let handles: Vec<_> = [10, 20, 30]
//!     .into_iter()
//!     .map(|k| arena.alloc(k, ()))
//!     .collect();
//! for &h in &handles {
//!     heap.insert(&mut arena, h).unwrap();
//! }
//!
//! assert_eq!(heap.decrease_key(&mut arena, handles[2], 2), Ok(true));
//! assert_eq!(heap.peek(&arena), Some((&2, &())));
//!
//! let min = heap.extract_min(&mut arena).unwrap();
//! assert_eq!(min, handles[2]);
//! assert_eq!(heap.len(), 2);
//! ```

use crate::arena::{NodeArena, NodeId};
use crate::traits::HeapError;
use index_ring::RingOps;
use smallvec::{SmallVec, smallvec};
use std::marker::PhantomData;
use thiserror::Error;

/// Golden ratio, the base of the degree bound
const PHI: f64 = 1.618_033_988_749_895;

/// Slots added on top of `ceil(log_phi(n))` in the consolidation table
const DEGREE_TABLE_SLACK: usize = 3;

/// Structural defect found by [`FibonacciHeap::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A handle reachable from the heap does not name a live node
    #[error("reachable handle {0:?} does not name a live node")]
    StaleHandle(NodeId),
    /// `min` is set while `len` is zero, or the other way round
    #[error("head is {head:?} but the heap reports {len} elements")]
    HeadMismatch { head: Option<NodeId>, len: usize },
    /// The head is not a root holding the minimum key
    #[error("head {0:?} is not a minimum root")]
    HeadNotMinimum(NodeId),
    /// `left`/`right` are not inverse of each other somewhere on a ring
    #[error("sibling ring is broken at {0:?}")]
    BrokenRing(NodeId),
    /// A node does not point back at the parent whose child ring holds it
    #[error("node {0:?} has the wrong parent link")]
    WrongParent(NodeId),
    /// A node's degree disagrees with the size of its child ring
    #[error("node {node:?} has degree {degree} but {children} children")]
    DegreeMismatch {
        node: NodeId,
        degree: usize,
        children: usize,
    },
    /// A child holds a strictly smaller key than its parent
    #[error("child {child:?} has a smaller key than its parent {parent:?}")]
    HeapOrder { parent: NodeId, child: NodeId },
    /// A node reachable from the heap is not flagged as linked
    #[error("node {0:?} is reachable but not flagged as linked")]
    Unlinked(NodeId),
    /// The number of reachable nodes differs from `len`
    #[error("heap reports {expected} elements but {found} are reachable")]
    LengthMismatch { expected: usize, found: usize },
}

/// Fibonacci Heap over nodes stored in a [`NodeArena`]
///
/// Node lifecycle: a node is *free* after [`NodeArena::alloc`], becomes a
/// *root* on [`insert`](Self::insert), may become a *child* during
/// consolidation and a root again through a cut, and is *removed* (free
/// again, still allocated) by [`extract_min`](Self::extract_min).
pub struct FibonacciHeap<T, P> {
    min: Option<NodeId>,
    len: usize,
    _phantom: PhantomData<(T, P)>,
}

impl<T, P> std::fmt::Debug for FibonacciHeap<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("min", &self.min)
            .field("len", &self.len)
            .finish()
    }
}

impl<T, P> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> FibonacciHeap<T, P> {
    /// Creates an empty heap
    pub const fn new() -> Self {
        Self {
            min: None,
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Rebuilds a heap view over an existing forest
    pub(crate) fn from_parts(min: Option<NodeId>, len: usize) -> Self {
        Self {
            min,
            len,
            _phantom: PhantomData,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of linked nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Handle of the minimum node, if any. O(1), no mutation.
    pub fn peek_min(&self) -> Option<NodeId> {
        self.min
    }

    /// Priority and payload of the minimum node
    pub fn peek<'a>(&self, arena: &'a NodeArena<T, P>) -> Option<(&'a P, &'a T)> {
        self.min
            .and_then(|min| arena.get(min))
            .map(|node| (&node.priority, &node.item))
    }

    /// Iterates over the root ring, starting at the minimum
    pub fn roots<'a>(&self, arena: &'a NodeArena<T, P>) -> impl Iterator<Item = NodeId> + 'a {
        let ops = RingOps::new();
        self.min.into_iter().flat_map(move |min| ops.iter(arena, min))
    }
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Inserts a free node as a new root
    ///
    /// **Time Complexity**: O(1)
    ///
    /// The node's parent, child, degree and mark are reset, so a node freed
    /// by [`extract_min`](Self::extract_min) can be inserted again.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] for a stale handle,
    /// [`HeapError::AlreadyLinked`] if the node already belongs to a heap.
    pub fn insert(&mut self, arena: &mut NodeArena<T, P>, id: NodeId) -> Result<(), HeapError> {
        let node = arena.get(id).ok_or(HeapError::InvalidHandle)?;
        if node.linked {
            return Err(HeapError::AlreadyLinked);
        }
        self.link_root(arena, id);
        Ok(())
    }

    /// Links a known-free node into the root ring
    pub(crate) fn link_root(&mut self, arena: &mut NodeArena<T, P>, id: NodeId) {
        let ops = RingOps::new();
        let node = arena.node_mut(id);
        node.parent = None;
        node.child = None;
        node.degree = 0;
        node.marked = false;
        node.linked = true;
        ops.make_single(arena, id);

        match self.min {
            None => self.min = Some(id),
            Some(min) => {
                ops.insert_after(arena, min, id);
                if arena.node(id).priority < arena.node(min).priority {
                    self.min = Some(id);
                }
            }
        }
        self.len += 1;
    }

    /// Moves every node of `other` into this heap, leaving `other` empty
    ///
    /// **Time Complexity**: O(1)
    ///
    /// Both heaps must live in `arena`. Afterwards the donor's handles
    /// belong to this heap. An empty donor is a no-op.
    pub fn merge(&mut self, arena: &mut NodeArena<T, P>, other: &mut Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };
        let other_len = std::mem::take(&mut other.len);

        match self.min {
            None => self.min = Some(other_min),
            Some(min) => {
                RingOps::new().splice(arena, Some(min), Some(other_min));
                if arena.node(other_min).priority < arena.node(min).priority {
                    self.min = Some(other_min);
                }
            }
        }
        self.len += other_len;
    }

    /// Unlinks the minimum node and returns its handle
    ///
    /// **Time Complexity**: O(log n) amortized
    ///
    /// **Algorithm**:
    /// 1. Promote the minimum's children into the root ring
    /// 2. Remove the minimum from the root ring
    /// 3. Take its right neighbour as provisional head and consolidate
    ///
    /// The returned node is detached and free but still allocated; free it
    /// with [`NodeArena::remove`] or insert it again.
    pub fn extract_min(&mut self, arena: &mut NodeArena<T, P>) -> Option<NodeId> {
        let min = self.min?;
        let ops = RingOps::new();

        if let Some(child) = arena.node_mut(min).child.take() {
            let mut current = child;
            loop {
                let node = arena.node_mut(current);
                node.parent = None;
                node.marked = false;
                current = node.right;
                if current == child {
                    break;
                }
            }
            ops.splice(arena, Some(min), Some(child));
            arena.node_mut(min).degree = 0;
        }

        let rest = ops.remove(arena, min);
        let node = arena.node_mut(min);
        node.linked = false;
        node.marked = false;
        self.len -= 1;

        match rest {
            None => self.min = None,
            Some(next) => {
                self.min = Some(next);
                self.consolidate(arena);
            }
        }
        Some(min)
    }

    /// Lowers the key of a linked node
    ///
    /// **Time Complexity**: O(1) amortized
    ///
    /// Returns `Ok(false)` without touching anything if the heap is empty or
    /// `new_priority` is not strictly smaller than the current key.
    ///
    /// If the new key breaks heap order with the parent, the node is cut into
    /// the root ring and the cascading cut runs up its former ancestors.
    ///
    /// `id` must be linked into this heap. A node of another heap over the
    /// same arena is not detected and corrupts both views.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] for a stale handle,
    /// [`HeapError::NotInHeap`] if the node is free.
    pub fn decrease_key(
        &mut self,
        arena: &mut NodeArena<T, P>,
        id: NodeId,
        new_priority: P,
    ) -> Result<bool, HeapError> {
        let Some(min) = self.min else {
            return Ok(false);
        };
        let node = arena.get_mut(id).ok_or(HeapError::InvalidHandle)?;
        if !node.linked {
            return Err(HeapError::NotInHeap);
        }
        if new_priority >= node.priority {
            return Ok(false);
        }
        node.priority = new_priority;
        let parent = node.parent;

        if let Some(parent) = parent {
            if arena.node(id).priority < arena.node(parent).priority {
                self.cut(arena, id, parent);
                self.cascading_cut(arena, parent);
            }
        }

        if arena.node(id).priority < arena.node(min).priority {
            self.min = Some(id);
        }
        Ok(true)
    }

    /// Links trees of equal degree until every root degree is distinct
    ///
    /// The table maps a degree to the visited root of that degree. After a
    /// root settles in its slot, the ring is walked to the next root whose
    /// slot does not hold it; such a root has not been visited yet. When none
    /// is left, the minimum is picked among the occupied slots.
    fn consolidate(&mut self, arena: &mut NodeArena<T, P>) {
        let Some(head) = self.min else {
            return;
        };
        let mut table: SmallVec<[Option<NodeId>; 64]> = smallvec![None; degree_table_len(self.len)];
        let mut current = head;

        loop {
            let mut degree = arena.node(current).degree;
            while let Some(other) = table[degree] {
                if other == current {
                    break;
                }
                let (parent, child) = if arena.node(other).priority < arena.node(current).priority {
                    (other, current)
                } else {
                    (current, other)
                };
                self.link(arena, child, parent);
                table[degree] = None;
                current = parent;
                degree += 1;
            }
            table[degree] = Some(current);

            let mut probe = arena.node(current).right;
            let mut unvisited = None;
            while probe != current {
                let probe_degree = arena.node(probe).degree;
                if table.get(probe_degree).copied().flatten() != Some(probe) {
                    unvisited = Some(probe);
                    break;
                }
                probe = arena.node(probe).right;
            }

            match unvisited {
                Some(next) => current = next,
                None => break,
            }
        }

        self.min = table.iter().flatten().copied().reduce(|best, id| {
            if arena.node(id).priority < arena.node(best).priority {
                id
            } else {
                best
            }
        });
    }

    /// Makes `child` a child of `parent`
    fn link(&mut self, arena: &mut NodeArena<T, P>, child: NodeId, parent: NodeId) {
        let ops = RingOps::new();
        ops.remove(arena, child);

        let node = arena.node_mut(child);
        node.parent = Some(parent);
        node.marked = false;

        match arena.node(parent).child {
            None => arena.node_mut(parent).child = Some(child),
            Some(first) => ops.insert_after(arena, first, child),
        }
        arena.node_mut(parent).degree += 1;
    }

    /// Cuts `id` from `parent`'s child ring and adds it to the root ring
    fn cut(&mut self, arena: &mut NodeArena<T, P>, id: NodeId, parent: NodeId) {
        let ops = RingOps::new();
        let rest = ops.remove(arena, id);

        let parent_node = arena.node_mut(parent);
        if parent_node.child == Some(id) {
            parent_node.child = rest;
        }
        parent_node.degree -= 1;

        let node = arena.node_mut(id);
        node.parent = None;
        node.marked = false;

        match self.min {
            Some(min) => ops.insert_after(arena, min, id),
            None => self.min = Some(id),
        }
    }

    /// Walks up from `start`: marks the first unmarked non-root ancestor,
    /// cutting every marked one on the way
    fn cascading_cut(&mut self, arena: &mut NodeArena<T, P>, start: NodeId) {
        let mut current = start;
        while let Some(parent) = arena.node(current).parent {
            if !arena.node(current).marked {
                arena.node_mut(current).marked = true;
                return;
            }
            self.cut(arena, current, parent);
            current = parent;
        }
    }

    /// Checks every structural invariant of the forest
    ///
    /// This is O(n) and meant for tests and debugging.
    pub fn validate(&self, arena: &NodeArena<T, P>) -> Result<(), InvariantViolation> {
        let Some(head) = self.min else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::HeadMismatch {
                    head: None,
                    len: self.len,
                })
            };
        };
        if self.len == 0 {
            return Err(InvariantViolation::HeadMismatch {
                head: Some(head),
                len: 0,
            });
        }

        let head_node = arena.get(head).ok_or(InvariantViolation::StaleHandle(head))?;
        if head_node.parent.is_some() {
            return Err(InvariantViolation::HeadNotMinimum(head));
        }

        let mut found = 0;
        // (first member of a ring, expected parent)
        let mut pending: Vec<(NodeId, Option<NodeId>)> = vec![(head, None)];

        while let Some((first, parent)) = pending.pop() {
            let mut current = first;
            let mut members = 0;
            loop {
                let node = arena.get(current).ok_or(InvariantViolation::StaleHandle(current))?;
                if !node.linked {
                    return Err(InvariantViolation::Unlinked(current));
                }
                if node.parent != parent {
                    return Err(InvariantViolation::WrongParent(current));
                }
                let right = arena.get(node.right).ok_or(InvariantViolation::StaleHandle(node.right))?;
                if right.left != current {
                    return Err(InvariantViolation::BrokenRing(current));
                }
                match parent {
                    Some(p) if node.priority < arena.node(p).priority => {
                        return Err(InvariantViolation::HeapOrder { parent: p, child: current });
                    }
                    None if node.priority < head_node.priority => {
                        return Err(InvariantViolation::HeadNotMinimum(head));
                    }
                    _ => {}
                }

                match node.child {
                    Some(child) => pending.push((child, Some(current))),
                    None if node.degree != 0 => {
                        return Err(InvariantViolation::DegreeMismatch {
                            node: current,
                            degree: node.degree,
                            children: 0,
                        });
                    }
                    None => {}
                }

                members += 1;
                found += 1;
                if found > self.len {
                    return Err(InvariantViolation::LengthMismatch {
                        expected: self.len,
                        found,
                    });
                }
                current = node.right;
                if current == first {
                    break;
                }
            }

            if let Some(p) = parent {
                let degree = arena.node(p).degree;
                if degree != members {
                    return Err(InvariantViolation::DegreeMismatch {
                        node: p,
                        degree,
                        children: members,
                    });
                }
            }
        }

        if found != self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found,
            });
        }
        Ok(())
    }
}

/// Size of the consolidation table for a heap of `len` nodes:
/// `ceil(log_phi(len))` plus slack for the degree a final link can reach
fn degree_table_len(len: usize) -> usize {
    let len = len.max(1) as f64;
    (len.ln() / PHI.ln()).ceil() as usize + DEGREE_TABLE_SLACK
}
