//! Circular doubly-linked rings threaded through an arena by index.
//!
//! This crate provides the ring primitives used by the Fibonacci heap: every
//! node sits in exactly one ring at a time (the ring of roots, or the ring of
//! its parent's children), and rings are spliced, split and walked in O(1)
//! per step.
//!
//! Unlike a pointer-based intrusive list, links are plain keys (`usize`
//! indices, slotmap keys, ...) stored in whatever container owns the nodes.
//! The container exposes them through [`RingStore`], and [`RingOps`] performs
//! the rewiring. No `unsafe` is involved: a stale key is the container's
//! problem to detect, never a dangling pointer.
//!
//! # Circular rings
//!
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any member can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around, so walks must remember where they started
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingOps, RingStore};
//!
//! #[derive(Default)]
//! struct Links {
//!     next: Vec<usize>,
//!     prev: Vec<usize>,
//! }
//!
//! impl RingStore<usize> for Links {
//!     fn next(&self, key: usize) -> usize { self.next[key] }
//!     fn prev(&self, key: usize) -> usize { self.prev[key] }
//!     fn set_next(&mut self, key: usize, next: usize) { self.next[key] = next; }
//!     fn set_prev(&mut self, key: usize, prev: usize) { self.prev[key] = prev; }
//! }
//!
//! let mut links = Links { next: vec![0; 3], prev: vec![0; 3] };
//! let ops = RingOps::new();
//!
//! ops.make_single(&mut links, 0);
//! ops.insert_after(&mut links, 0, 1);
//! ops.insert_after(&mut links, 1, 2);
//!
//! assert_eq!(ops.count(&links, 0), 3);
//! assert_eq!(ops.iter(&links, 1).collect::<Vec<_>>(), vec![1, 2, 0]);
//! ```

#![no_std]

use core::marker::PhantomData;

// =============================================================================
// RingStore
// =============================================================================

/// Access to the `next`/`prev` links of ring members.
///
/// Implementors own the nodes; the ring operations only read and write the
/// two link fields. Looking up a key that is not present may panic.
pub trait RingStore<K: Copy + Eq> {
    /// Returns the key following `key` in its ring.
    fn next(&self, key: K) -> K;

    /// Returns the key preceding `key` in its ring.
    fn prev(&self, key: K) -> K;

    /// Overwrites the `next` link of `key`.
    fn set_next(&mut self, key: K, next: K);

    /// Overwrites the `prev` link of `key`.
    fn set_prev(&mut self, key: K, prev: K);
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating circular rings stored in a [`RingStore`].
///
/// All operations except [`count`](RingOps::count) and iteration are O(1).
///
/// The caller is responsible for the ring invariants:
/// - a key passed as "new" must not be a member of any other ring
/// - a key passed as "at" must be a member of a well-formed ring
#[derive(Clone, Copy, Default, Debug)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Turns `key` into a ring of one element.
    ///
    /// After this, `next(key) == key` and `prev(key) == key`.
    #[inline]
    pub fn make_single<K, S>(&self, store: &mut S, key: K)
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        store.set_next(key, key);
        store.set_prev(key, key);
    }

    /// Returns true if `key` is alone in its ring.
    #[inline]
    pub fn is_single<K, S>(&self, store: &S, key: K) -> bool
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        store.next(key) == key
    }

    /// Inserts `new` right after `at`.
    #[inline]
    pub fn insert_after<K, S>(&self, store: &mut S, at: K, new: K)
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        debug_assert!(at != new, "cannot insert a key next to itself");
        let next = store.next(at);

        store.set_next(at, new);
        store.set_prev(new, at);
        store.set_next(new, next);
        store.set_prev(next, new);
    }

    /// Inserts `new` right before `at`.
    #[inline]
    pub fn insert_before<K, S>(&self, store: &mut S, at: K, new: K)
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        debug_assert!(at != new, "cannot insert a key next to itself");
        let prev = store.prev(at);

        store.set_prev(at, new);
        store.set_next(new, at);
        store.set_prev(new, prev);
        store.set_next(prev, new);
    }

    /// Removes `key` from its ring and leaves it as a ring of one.
    ///
    /// Returns a remaining member of the old ring (the old `next`), or `None`
    /// if `key` was the only member.
    #[inline]
    pub fn remove<K, S>(&self, store: &mut S, key: K) -> Option<K>
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        let next = store.next(key);
        if next == key {
            return None;
        }
        let prev = store.prev(key);

        store.set_next(prev, next);
        store.set_prev(next, prev);
        self.make_single(store, key);
        Some(next)
    }

    /// Splices two rings together and returns an entry point into the result.
    ///
    /// If either side is `None`, the other is returned unchanged.
    ///
    /// ```text
    /// before:  ... <-> a_prev <-> a <-> ...      ... <-> b_prev <-> b <-> ...
    /// after:   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
    /// ```
    ///
    /// `a` and `b` must belong to different rings; splicing a ring with
    /// itself splits it instead.
    #[inline]
    pub fn splice<K, S>(&self, store: &mut S, a: Option<K>, b: Option<K>) -> Option<K>
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                let a_prev = store.prev(a);
                let b_prev = store.prev(b);

                store.set_next(a_prev, b);
                store.set_prev(b, a_prev);

                store.set_next(b_prev, a);
                store.set_prev(a, b_prev);

                Some(a)
            }
        }
    }

    /// Counts the members of the ring containing `start`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<K, S>(&self, store: &S, start: K) -> usize
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        let mut count = 1;
        let mut current = store.next(start);
        while current != start {
            count += 1;
            current = store.next(current);
        }
        count
    }

    /// Iterates over the ring starting at `start`, following `next` links.
    ///
    /// The store is borrowed for the iterator's lifetime, so the ring cannot
    /// be modified during the walk. Collect first if you need to rewire.
    pub fn iter<'a, K, S>(&self, store: &'a S, start: K) -> RingIter<'a, K, S>
    where
        K: Copy + Eq,
        S: RingStore<K>,
    {
        RingIter {
            store,
            start,
            next: Some(start),
            _key: PhantomData,
        }
    }
}

// =============================================================================
// RingIter
// =============================================================================

/// Iterator over one full turn of a ring. Created by [`RingOps::iter`].
pub struct RingIter<'a, K, S> {
    store: &'a S,
    start: K,
    next: Option<K>,
    _key: PhantomData<K>,
}

impl<K, S> Iterator for RingIter<'_, K, S>
where
    K: Copy + Eq,
    S: RingStore<K>,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let current = self.next?;
        let following = self.store.next(current);
        self.next = if following == self.start {
            None
        } else {
            Some(following)
        };
        Some(current)
    }
}

// =============================================================================
// Tests
// =============================================================================
