//! Fibonacci heap and heap-driven single-source shortest paths
//!
//! This crate provides a Fibonacci heap over an arena of nodes addressed by
//! generational handles, and a Dijkstra shortest-path engine that relies on
//! the heap's `decrease_key`.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert, decrease_key, and merge; O(log n) amortized extract-min
//! - **FibonacciQueue**: the heap bundled with its own arena, behind the [`Heap`] / [`DecreaseKeyHeap`] traits
//! - **Shortest paths**: one heap node per vertex, seeded from the source's neighbours
//! - **Text I/O**: `n m` plus `m` edge triples in, one line of distances out
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::arena::NodeArena;
//! use fibonacci_sssp::fibonacci::FibonacciHeap;
//!
//! let mut arena = NodeArena::new();
//! let mut heap = FibonacciHeap::new();
//! let handle1 = arena.alloc(5, "item1");
//! let handle2 = arena.alloc(3, "item2");
//! heap.insert(&mut arena, handle1).unwrap();
//! heap.insert(&mut arena, handle2).unwrap();
//! heap.decrease_key(&mut arena, handle1, 1).unwrap();
//! assert_eq!(heap.peek(&arena), Some((&1, &"item1")));
//! ```

pub mod arena;
pub mod error;
pub mod fibonacci;
pub mod graph;
pub mod io;
pub mod queue;
pub mod shortest_path;
pub mod traits;

// Re-export the main traits for convenience
pub use error::{Error, Result};
pub use traits::{DecreaseKeyHeap, Heap, HeapError};
