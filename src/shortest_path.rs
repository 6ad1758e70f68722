//! Single-source shortest paths driven by the Fibonacci heap
//!
//! The engine allocates one heap node per vertex up front, keyed by the
//! vertex's tentative distance, and keeps the node handles in a per-vertex
//! table. Relaxing an edge is then either an insert (first time the vertex
//! is reached) or a `decrease_key` on its handle, never a duplicate entry.
//!
//! Vertices move `White` (unreached) → `Gray` (in the heap) → `Black`
//! (settled). The source is settled at distance 0 before the loop starts and
//! never enters the heap; the heap is seeded by relaxing the source's edges.
//!
//! Edge weights must be non-negative for the distances to be correct.
//! Negative weights are not detected. Sums saturate at [`UNREACHABLE`].
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::graph::{GraphConfig, WeightedGraph};
//! use fibonacci_sssp::shortest_path::{UNREACHABLE, dijkstra};
//!
//! let edges = [(1, 2, 1), (2, 3, 2), (1, 3, 4), (3, 4, 1)];
//! let graph = WeightedGraph::from_edges(5, edges, GraphConfig::undirected()).unwrap();
//!
//! let paths = dijkstra(&graph, 1).unwrap();
//! assert_eq!(paths.raw(), &[0, 1, 3, 4, UNREACHABLE]);
//! assert_eq!(paths.distance(4), Some(4));
//! assert_eq!(paths.distance(5), None);
//! assert_eq!(paths.path_to(4), Some(vec![1, 2, 3, 4]));
//! ```

use crate::arena::{NodeArena, NodeId};
use crate::error::Result;
use crate::fibonacci::FibonacciHeap;
use crate::graph::WeightedGraph;
use crate::traits::HeapError;
use tracing::{debug, debug_span, trace};

/// Distance reported for vertices the source cannot reach
pub const UNREACHABLE: i64 = i64::MAX;

/// Search state of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexColor {
    /// Not reached yet
    White,
    /// Reached, tentative distance, queued in the heap
    Gray,
    /// Settled, distance final
    Black,
}

/// Counts of heap operations performed by one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxationStats {
    pub inserts: usize,
    pub decrease_keys: usize,
    pub extractions: usize,
}

#[derive(Debug, Clone)]
struct VertexState {
    handle: NodeId,
    color: VertexColor,
    distance: i64,
    predecessor: Option<usize>,
}

/// Distances from one source to every vertex `1..=n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: usize,
    distances: Vec<i64>,
    predecessors: Vec<Option<usize>>,
    settled: usize,
    stats: RelaxationStats,
}

impl ShortestPaths {
    /// The source vertex
    pub fn source(&self) -> usize {
        self.source
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.distances.len()
    }

    /// Distance to `vertex`, or `None` if it is unreachable or out of range
    pub fn distance(&self, vertex: usize) -> Option<i64> {
        vertex
            .checked_sub(1)
            .and_then(|i| self.distances.get(i))
            .copied()
            .filter(|&d| d != UNREACHABLE)
    }

    /// Distances for vertices `1..=n` in order, [`UNREACHABLE`] for unreached ones
    pub fn raw(&self) -> &[i64] {
        &self.distances
    }

    /// Vertex preceding `vertex` on its shortest path; `None` for the source
    /// and for unreachable vertices
    pub fn predecessor(&self, vertex: usize) -> Option<usize> {
        vertex
            .checked_sub(1)
            .and_then(|i| self.predecessors.get(i))
            .copied()
            .flatten()
    }

    /// Vertices on a shortest path from the source to `vertex`, both inclusive
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance(vertex)?;

        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(previous) = self.predecessor(current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }

    /// Number of settled vertices, the source included
    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn stats(&self) -> RelaxationStats {
        self.stats
    }
}

/// One shortest-path computation over a borrowed graph
pub struct ShortestPathEngine<'g> {
    graph: &'g WeightedGraph,
    arena: NodeArena<usize, i64>,
    heap: FibonacciHeap<usize, i64>,
    vertices: Vec<VertexState>,
    stats: RelaxationStats,
}

impl<'g> ShortestPathEngine<'g> {
    /// Allocates one free heap node per vertex
    pub fn new(graph: &'g WeightedGraph) -> Self {
        let n = graph.vertex_count();
        let mut arena = NodeArena::with_capacity(n);
        let vertices = (1..=n)
            .map(|vertex| VertexState {
                handle: arena.alloc(UNREACHABLE, vertex),
                color: VertexColor::White,
                distance: UNREACHABLE,
                predecessor: None,
            })
            .collect();

        Self {
            graph,
            arena,
            heap: FibonacciHeap::new(),
            vertices,
            stats: RelaxationStats::default(),
        }
    }

    /// Computes distances from `source` to every vertex
    ///
    /// # Errors
    /// [`GraphError::VertexOutOfRange`](crate::graph::GraphError) if `source`
    /// is not a vertex of the graph.
    pub fn run(mut self, source: usize) -> Result<ShortestPaths> {
        self.graph.check_vertex(source)?;
        let span = debug_span!("dijkstra", source, vertices = self.graph.vertex_count());
        let _guard = span.enter();

        let start = self.state_mut(source);
        start.distance = 0;
        start.color = VertexColor::Black;
        let mut settled = 1;

        self.relax(source, 0)?;

        while let Some(id) = self.heap.extract_min(&mut self.arena) {
            self.stats.extractions += 1;
            let (distance, vertex) = match self.arena.get(id) {
                Some(node) => (*node.priority(), *node.item()),
                None => return Err(HeapError::InvalidHandle.into()),
            };
            trace!(vertex, distance, "settled");

            self.state_mut(vertex).color = VertexColor::Black;
            settled += 1;
            self.relax(vertex, distance)?;
        }

        let RelaxationStats {
            inserts,
            decrease_keys,
            extractions,
        } = self.stats;
        debug!(settled, inserts, decrease_keys, extractions, "shortest paths done");

        let (distances, predecessors) = self
            .vertices
            .iter()
            .map(|state| (state.distance, state.predecessor))
            .unzip();
        Ok(ShortestPaths {
            source,
            distances,
            predecessors,
            settled,
            stats: self.stats,
        })
    }

    /// Relaxes every outgoing edge of `vertex`, settled at `distance`
    fn relax(&mut self, vertex: usize, distance: i64) -> std::result::Result<(), HeapError> {
        let graph = self.graph;
        for edge in graph.neighbors(vertex) {
            let candidate = distance.saturating_add(edge.weight);
            let target = self.state(edge.target).clone();

            match target.color {
                VertexColor::White => {
                    self.arena.set_priority(target.handle, candidate)?;
                    self.heap.insert(&mut self.arena, target.handle)?;
                    self.stats.inserts += 1;
                }
                VertexColor::Gray if candidate < target.distance => {
                    self.heap.decrease_key(&mut self.arena, target.handle, candidate)?;
                    self.stats.decrease_keys += 1;
                }
                VertexColor::Gray | VertexColor::Black => continue,
            }

            let state = self.state_mut(edge.target);
            state.color = VertexColor::Gray;
            state.distance = candidate;
            state.predecessor = Some(vertex);
        }
        Ok(())
    }

    fn state(&self, vertex: usize) -> &VertexState {
        &self.vertices[vertex - 1]
    }

    fn state_mut(&mut self, vertex: usize) -> &mut VertexState {
        &mut self.vertices[vertex - 1]
    }
}

/// Shortest distances from `source` over `graph`
pub fn dijkstra(graph: &WeightedGraph, source: usize) -> Result<ShortestPaths> {
    ShortestPathEngine::new(graph).run(source)
}
