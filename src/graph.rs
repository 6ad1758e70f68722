//! Weighted adjacency-list graph over a fixed, 1-based vertex set
//!
//! Vertices are numbered `1..=n`; slot 0 exists but never carries edges, so a
//! vertex number indexes the adjacency table directly. Undirected graphs
//! store every edge as two arcs.

use smallvec::SmallVec;
use thiserror::Error;

/// Largest vertex count a graph accepts
pub const MAX_VERTICES: usize = 1 << 24;

/// Errors raised while building or querying a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex number outside `1..=vertex_count`
    #[error("vertex {vertex} is out of range 1..={vertex_count}")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },
    /// A vertex count above [`MAX_VERTICES`]
    #[error("{vertex_count} vertices exceed the limit of {limit}")]
    TooManyVertices { vertex_count: usize, limit: usize },
}

/// Graph construction options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// Store edges one way only. Undirected when false.
    pub directed: bool,
}

impl GraphConfig {
    /// Undirected graph: each edge is inserted in both directions
    pub const fn undirected() -> Self {
        Self { directed: false }
    }

    /// Directed graph: each edge is inserted as given
    pub const fn directed() -> Self {
        Self { directed: true }
    }
}

/// Outgoing arc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: usize,
    pub weight: i64,
}

/// Adjacency-list graph with `i64` edge weights
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    adjacency: Vec<SmallVec<[Edge; 4]>>,
    edge_count: usize,
    config: GraphConfig,
}

impl WeightedGraph {
    /// Creates a graph with vertices `1..=vertex_count` and no edges
    ///
    /// # Panics
    /// If `vertex_count` exceeds [`MAX_VERTICES`]. Use [`Self::try_new`] for
    /// counts that come from input.
    pub fn new(vertex_count: usize, config: GraphConfig) -> Self {
        match Self::try_new(vertex_count, config) {
            Ok(graph) => graph,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty graph, rejecting counts above [`MAX_VERTICES`]
    pub fn try_new(vertex_count: usize, config: GraphConfig) -> Result<Self, GraphError> {
        if vertex_count > MAX_VERTICES {
            return Err(GraphError::TooManyVertices {
                vertex_count,
                limit: MAX_VERTICES,
            });
        }
        Ok(Self {
            adjacency: vec![SmallVec::new(); vertex_count + 1],
            edge_count: 0,
            config,
        })
    }

    /// Builds a graph from `(source, target, weight)` triples
    ///
    /// # Errors
    /// [`GraphError::TooManyVertices`] above [`MAX_VERTICES`],
    /// [`GraphError::VertexOutOfRange`] on the first edge naming a vertex
    /// outside `1..=vertex_count`.
    pub fn from_edges<I>(vertex_count: usize, edges: I, config: GraphConfig) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, i64)>,
    {
        let mut graph = Self::try_new(vertex_count, config)?;
        for (source, target, weight) in edges {
            graph.add_edge(source, target, weight)?;
        }
        Ok(graph)
    }

    /// Adds an edge; undirected graphs also get the reverse arc
    ///
    /// Weights are not validated. Shortest paths are only correct for
    /// non-negative weights.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: i64) -> Result<(), GraphError> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;

        self.adjacency[source].push(Edge { target, weight });
        if !self.config.directed {
            self.adjacency[target].push(Edge {
                target: source,
                weight,
            });
        }
        self.edge_count += 1;
        Ok(())
    }

    /// Returns `Ok(())` if `vertex` is in `1..=vertex_count`
    pub fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    /// Returns true if `vertex` is in `1..=vertex_count`
    pub fn contains(&self, vertex: usize) -> bool {
        (1..self.adjacency.len()).contains(&vertex)
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len() - 1
    }

    /// Number of edges added, not counting reverse arcs
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    /// Outgoing arcs of `vertex`; empty for vertices out of range
    pub fn neighbors(&self, vertex: usize) -> &[Edge] {
        if self.contains(vertex) {
            &self.adjacency[vertex]
        } else {
            &[]
        }
    }
}
