//! Tests for the heap-driven shortest-path engine
//!
//! Tests cover:
//! - The small reference graphs with known answers
//! - Edge cases (isolated vertices, one-way edges, zero weights)
//! - Agreement with a lazy-deletion `BinaryHeap` Dijkstra on random graphs
//! - Path reconstruction

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fibonacci_sssp::graph::{GraphConfig, WeightedGraph};
use fibonacci_sssp::shortest_path::{ShortestPathEngine, UNREACHABLE, dijkstra};
use proptest::prelude::*;

/// Textbook Dijkstra with duplicate queue entries
fn reference_distances(graph: &WeightedGraph, source: usize) -> Vec<i64> {
    let n = graph.vertex_count();
    let mut dist = vec![UNREACHABLE; n + 1];
    let mut queue = BinaryHeap::new();
    dist[source] = 0;
    queue.push(Reverse((0i64, source)));

    while let Some(Reverse((d, u))) = queue.pop() {
        if d > dist[u] {
            continue;
        }
        for edge in graph.neighbors(u) {
            let candidate = d.saturating_add(edge.weight);
            if candidate < dist[edge.target] {
                dist[edge.target] = candidate;
                queue.push(Reverse((candidate, edge.target)));
            }
        }
    }
    dist.split_off(1)
}

fn graph_strategy(directed: bool) -> impl Strategy<Value = WeightedGraph> {
    (1usize..40).prop_flat_map(move |n| {
        prop::collection::vec((1..=n, 1..=n, 0i64..1000), 0..(n * 4)).prop_map(move |edges| {
            let config = GraphConfig { directed };
            WeightedGraph::from_edges(n, edges, config).unwrap()
        })
    })
}

#[test]
fn test_reference_graph() {
    let graph =
        WeightedGraph::from_edges(4, [(1, 2, 1), (2, 3, 2), (1, 3, 4), (3, 4, 1)], GraphConfig::undirected()).unwrap();
    let paths = dijkstra(&graph, 1).unwrap();
    assert_eq!(paths.raw(), &[0, 1, 3, 4]);
}

#[test]
fn test_reference_graph_with_unreachable_vertex() {
    let graph =
        WeightedGraph::from_edges(5, [(1, 2, 1), (2, 3, 2), (1, 3, 4), (3, 4, 1)], GraphConfig::undirected()).unwrap();
    let paths = dijkstra(&graph, 1).unwrap();
    assert_eq!(paths.raw(), &[0, 1, 3, 4, UNREACHABLE]);
    assert_eq!(paths.raw()[4], 9_223_372_036_854_775_807);
}

#[test]
fn test_other_source() {
    let graph =
        WeightedGraph::from_edges(4, [(1, 2, 1), (2, 3, 2), (1, 3, 4), (3, 4, 1)], GraphConfig::undirected()).unwrap();
    let paths = ShortestPathEngine::new(&graph).run(4).unwrap();
    assert_eq!(paths.source(), 4);
    assert_eq!(paths.raw(), &[4, 3, 1, 0]);
    assert_eq!(paths.path_to(1), Some(vec![4, 3, 2, 1]));
}

#[test]
fn test_zero_weight_edges() {
    let graph = WeightedGraph::from_edges(4, [(1, 2, 0), (2, 3, 0), (3, 4, 5)], GraphConfig::undirected()).unwrap();
    let paths = dijkstra(&graph, 1).unwrap();
    assert_eq!(paths.raw(), &[0, 0, 0, 5]);
}

#[test]
fn test_single_vertex() {
    let graph = WeightedGraph::new(1, GraphConfig::default());
    let paths = dijkstra(&graph, 1).unwrap();
    assert_eq!(paths.raw(), &[0]);
    assert_eq!(paths.settled(), 1);
}

#[test]
fn test_many_decrease_keys_on_a_fan() {
    // Every vertex 2..=n is first reached directly from 1 with a heavy edge,
    // then improved through the light chain 1 -> 2 -> 3 -> ...
    let n = 200;
    let mut edges = Vec::new();
    for v in 2..=n {
        edges.push((1, v, 10_000));
        edges.push((v - 1, v, 1));
    }
    let graph = WeightedGraph::from_edges(n, edges, GraphConfig::directed()).unwrap();
    let paths = dijkstra(&graph, 1).unwrap();

    let expected: Vec<i64> = (0..n as i64).collect();
    assert_eq!(paths.raw(), expected.as_slice());
    let stats = paths.stats();
    assert_eq!(stats.inserts, n - 1);
    // Vertex 2 improves while the source is relaxed, the rest from their chain predecessor
    assert_eq!(stats.decrease_keys, n - 1);
    assert_eq!(stats.extractions, n - 1);
}

#[test]
fn test_grid_matches_reference() {
    let side = 30;
    let id = |r: usize, c: usize| r * side + c + 1;
    let mut edges = Vec::new();
    for r in 0..side {
        for c in 0..side {
            let w = ((r * 31 + c * 17) % 9 + 1) as i64;
            if c + 1 < side {
                edges.push((id(r, c), id(r, c + 1), w));
            }
            if r + 1 < side {
                edges.push((id(r, c), id(r + 1, c), w + 1));
            }
        }
    }
    let graph = WeightedGraph::from_edges(side * side, edges, GraphConfig::undirected()).unwrap();
    for source in [1, side * side / 2, side * side] {
        let paths = dijkstra(&graph, source).unwrap();
        assert_eq!(paths.raw(), reference_distances(&graph, source).as_slice());
        assert_eq!(paths.settled(), side * side);
    }
}

proptest! {
    #[test]
    fn test_matches_reference_undirected(graph in graph_strategy(false), source_seed in any::<usize>()) {
        let source = source_seed % graph.vertex_count() + 1;
        let paths = dijkstra(&graph, source).unwrap();
        let expected = reference_distances(&graph, source);
        prop_assert_eq!(paths.raw(), expected.as_slice());
    }

    #[test]
    fn test_matches_reference_directed(graph in graph_strategy(true), source_seed in any::<usize>()) {
        let source = source_seed % graph.vertex_count() + 1;
        let paths = dijkstra(&graph, source).unwrap();
        let expected = reference_distances(&graph, source);
        prop_assert_eq!(paths.raw(), expected.as_slice());
    }

    #[test]
    fn test_paths_are_consistent(graph in graph_strategy(true)) {
        let paths = dijkstra(&graph, 1).unwrap();
        let reachable = paths.raw().iter().filter(|&&d| d != UNREACHABLE).count();
        prop_assert_eq!(paths.settled(), reachable);

        for v in 1..=graph.vertex_count() {
            match paths.path_to(v) {
                None => prop_assert_eq!(paths.distance(v), None),
                Some(path) => {
                    prop_assert_eq!(path.first(), Some(&1));
                    prop_assert_eq!(path.last(), Some(&v));
                    // Sum of the cheapest arcs along the path equals the distance
                    let mut total = 0;
                    for pair in path.windows(2) {
                        let weight = graph
                            .neighbors(pair[0])
                            .iter()
                            .filter(|e| e.target == pair[1])
                            .map(|e| e.weight)
                            .min();
                        prop_assert!(weight.is_some());
                        total += weight.unwrap_or_default();
                    }
                    prop_assert_eq!(Some(total), paths.distance(v));
                }
            }
        }
    }
}
