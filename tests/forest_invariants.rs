//! Structural invariants of the Fibonacci heap forest
//!
//! These tests inspect the forest through the arena's node view:
//! - Degree bound: a node of degree d roots at least F(d+2) nodes
//! - Consolidation: root degrees are pairwise distinct after extract-min
//! - Marks: roots are never marked
//! - Cascading cuts: marked ancestors are cut all the way up

use fibonacci_sssp::arena::{NodeArena, NodeId};
use fibonacci_sssp::fibonacci::FibonacciHeap;
use proptest::prelude::*;

type Arena = NodeArena<u32, i64>;
type Fib = FibonacciHeap<u32, i64>;

fn build(keys: impl IntoIterator<Item = i64>) -> (Arena, Fib, Vec<NodeId>) {
    let mut arena = NodeArena::new();
    let mut heap = FibonacciHeap::new();
    let handles = keys
        .into_iter()
        .enumerate()
        .map(|(i, key)| {
            let id = arena.alloc(key, i as u32);
            heap.insert(&mut arena, id).unwrap();
            id
        })
        .collect();
    (arena, heap, handles)
}

fn children(arena: &Arena, id: NodeId) -> Vec<NodeId> {
    let Some(first) = arena.get(id).unwrap().child() else {
        return Vec::new();
    };
    let mut out = vec![first];
    let mut current = arena.get(first).unwrap().right();
    while current != first {
        out.push(current);
        current = arena.get(current).unwrap().right();
    }
    out
}

fn child_with_degree(arena: &Arena, id: NodeId, degree: usize) -> NodeId {
    children(arena, id)
        .into_iter()
        .find(|&c| arena.get(c).unwrap().degree() == degree)
        .unwrap()
}

fn subtree_size(arena: &Arena, id: NodeId) -> usize {
    1 + children(arena, id)
        .into_iter()
        .map(|c| subtree_size(arena, c))
        .sum::<usize>()
}

fn fibonacci(n: usize) -> usize {
    let (mut a, mut b) = (0, 1);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

/// Degree bound and mark rules over the whole forest
fn check_shape(arena: &Arena, heap: &Fib) {
    heap.validate(arena).unwrap();

    let mut stack: Vec<NodeId> = heap.roots(arena).collect();
    for &root in &stack {
        assert!(!arena.get(root).unwrap().is_marked(), "root {root:?} is marked");
    }
    while let Some(id) = stack.pop() {
        let degree = arena.get(id).unwrap().degree();
        let size = subtree_size(arena, id);
        assert!(
            size >= fibonacci(degree + 2),
            "node {id:?} of degree {degree} roots only {size} nodes"
        );
        stack.extend(children(arena, id));
    }
}

#[test]
fn test_root_degrees_distinct_after_extract() {
    let (mut arena, mut heap, _) = build((0..100).map(|k| (k * 7919) % 100));
    heap.extract_min(&mut arena);

    let mut degrees: Vec<usize> = heap.roots(&arena).map(|r| arena.get(r).unwrap().degree()).collect();
    let count = degrees.len();
    degrees.sort_unstable();
    degrees.dedup();
    assert_eq!(degrees.len(), count);
    // 99 = 64 + 32 + 2 + 1
    assert_eq!(degrees, vec![0, 1, 5, 6]);
    check_shape(&arena, &heap);
}

#[test]
fn test_cascading_cut_climbs_marked_ancestors() {
    // 17 keys, one extraction: a single binomial tree of 16 nodes
    let (mut arena, mut heap, _) = build(0..17);
    heap.extract_min(&mut arena);
    let roots: Vec<NodeId> = heap.roots(&arena).collect();
    assert_eq!(roots.len(), 1);
    let root = roots[0];
    assert_eq!(arena.get(root).unwrap().degree(), 4);

    let b = child_with_degree(&arena, root, 3);
    let c = child_with_degree(&arena, b, 2);
    let x = child_with_degree(&arena, c, 1);
    let y = child_with_degree(&arena, c, 0);
    let z = child_with_degree(&arena, b, 0);

    // Losing z marks b
    assert_eq!(heap.decrease_key(&mut arena, z, -100), Ok(true));
    assert!(arena.get(b).unwrap().is_marked());
    assert!(!arena.get(c).unwrap().is_marked());
    check_shape(&arena, &heap);

    // Losing y marks c
    assert_eq!(heap.decrease_key(&mut arena, y, -200), Ok(true));
    assert!(arena.get(c).unwrap().is_marked());
    check_shape(&arena, &heap);

    // Losing x cuts c, which cuts b; the root is never marked
    assert_eq!(heap.decrease_key(&mut arena, x, -300), Ok(true));
    check_shape(&arena, &heap);
    for id in [x, c, b] {
        let node = arena.get(id).unwrap();
        assert_eq!(node.parent(), None);
        assert!(!node.is_marked());
    }
    assert!(!arena.get(root).unwrap().is_marked());
    assert_eq!(arena.get(root).unwrap().degree(), 3);
    assert_eq!(arena.get(b).unwrap().degree(), 1);
    assert_eq!(arena.get(c).unwrap().degree(), 0);
    assert_eq!(heap.peek_min(), Some(x));
    assert_eq!(heap.len(), 16);
    assert_eq!(heap.roots(&arena).count(), 6);
}

#[test]
fn test_decrease_key_within_heap_order_does_not_cut() {
    let (mut arena, mut heap, _) = build(0..17);
    heap.extract_min(&mut arena);
    let root = heap.peek_min().unwrap();
    let child = child_with_degree(&arena, root, 3);
    let root_key = *arena.key(root).unwrap();
    assert!(*arena.key(child).unwrap() > root_key);

    // Equal to the parent is still heap ordered: the node stays where it is
    assert_eq!(heap.decrease_key(&mut arena, child, root_key), Ok(true));
    assert_eq!(arena.get(child).unwrap().parent(), Some(root));
    assert!(!arena.get(root).unwrap().is_marked());
    assert_eq!(heap.roots(&arena).count(), 1);
    check_shape(&arena, &heap);
}

#[test]
fn test_extracted_node_is_detached() {
    let (mut arena, mut heap, handles) = build([3, 1, 2]);
    let min = heap.extract_min(&mut arena).unwrap();
    assert_eq!(min, handles[1]);

    let node = arena.get(min).unwrap();
    assert!(!node.is_linked());
    assert_eq!(node.parent(), None);
    assert_eq!(node.child(), None);
    assert_eq!(node.left(), min);
    assert_eq!(node.right(), min);
    assert_eq!(node.degree(), 0);
    assert!(!node.is_marked());
    check_shape(&arena, &heap);
}

proptest! {
    #[test]
    fn test_shape_survives_random_decreases(
        keys in prop::collection::vec(0i64..10_000, 2..150),
        decreases in prop::collection::vec((any::<usize>(), 1i64..5_000), 0..100),
        extract_every in 2usize..10
    ) {
        let (mut arena, mut heap, handles) = build(keys);
        heap.extract_min(&mut arena);

        for (step, (index, delta)) in decreases.into_iter().enumerate() {
            let id = handles[index % handles.len()];
            if arena.is_linked(id) {
                let key = *arena.key(id).unwrap();
                prop_assert_eq!(heap.decrease_key(&mut arena, id, key - delta), Ok(true));
            }
            if step % extract_every == 0 {
                heap.extract_min(&mut arena);
            }
            check_shape(&arena, &heap);
        }
    }
}
