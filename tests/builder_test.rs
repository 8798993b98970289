//! Integration tests for TreeBuilder: shape, invariants and determinism

use std::collections::HashSet;

use rstest::rstest;

use ntree::domain::{AdjacencyMap, DomainError, FrontierOrder, Node, TreeBuilder};
use ntree::util::testing;

fn build(n: usize, frontier: FrontierOrder) -> AdjacencyMap {
    testing::init_test_setup();
    TreeBuilder::new()
        .with_frontier(frontier)
        .build(n)
        .expect("build tree")
}

// ============================================================
// Tree invariants
// ============================================================

#[rstest]
fn given_any_node_count_when_building_then_result_is_spanning_tree(
    #[values(1, 2, 3, 4, 5, 6, 9, 17, 25, 64, 100)] n: usize,
    #[values(FrontierOrder::Fifo, FrontierOrder::Lifo)] frontier: FrontierOrder,
) {
    let adj = build(n, frontier);

    assert_eq!(adj.len(), n);
    assert_eq!(adj.nodes().collect::<Vec<_>>(), (1..=n).collect::<Vec<_>>());
    assert_eq!(adj.edge_count(), n - 1);
    assert!(adj.max_degree() <= 4);
    for (a, nbrs) in adj.iter() {
        for &b in nbrs {
            assert!(
                adj.neighbors(b).unwrap().contains(&a),
                "{a} -> {b} is not symmetric"
            );
        }
    }
    adj.validate(4).expect("valid tree");
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(5)]
fn given_degree_cap_when_building_then_no_node_exceeds_it(#[case] cap: usize) {
    let adj = TreeBuilder::new().with_max_degree(cap).build(50).unwrap();
    assert_eq!(adj.max_degree(), cap);
    adj.validate(cap).expect("valid tree");
}

#[test]
fn given_same_input_when_building_twice_then_maps_are_identical() {
    let first = TreeBuilder::new().build(25).unwrap();
    let second = TreeBuilder::new().build(25).unwrap();
    assert_eq!(first, second);
}

// ============================================================
// Exact shapes
// ============================================================

#[test]
fn given_one_node_when_building_then_single_isolated_node() {
    let adj = build(1, FrontierOrder::Fifo);
    assert_eq!(adj.len(), 1);
    assert_eq!(adj.neighbors(1), Some(&[][..]));
    assert_eq!(adj.edge_count(), 0);
}

#[test]
fn given_two_nodes_when_building_then_single_edge() {
    let adj = build(2, FrontierOrder::Fifo);
    assert_eq!(adj.neighbors(1), Some(&[2][..]));
    assert_eq!(adj.neighbors(2), Some(&[1][..]));
}

#[rstest]
fn given_five_nodes_when_building_then_root_takes_all(
    #[values(FrontierOrder::Fifo, FrontierOrder::Lifo)] frontier: FrontierOrder,
) {
    let adj = build(5, frontier);
    assert_eq!(adj.neighbors(1), Some(&[2, 3, 4, 5][..]));
    for leaf in 2..=5 {
        assert_eq!(adj.neighbors(leaf), Some(&[1][..]));
    }
}

#[test]
fn given_fifo_frontier_when_building_25_then_levels_fill_breadth_first() {
    let adj = build(25, FrontierOrder::Fifo);
    assert_eq!(adj.neighbors(1), Some(&[2, 3, 4, 5][..]));
    assert_eq!(adj.neighbors(2), Some(&[1, 6, 7, 8][..]));
    assert_eq!(adj.neighbors(3), Some(&[1, 9, 10, 11][..]));
    assert_eq!(adj.neighbors(6), Some(&[2, 18, 19, 20][..]));
    assert_eq!(adj.neighbors(8), Some(&[2, 24, 25][..]));
    assert_eq!(adj.neighbors(9), Some(&[3][..]));
}

#[test]
fn given_lifo_frontier_when_building_25_then_tree_grows_a_spine() {
    let adj = build(25, FrontierOrder::Lifo);
    assert_eq!(adj.neighbors(5), Some(&[1, 6, 7, 8][..]));
    assert_eq!(adj.neighbors(8), Some(&[5, 9, 10, 11][..]));
    assert_eq!(adj.neighbors(23), Some(&[20, 24, 25][..]));
    assert_eq!(adj.neighbors(2), Some(&[1][..]));
}

// ============================================================
// Saturation
// ============================================================

/// A node is expanded once: after its parent edge, its remaining neighbors
/// are children with larger ids, attached in ascending order, and it never
/// shows up as a later attachment target once full.
#[rstest]
fn given_saturated_node_when_building_then_it_receives_no_fifth_neighbor(
    #[values(FrontierOrder::Fifo, FrontierOrder::Lifo)] frontier: FrontierOrder,
) {
    let adj = build(80, frontier);
    let mut parents: HashSet<Node> = HashSet::new();
    for (n, nbrs) in adj.iter() {
        assert!(nbrs.len() <= 4, "node {n} has {} neighbors", nbrs.len());
        let children = if n == 1 { nbrs } else { &nbrs[1..] };
        assert!(children.windows(2).all(|w| w[0] < w[1]));
        assert!(children.iter().all(|&c| c > n));
        if !children.is_empty() {
            parents.insert(n);
        }
    }
    assert!(parents.contains(&1));
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_zero_nodes_when_building_then_invalid_input() {
    let err = TreeBuilder::new().build(0).unwrap_err();
    assert_eq!(err, DomainError::InvalidInput { nodes: 0 });
    assert_eq!(err.to_string(), "invalid node count: 0 (need at least 1)");
}

#[test]
fn given_cap_of_one_when_building_then_invalid_degree_cap() {
    let err = TreeBuilder::new().with_max_degree(1).build(3).unwrap_err();
    assert!(matches!(err, DomainError::InvalidDegreeCap { cap: 1 }));
}
