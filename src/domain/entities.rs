//! Domain entities: core data structures

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// Node identifier in `1..=N`.
pub type Node = usize;

/// Undirected tree edge, normalized so that `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub a: Node,
    pub b: Node,
}

impl Edge {
    pub fn new(x: Node, y: Node) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }
}

impl From<(Node, Node)> for Edge {
    fn from((x, y): (Node, Node)) -> Self {
        Edge::new(x, y)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.a, self.b)
    }
}

/// Node -> ordered neighbor list.
///
/// Keys iterate in ascending order, which is the natural order every consumer
/// relies on (per-start reporting, edge listing, rendering).
/// Each undirected edge is stored twice, once per direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    adj: BTreeMap<Node, Vec<Node>>,
}

impl AdjacencyMap {
    /// Map over `1..=n` with no edges.
    pub(crate) fn with_nodes(n: usize) -> Self {
        Self {
            adj: (1..=n).map(|i| (i, Vec::new())).collect(),
        }
    }

    /// Attach `a` and `b` to each other. Both must already be keys.
    pub(crate) fn link(&mut self, a: Node, b: Node) {
        if let Some(nbrs) = self.adj.get_mut(&a) {
            nbrs.push(b);
        }
        if let Some(nbrs) = self.adj.get_mut(&b) {
            nbrs.push(a);
        }
    }

    /// Build a map over `1..=n` from an edge list, preserving edge order in the
    /// neighbor lists. No tree invariants are checked here, see [`validate`].
    ///
    /// [`validate`]: AdjacencyMap::validate
    pub fn from_edges(n: usize, edges: &[Edge]) -> DomainResult<Self> {
        let mut map = Self::with_nodes(n);
        for edge in edges {
            for end in [edge.a, edge.b] {
                if !map.adj.contains_key(&end) {
                    return Err(DomainError::NodeNotFound(end));
                }
            }
            if edge.a == edge.b {
                return Err(DomainError::invalid_tree(format!(
                    "self loop at node {}",
                    edge.a
                )));
            }
            map.link(edge.a, edge.b);
        }
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.adj.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    pub fn contains(&self, n: Node) -> bool {
        self.adj.contains_key(&n)
    }

    /// Nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.adj.keys().copied()
    }

    pub fn neighbors(&self, n: Node) -> Option<&[Node]> {
        self.adj.get(&n).map(Vec::as_slice)
    }

    /// Number of neighbors of `n`, 0 for unknown nodes.
    pub fn degree(&self, n: Node) -> usize {
        self.adj.get(&n).map_or(0, Vec::len)
    }

    pub fn max_degree(&self) -> usize {
        self.adj.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, &[Node])> + '_ {
        self.adj.iter().map(|(n, nbrs)| (*n, nbrs.as_slice()))
    }

    /// Undirected edge count (each edge is stored twice).
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Each undirected edge once, reported from its smaller endpoint while
    /// walking nodes in ascending order.
    pub fn edges(&self) -> Vec<Edge> {
        self.iter()
            .flat_map(|(a, nbrs)| {
                nbrs.iter()
                    .filter(move |&&b| a < b)
                    .map(move |&b| Edge::new(a, b))
            })
            .collect()
    }

    /// Payload handed to a renderer.
    pub fn nodes_and_edges(&self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes().collect(), self.edges())
    }

    /// Check that the map is a spanning tree over `1..=N` whose degrees do not
    /// exceed `cap`.
    pub fn validate(&self, cap: usize) -> DomainResult<()> {
        let n = self.len();
        if n == 0 {
            return Err(DomainError::invalid_tree("empty map"));
        }
        if !self.nodes().eq(1..=n) {
            return Err(DomainError::invalid_tree(format!(
                "keys are not exactly 1..={n}"
            )));
        }

        for (a, nbrs) in self.iter() {
            if nbrs.len() > cap {
                return Err(DomainError::invalid_tree(format!(
                    "node {a} has degree {} > {cap}",
                    nbrs.len()
                )));
            }
            if !nbrs.iter().all_unique() {
                return Err(DomainError::invalid_tree(format!(
                    "node {a} lists a neighbor twice"
                )));
            }
            for &b in nbrs {
                if a == b {
                    return Err(DomainError::invalid_tree(format!("self loop at node {a}")));
                }
                let back = self.neighbors(b).ok_or(DomainError::NodeNotFound(b))?;
                if !back.contains(&a) {
                    return Err(DomainError::invalid_tree(format!(
                        "edge {a} -> {b} has no reverse"
                    )));
                }
            }
        }

        let edges = self.edge_count();
        if edges != n - 1 {
            return Err(DomainError::invalid_tree(format!(
                "{edges} edges for {n} nodes"
            )));
        }

        let reached = self.reachable_from(1);
        if reached != n {
            return Err(DomainError::invalid_tree(format!(
                "only {reached} of {n} nodes reachable from node 1"
            )));
        }
        Ok(())
    }

    fn reachable_from(&self, start: Node) -> usize {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(curr) = queue.pop_front() {
            for &nbr in self.neighbors(curr).unwrap_or_default() {
                if seen.insert(nbr) {
                    queue.push_back(nbr);
                }
            }
        }
        seen.len()
    }
}

impl fmt::Display for AdjacencyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, nbrs) in self.iter() {
            writeln!(f, "{}: [{}]", n, nbrs.iter().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> AdjacencyMap {
        AdjacencyMap::from_edges(4, &[Edge::new(1, 2), Edge::new(1, 3), Edge::new(4, 1)]).unwrap()
    }

    #[test]
    fn edge_is_normalized() {
        let e = Edge::new(7, 3);
        assert_eq!((e.a, e.b), (3, 7));
        assert_eq!(e, Edge::from((3, 7)));
    }

    #[test]
    fn edges_are_listed_once() {
        let adj = star();
        assert_eq!(adj.edge_count(), 3);
        assert_eq!(
            adj.edges(),
            vec![Edge::new(1, 2), Edge::new(1, 3), Edge::new(1, 4)]
        );
        assert_eq!(adj.neighbors(1), Some(&[2, 3, 4][..]));
        assert_eq!(adj.neighbors(4), Some(&[1][..]));
    }

    #[test]
    fn star_is_valid_tree() {
        assert!(star().validate(4).is_ok());
        assert!(star().validate(2).is_err());
    }

    #[test]
    fn cycle_is_rejected() {
        let adj = AdjacencyMap::from_edges(
            4,
            &[Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)],
        )
        .unwrap();
        // edge count is n-1, so only connectivity catches it
        let err = adj.validate(4).unwrap_err();
        assert!(err.to_string().contains("reachable"), "{err}");
    }

    #[test]
    fn asymmetric_map_is_rejected() {
        let mut adj = AdjacencyMap::with_nodes(2);
        adj.adj.get_mut(&1).unwrap().push(2);
        let err = adj.validate(4).unwrap_err();
        assert!(err.to_string().contains("no reverse"), "{err}");
    }

    #[test]
    fn from_edges_rejects_unknown_node() {
        let err = AdjacencyMap::from_edges(2, &[Edge::new(1, 3)]).unwrap_err();
        assert_eq!(err, DomainError::NodeNotFound(3));
    }

    #[test]
    fn display_lists_neighbors() {
        assert_eq!(star().to_string(), "1: [2, 3, 4]\n2: [1]\n3: [1]\n4: [1]\n");
    }
}
