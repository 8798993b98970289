//! Brute-force longest simple path search over a tree.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::entities::{AdjacencyMap, Node};
use crate::domain::error::{DomainError, DomainResult};

/// Per-start heights and the overall longest path, in edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiameterReport {
    /// `(start, longest path starting at start)` in ascending node order
    pub per_start: Vec<(Node, usize)>,
    pub longest: usize,
}

impl DiameterReport {
    pub fn height_of(&self, start: Node) -> Option<usize> {
        self.per_start
            .iter()
            .find(|(n, _)| *n == start)
            .map(|(_, h)| *h)
    }

    /// Starts whose longest path equals the diameter.
    pub fn peripheral(&self) -> Vec<Node> {
        self.per_start
            .iter()
            .filter(|(_, h)| *h == self.longest)
            .map(|(n, _)| *n)
            .collect()
    }
}

/// Runs a depth-first search from every node of a tree.
///
/// O(N) per start, O(N^2) overall. Never mutates the map. A map that is not
/// acyclic is reported as `InvalidTree` instead of being walked forever.
#[derive(Debug, Clone, Copy)]
pub struct DiameterFinder<'a> {
    adj: &'a AdjacencyMap,
}

impl<'a> DiameterFinder<'a> {
    pub fn new(adj: &'a AdjacencyMap) -> Self {
        Self { adj }
    }

    /// Length of the longest simple path starting at `start`.
    ///
    /// Walks the tree with an explicit stack of `(node, parent, depth)`; a
    /// neighbor equal to the parent is never followed back. Reaching any
    /// other node a second time means the map has a cycle.
    #[instrument(level = "trace", skip(self))]
    pub fn height_from(&self, start: Node) -> DomainResult<usize> {
        if !self.adj.contains(start) {
            return Err(DomainError::NodeNotFound(start));
        }

        let mut longest = 0;
        let mut visited: HashSet<Node> = HashSet::from([start]);
        let mut stack: Vec<(Node, Option<Node>, usize)> = vec![(start, None, 0)];
        while let Some((curr, parent, depth)) = stack.pop() {
            longest = longest.max(depth);
            let nbrs = self
                .adj
                .neighbors(curr)
                .ok_or(DomainError::NodeNotFound(curr))?;
            for &nbr in nbrs.iter().filter(|&&nbr| Some(nbr) != parent) {
                if !visited.insert(nbr) {
                    return Err(DomainError::invalid_tree(format!(
                        "node {nbr} reached twice from start {start}"
                    )));
                }
                stack.push((nbr, Some(curr), depth + 1));
            }
        }
        Ok(longest)
    }

    /// Longest simple path over all starts.
    pub fn longest_path(&self) -> DomainResult<DiameterReport> {
        self.longest_path_with(|_, _| {})
    }

    /// Like [`longest_path`], calling `observer(start, height)` as each start
    /// is computed, in ascending node order. Stops at the first start whose
    /// search fails; the observer has then seen only the earlier starts.
    ///
    /// [`longest_path`]: DiameterFinder::longest_path
    #[instrument(level = "debug", skip(self, observer), fields(nodes = self.adj.len()))]
    pub fn longest_path_with<F>(&self, mut observer: F) -> DomainResult<DiameterReport>
    where
        F: FnMut(Node, usize),
    {
        let mut report = DiameterReport::default();
        for start in self.adj.nodes() {
            let height = self.height_from(start)?;
            observer(start, height);
            report.per_start.push((start, height));
            report.longest = report.longest.max(height);
        }
        debug!(longest = report.longest, "diameter computed");
        Ok(report)
    }
}

/// Convenience wrapper: diameter of `adj` in edges.
pub fn longest_path(adj: &AdjacencyMap) -> DomainResult<usize> {
    Ok(DiameterFinder::new(adj).longest_path()?.longest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Edge;

    fn path(n: usize) -> AdjacencyMap {
        let edges: Vec<Edge> = (1..n).map(|i| Edge::new(i, i + 1)).collect();
        AdjacencyMap::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn single_node_has_zero_diameter() {
        assert_eq!(longest_path(&path(1)).unwrap(), 0);
    }

    #[test]
    fn path_heights_grow_towards_ends() {
        let adj = path(5);
        let report = DiameterFinder::new(&adj).longest_path().unwrap();
        assert_eq!(
            report.per_start,
            vec![(1, 4), (2, 3), (3, 2), (4, 3), (5, 4)]
        );
        assert_eq!(report.longest, 4);
        assert_eq!(report.peripheral(), vec![1, 5]);
        assert_eq!(report.height_of(3), Some(2));
    }

    #[test]
    fn unknown_start_is_reported() {
        let adj = path(3);
        let err = DiameterFinder::new(&adj).height_from(9).unwrap_err();
        assert_eq!(err, DomainError::NodeNotFound(9));
    }

    #[test]
    fn observer_sees_every_start_in_order() {
        let adj = path(4);
        let mut seen = Vec::new();
        let report = DiameterFinder::new(&adj)
            .longest_path_with(|n, h| seen.push((n, h)))
            .unwrap();
        assert_eq!(seen, report.per_start);
    }

    #[test]
    fn deep_path_does_not_overflow_stack() {
        let adj = path(200_000);
        assert_eq!(DiameterFinder::new(&adj).height_from(1).unwrap(), 199_999);
    }

    #[test]
    fn cycle_is_reported_instead_of_walked() {
        let adj = AdjacencyMap::from_edges(
            3,
            &[Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 3)],
        )
        .unwrap();
        let err = longest_path(&adj).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTree { .. }), "{err}");
        assert!(err.to_string().contains("reached twice"), "{err}");
    }

    #[test]
    fn duplicated_edge_counts_as_cycle() {
        let adj = AdjacencyMap::from_edges(2, &[Edge::new(1, 2), Edge::new(2, 1)]).unwrap();
        assert!(matches!(
            DiameterFinder::new(&adj).height_from(1),
            Err(DomainError::InvalidTree { .. })
        ));
    }

    #[test]
    fn observer_stops_at_failing_start() {
        // 1 - 2 - 3 - 4 - 2: node 1 is outside the cycle but still reaches it
        let adj = AdjacencyMap::from_edges(
            4,
            &[Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 4), Edge::new(4, 2)],
        )
        .unwrap();
        let mut seen = Vec::new();
        let result = DiameterFinder::new(&adj).longest_path_with(|n, h| seen.push((n, h)));
        assert!(result.is_err());
        assert!(seen.is_empty());
    }
}
