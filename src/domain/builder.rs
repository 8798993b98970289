//! Tree builder: grows a bounded-degree spanning tree by frontier expansion.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::entities::{AdjacencyMap, Node};
use crate::domain::error::{DomainError, DomainResult};

/// Default cap on the number of tree neighbors per node.
pub const DEFAULT_MAX_DEGREE: usize = 4;

/// Which end of the frontier is popped next.
///
/// Newly attached nodes are always pushed to the head. `Fifo` pops the tail,
/// giving breadth-first growth; `Lifo` pops the head, giving depth-first growth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontierOrder {
    #[default]
    Fifo,
    Lifo,
}

impl fmt::Display for FrontierOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontierOrder::Fifo => write!(f, "fifo"),
            FrontierOrder::Lifo => write!(f, "lifo"),
        }
    }
}

impl FromStr for FrontierOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" | "bfs" => Ok(FrontierOrder::Fifo),
            "lifo" | "dfs" => Ok(FrontierOrder::Lifo),
            other => Err(format!("unknown frontier order '{other}' (expected fifo or lifo)")),
        }
    }
}

/// Constructs spanning trees over `1..=N`.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    max_degree: usize,
    frontier: FrontierOrder,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_degree: DEFAULT_MAX_DEGREE,
            frontier: FrontierOrder::default(),
        }
    }

    pub fn with_max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = max_degree;
        self
    }

    pub fn with_frontier(mut self, frontier: FrontierOrder) -> Self {
        self.frontier = frontier;
        self
    }

    /// Build the spanning tree over `1..=n`, rooted at node 1.
    ///
    /// Each popped node scans candidates `1..=n` in ascending order and adopts
    /// every candidate not yet in the tree, stopping once it holds `max_degree`
    /// neighbors. A node enters the frontier only when it is first attached,
    /// so no node is ever expanded twice.
    #[instrument(level = "debug", skip(self), fields(max_degree = self.max_degree, frontier = %self.frontier))]
    pub fn build(&self, n: usize) -> DomainResult<AdjacencyMap> {
        if n < 1 {
            return Err(DomainError::InvalidInput { nodes: n });
        }
        if self.max_degree < 2 {
            return Err(DomainError::InvalidDegreeCap {
                cap: self.max_degree,
            });
        }

        let mut adj = AdjacencyMap::with_nodes(n);
        let mut frontier: VecDeque<Node> = VecDeque::from([1]);
        let mut in_tree: HashSet<Node> = HashSet::from([1]);

        while let Some(curr) = self.pop(&mut frontier) {
            trace!(node = curr, degree = adj.degree(curr), "expanding");
            for candidate in 1..=n {
                if in_tree.insert(candidate) {
                    adj.link(curr, candidate);
                    frontier.push_front(candidate);
                }
                if adj.degree(curr) >= self.max_degree {
                    break;
                }
            }
        }

        if in_tree.len() != n {
            return Err(DomainError::invalid_tree(format!(
                "expansion stopped after {} of {} nodes",
                in_tree.len(),
                n
            )));
        }
        debug!(nodes = n, edges = adj.edge_count(), "tree built");
        Ok(adj)
    }

    fn pop(&self, frontier: &mut VecDeque<Node>) -> Option<Node> {
        match self.frontier {
            FrontierOrder::Fifo => frontier.pop_back(),
            FrontierOrder::Lifo => frontier.pop_front(),
        }
    }
}
