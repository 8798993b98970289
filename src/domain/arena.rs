//! Rooted view of an adjacency map, stored in a generational arena.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{AdjacencyMap, Node};
use crate::domain::error::{DomainError, DomainResult};

/// Data payload for a rooted tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    /// Node id in the adjacency map
    pub id: Node,
    /// Edge distance from the root
    pub level: usize,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Tree node in the arena-based hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in adjacency order
    pub children: Vec<Index>,
}

/// Arena-based rooted tree.
///
/// Built from an [`AdjacencyMap`] by orienting every edge away from the root.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Orient `adj` away from `root`.
    ///
    /// Fails with `InvalidTree` if a node is reached twice (the map has a
    /// cycle), and with `NodeNotFound` for an unknown root.
    #[instrument(level = "debug", skip(adj))]
    pub fn from_adjacency(adj: &AdjacencyMap, root: Node) -> DomainResult<Self> {
        if !adj.contains(root) {
            return Err(DomainError::NodeNotFound(root));
        }

        let mut tree = TreeArena::new();
        let mut placed: HashMap<Node, Index> = HashMap::new();
        let root_idx = tree.insert_node(NodeData { id: root, level: 0 }, None);
        placed.insert(root, root_idx);

        let mut stack = vec![(root, None::<Node>, root_idx)];
        while let Some((curr, parent, curr_idx)) = stack.pop() {
            let level = tree.get_node(curr_idx).map_or(0, |n| n.data.level);
            let nbrs = adj.neighbors(curr).ok_or(DomainError::NodeNotFound(curr))?;
            let mut pending = Vec::new();
            for &nbr in nbrs.iter().filter(|&&nbr| Some(nbr) != parent) {
                if placed.contains_key(&nbr) {
                    return Err(DomainError::invalid_tree(format!(
                        "node {nbr} reached twice from root {root}"
                    )));
                }
                let idx = tree.insert_node(
                    NodeData {
                        id: nbr,
                        level: level + 1,
                    },
                    Some(curr_idx),
                );
                placed.insert(nbr, idx);
                pending.push((nbr, Some(curr), idx));
            }
            // reversed so siblings are expanded in adjacency order
            stack.extend(pending.into_iter().rev());
        }
        Ok(tree)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal, children left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of levels; a single root has depth 1, an empty tree 0.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter()
            .map(|(_, node)| node.data.level + 1)
            .max()
            .unwrap_or(0)
    }

    /// Ids of nodes without children, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<Node> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.data.id)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.arena.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}
