//! Text renderers for the presenter boundary.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::instrument;

use crate::domain::{AdjacencyMap, Edge, Node, TreeArena};
use crate::infrastructure::traits::GraphRenderer;

/// Selectable renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Render nothing
    #[default]
    None,
    /// One `a b` line per edge
    Edges,
    /// Graphviz undirected graph
    Dot,
    /// Indented hierarchy rooted at the first node
    Tree,
}

impl RenderFormat {
    pub fn renderer(self) -> Arc<dyn GraphRenderer> {
        match self {
            RenderFormat::None => Arc::new(NullRenderer),
            RenderFormat::Edges => Arc::new(EdgeListRenderer),
            RenderFormat::Dot => Arc::new(DotRenderer::default()),
            RenderFormat::Tree => Arc::new(TermTreeRenderer),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenderFormat::None => "none",
            RenderFormat::Edges => "edges",
            RenderFormat::Dot => "dot",
            RenderFormat::Tree => "tree",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(RenderFormat::None),
            "edges" => Ok(RenderFormat::Edges),
            "dot" | "graphviz" => Ok(RenderFormat::Dot),
            "tree" => Ok(RenderFormat::Tree),
            other => Err(format!(
                "unknown render format '{other}' (expected none, edges, dot or tree)"
            )),
        }
    }
}

/// Discards its input.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl GraphRenderer for NullRenderer {
    fn name(&self) -> &'static str {
        "none"
    }

    fn render(&self, _nodes: &[Node], _edges: &[Edge], _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

/// Plain edge list.
#[derive(Debug, Default)]
pub struct EdgeListRenderer;

impl GraphRenderer for EdgeListRenderer {
    fn name(&self) -> &'static str {
        "edges"
    }

    fn render(&self, _nodes: &[Node], edges: &[Edge], out: &mut dyn Write) -> io::Result<()> {
        for edge in edges {
            writeln!(out, "{edge}")?;
        }
        Ok(())
    }
}

/// Graphviz `graph` document.
#[derive(Debug)]
pub struct DotRenderer {
    pub graph_name: String,
    pub fill_color: String,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            graph_name: "tree".to_string(),
            fill_color: "skyblue".to_string(),
        }
    }
}

impl GraphRenderer for DotRenderer {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn render(&self, nodes: &[Node], edges: &[Edge], out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "graph {} {{", self.graph_name)?;
        writeln!(
            out,
            "  node [shape=circle, style=filled, fillcolor=\"{}\", fontname=\"Helvetica-Bold\"];",
            self.fill_color
        )?;
        for node in nodes {
            writeln!(out, "  {node};")?;
        }
        for edge in edges {
            writeln!(out, "  {} -- {};", edge.a, edge.b)?;
        }
        writeln!(out, "}}")
    }
}

/// Deepest hierarchy the `tree` renderer accepts. `termtree` nests one
/// `Tree` per level and drops it recursively, so path-like trees beyond this
/// depth have to use `edges` or `dot`.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Hierarchy drawn with box characters, rooted at the first node.
#[derive(Debug, Default)]
pub struct TermTreeRenderer;

impl GraphRenderer for TermTreeRenderer {
    fn name(&self) -> &'static str {
        "tree"
    }

    #[instrument(level = "debug", skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    fn render(&self, nodes: &[Node], edges: &[Edge], out: &mut dyn Write) -> io::Result<()> {
        let Some(&root) = nodes.first() else {
            return Ok(());
        };
        let adj = AdjacencyMap::from_edges(nodes.len(), edges).map_err(invalid_data)?;
        let arena = TreeArena::from_adjacency(&adj, root).map_err(invalid_data)?;
        let depth = arena.depth();
        if depth > MAX_TREE_DEPTH {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("tree depth {depth} exceeds {MAX_TREE_DEPTH}, use the edges or dot format"),
            ));
        }
        write!(out, "{}", arena.to_tree_string())
    }
}

fn invalid_data(e: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Conversion of a rooted tree into a printable `termtree::Tree`.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena {
    /// Assembles subtrees bottom-up in reverse pre-order, so every child is
    /// complete before its parent takes it.
    fn to_tree_string(&self) -> Tree<String> {
        let order: Vec<Index> = self.iter().map(|(idx, _)| idx).collect();
        let mut built: HashMap<Index, Tree<String>> = HashMap::new();

        for &idx in order.iter().rev() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            let mut tree = Tree::new(node.data.to_string());
            for child in &node.children {
                if let Some(subtree) = built.remove(child) {
                    tree.push(subtree);
                }
            }
            built.insert(idx, tree);
        }

        self.root()
            .and_then(|root| built.remove(&root))
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}
