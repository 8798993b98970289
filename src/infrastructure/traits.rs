//! I/O boundary traits for testability
//!
//! The computational core never draws anything itself; it hands a node list
//! and an edge list to a renderer behind this trait.

use std::io::{self, Write};

use crate::domain::{Edge, Node};

/// Presentation collaborator for a built tree.
pub trait GraphRenderer: Send + Sync {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Render `nodes` and `edges` to `out`.
    ///
    /// Every edge is passed exactly once; nodes are in ascending order.
    fn render(&self, nodes: &[Node], edges: &[Edge], out: &mut dyn Write) -> io::Result<()>;
}
