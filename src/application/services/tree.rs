//! Tree service
//!
//! Builds the spanning tree, hands it to the renderer and reports the
//! longest path per start node.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{AdjacencyMap, DiameterFinder, DiameterReport, Node, TreeArena, TreeBuilder};
use crate::infrastructure::traits::GraphRenderer;

/// Output of a full run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub tree: AdjacencyMap,
    pub report: DiameterReport,
}

/// Shape statistics of a built tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub nodes: usize,
    pub edges: usize,
    pub max_degree: usize,
    /// Levels when rooted at node 1
    pub depth: usize,
    pub leaves: usize,
    pub diameter: usize,
    /// Nodes at which a longest path starts
    pub peripheral: Vec<Node>,
}

/// Service for building and analysing bounded-degree trees.
pub struct TreeService {
    settings: Settings,
    renderer: Arc<dyn GraphRenderer>,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(settings: Settings, renderer: Arc<dyn GraphRenderer>) -> Self {
        Self { settings, renderer }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn builder(&self) -> TreeBuilder {
        TreeBuilder::new()
            .with_max_degree(self.settings.max_degree)
            .with_frontier(self.settings.frontier)
    }

    /// Build the tree and check its invariants.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self) -> ApplicationResult<AdjacencyMap> {
        let adj = self.builder().build(self.settings.nodes)?;
        adj.validate(self.settings.max_degree)?;
        debug!(
            "build: {} nodes, {} edges, max degree {}",
            adj.len(),
            adj.edge_count(),
            adj.max_degree()
        );
        Ok(adj)
    }

    /// Pass the tree to the renderer as a node list and an edge list.
    pub fn present(&self, adj: &AdjacencyMap, out: &mut dyn Write) -> ApplicationResult<()> {
        let (nodes, edges) = adj.nodes_and_edges();
        debug!("present: renderer={}", self.renderer.name());
        self.renderer
            .render(&nodes, &edges, out)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("render graph as {}: {e}", self.renderer.name()),
                source: Box::new(e),
            })
    }

    /// Build, render, then print `<start> <length>` per node followed by the
    /// overall longest path length.
    #[instrument(level = "debug", skip(self, out))]
    pub fn run(&self, out: &mut dyn Write) -> ApplicationResult<RunOutput> {
        let tree = self.build()?;
        self.present(&tree, out)?;

        let mut write_err: Option<io::Error> = None;
        let report = DiameterFinder::new(&tree).longest_path_with(|start, height| {
            if write_err.is_none() {
                if let Err(e) = writeln!(out, "{start} {height}") {
                    write_err = Some(e);
                }
            }
        })?;
        if let Some(e) = write_err {
            return Err(e).with_context("write report");
        }
        writeln!(out, "{}", report.longest).with_context("write report")?;

        info!("longest path: {} edges", report.longest);
        Ok(RunOutput { tree, report })
    }

    /// Build and render only.
    pub fn draw(&self, out: &mut dyn Write) -> ApplicationResult<AdjacencyMap> {
        let tree = self.build()?;
        self.present(&tree, out)?;
        Ok(tree)
    }

    /// Shape statistics for the configured tree.
    #[instrument(level = "debug", skip(self))]
    pub fn summary(&self) -> ApplicationResult<TreeSummary> {
        let tree = self.build()?;
        let rooted = TreeArena::from_adjacency(&tree, 1)?;
        let report = DiameterFinder::new(&tree).longest_path()?;
        Ok(TreeSummary {
            nodes: tree.len(),
            edges: tree.edge_count(),
            max_degree: tree.max_degree(),
            depth: rooted.depth(),
            leaves: rooted.leaf_nodes().len(),
            diameter: report.longest,
            peripheral: report.peripheral(),
        })
    }
}
