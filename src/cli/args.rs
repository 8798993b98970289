//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::FrontierOrder;
use crate::infrastructure::render::RenderFormat;

/// Bounded-degree spanning tree construction and brute-force diameter search
#[derive(Parser, Debug)]
#[command(name = "ntree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, env = "NTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Number of nodes (labels 1..=N)
    #[arg(short, long, global = true)]
    pub nodes: Option<usize>,

    /// Maximum neighbors per node
    #[arg(long, global = true)]
    pub max_degree: Option<usize>,

    /// Frontier discipline: fifo (breadth-first) or lifo (depth-first)
    #[arg(long, global = true)]
    pub frontier: Option<FrontierOrder>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the tree and print the longest path per start node (default)
    Run {
        /// Render the tree before the report: none, edges, dot, tree
        #[arg(short, long)]
        render: Option<RenderFormat>,
    },

    /// Build the tree and render it
    Draw {
        /// Output format: edges, dot, tree (tree is limited to 1024 levels)
        #[arg(short, long, default_value = "tree")]
        format: RenderFormat,
    },

    /// Show shape statistics of the tree
    Info,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the global config file location
    Path,
    /// Print a commented config template
    Template,
}
