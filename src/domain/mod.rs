//! Domain layer: entities and tree algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod diameter;
pub mod entities;
pub mod error;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::{FrontierOrder, TreeBuilder, DEFAULT_MAX_DEGREE};
pub use diameter::{longest_path, DiameterFinder, DiameterReport};
pub use entities::*;
pub use error::{DomainError, DomainResult};
