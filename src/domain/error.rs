//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Node;

/// Domain errors represent violations of the tree construction rules.
/// These are independent of configuration and output concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid node count: {nodes} (need at least 1)")]
    InvalidInput { nodes: usize },

    #[error("invalid degree cap: {cap} (need at least 2)")]
    InvalidDegreeCap { cap: usize },

    #[error("node not found: {0}")]
    NodeNotFound(Node),

    #[error("not a valid tree: {reason}")]
    InvalidTree { reason: String },
}

impl DomainError {
    pub fn invalid_tree(reason: impl Into<String>) -> Self {
        Self::InvalidTree {
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
