//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent violations of the org-tree invariants.
/// Removing a child that is not attached is not one of them: that is a no-op.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("cycle detected: '{child}' is '{parent}' or one of its ancestors")]
    CycleDetected { parent: String, child: String },

    #[error("invalid reference: entity handle does not belong to this tree or was released")]
    InvalidReference,

    #[error("'{0}' is a leaf and cannot have subordinates")]
    NotComposite(String),

    #[error("'{name}' is still attached to {parents} composite(s)")]
    StillAttached { name: String, parents: usize },

    #[error("invalid org chart: {message}")]
    InvalidOrgChart { message: String },

    #[error("unknown entity key in org chart: {0}")]
    UnknownEntity(String),

    #[error("cannot read org chart {path}: {source}")]
    ChartRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
