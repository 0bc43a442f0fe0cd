//! Domain layer: the org-unit tree and its entities
//!
//! This layer is independent of external concerns (no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;

pub use arena::{DescribeIter, EntityId, OrgTree};
pub use builder::{EntitySpec, OrgChart, OrgChartBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
