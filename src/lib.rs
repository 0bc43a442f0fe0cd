//! orgtree: the composite pattern applied to an organization chart.
//!
//! Leaves and managers live in one arena-backed [`domain::OrgTree`] and are
//! described uniformly by a pre-order traversal.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod render;
pub mod scenario;
pub mod tree_traits;
pub mod util;
