//! Provide the dependency graph of reachable types.
//!
//! ## Menu
//!
//! - [`DependencyGraph`]: The set of reachable type identities, built by
//!   [`DependencyGraph::walk`] and combined by [`DependencyGraph::merge`].
//! - [`GraphNode`]: An identity and its direct dependencies.
//! - [`NodeId`]: The position of a node, shared with the compiled arena.

// -----------------------------------------------------------------------------
// Modules

mod dependency_graph;
mod node;

// -----------------------------------------------------------------------------
// Exports

pub use dependency_graph::DependencyGraph;
pub use node::{GraphNode, NodeId};
