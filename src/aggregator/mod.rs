//! Aggregation of raw profile totals into a normalized call graph.
//!
//! This module transforms parsed profiles into:
//! - Nodes with fractions relative to the profile-wide maximum
//! - One edge per (caller, callee) pair
//! - Groups keyed by module prefix

pub mod call_graph;

// Re-export main types
pub use call_graph::{CallGraph, Caller, Fractions, ProfileEdge, ProfileNode, Stat};
