//! Graphviz DOT generation.
//!
//! This module converts a normalized call graph into a DOT document:
//! colors from fractions, attribute lists, the four document sections,
//! and the fixed document template.

pub mod attributes;
pub mod color;
pub mod config;
pub mod document;
pub mod generator;
pub mod label;
pub mod sections;

// Re-export main types
pub use color::{colorize_edge, colorize_node, edge_color, node_color, ColorScheme};
pub use config::{load_config, GraphvizConfig};
pub use generator::generate_dot;
