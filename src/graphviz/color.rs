//! Fraction-to-color mapping.
//!
//! Colors are Graphviz HSV triples ("H S V", each in [0, 1]). Time counts
//! twice as much as call count, so time-dominant hot paths stand out.

use crate::aggregator::{Fractions, ProfileEdge, ProfileNode};

/// Brightness channel for nodes
pub const NODE_BRIGHTNESS: f64 = 0.9;

/// Brightness channel for edges, kept below nodes
pub const EDGE_BRIGHTNESS: f64 = 0.7;

/// Strategy for coloring a node
pub type NodeColorFn = fn(&ProfileNode) -> String;

/// Strategy for coloring an edge
pub type EdgeColorFn = fn(&ProfileEdge) -> String;

/// Node and edge color strategies handed to the section builders
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub node: NodeColorFn,
    pub edge: EdgeColorFn,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            node: colorize_node,
            edge: colorize_edge,
        }
    }
}

/// Weighted heat of a pair of fractions, in [0, 1] for in-range input
pub fn heat(fractions: Fractions) -> f64 {
    (fractions.time * 2.0 + fractions.calls) / 3.0
}

/// HSV triple for a node; fractions must already be in [0, 1]
pub fn node_color(fractions: Fractions) -> String {
    hsv(heat(fractions), NODE_BRIGHTNESS)
}

/// HSV triple for an edge; fractions must already be in [0, 1]
pub fn edge_color(fractions: Fractions) -> String {
    hsv(heat(fractions), EDGE_BRIGHTNESS)
}

pub fn colorize_node(node: &ProfileNode) -> String {
    node_color(node.fractions())
}

pub fn colorize_edge(edge: &ProfileEdge) -> String {
    edge_color(edge.fractions())
}

fn hsv(value: f64, brightness: f64) -> String {
    format!("{:.6} {:.6} {:.6}", value / 2.0 + 0.5, value, brightness)
}
