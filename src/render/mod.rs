//! Hand-off to the external Graphviz renderer.
//!
//! This module handles:
//! - Resolving the tool before any file is written
//! - Transient DOT files that never collide and are always removed
//! - Running the tool and surfacing its exit status

pub mod runner;
pub mod tool;

// Re-export main functions
pub use runner::{render_document, render_graph, render_graph_with_tool, RenderOutcome};
pub use tool::{ensure_tool, find_executable};
