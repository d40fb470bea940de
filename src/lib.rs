//! Callgraph Viz
//!
//! Renders call-graph profiles (which functions called which, how often,
//! and how much time and memory each consumed) into Graphviz DOT documents,
//! then hands them to a Graphviz tool to produce an image.
//!
//! ## Getting Started
//!
//! ```ignore
//! use callgraph_viz::aggregator::CallGraph;
//! use callgraph_viz::graphviz::{ColorScheme, GraphvizConfig};
//! use callgraph_viz::parser::read_profile;
//! use callgraph_viz::render::render_graph;
//!
//! let profile = read_profile("profile.json")?;
//! let config = GraphvizConfig::default().with_output_file("callgraph.png");
//! let graph = CallGraph::from_profile(&profile, config.groups);
//! render_graph(&graph, &config, &ColorScheme::default())?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod graphviz;
pub mod output;
pub mod parser;
pub mod render;
pub mod utils;
