//! DOT document generation from a call graph.

use super::color::ColorScheme;
use super::config::GraphvizConfig;
use super::document::{assemble, Sections};
use super::sections::{generate_attributes, generate_edges, generate_groups, generate_nodes};
use crate::aggregator::CallGraph;
use crate::utils::error::GraphError;
use log::debug;

/// Generate the complete DOT document for a call graph
///
/// **Public** - main entry point for document generation
///
/// The graph is validated first; identical input yields byte-identical
/// output.
///
/// # Errors
/// * `GraphError::MalformedInput` - Fraction out of range, dangling edge, or
///   a time filter outside [0, 1]
///
/// # Example
/// ```ignore
/// let graph = CallGraph::from_profile(&profile, config.groups);
/// let dot = generate_dot(&graph, &config, &ColorScheme::default())?;
/// ```
pub fn generate_dot(
    graph: &CallGraph,
    config: &GraphvizConfig,
    colors: &ColorScheme,
) -> Result<String, GraphError> {
    graph.validate()?;
    check_time_filter(config)?;

    let sections = Sections {
        attributes: generate_attributes(config),
        groups: generate_groups(graph, config),
        nodes: generate_nodes(graph, config, colors),
        edges: generate_edges(graph, config, colors),
    };

    debug!(
        "Generated sections: {} groups, {} nodes, {} edges",
        sections.groups.len(),
        sections.nodes.len(),
        sections.edges.len()
    );

    let source = assemble(&sections);
    debug!("{}", source);

    Ok(source)
}

fn check_time_filter(config: &GraphvizConfig) -> Result<(), GraphError> {
    match config.time_filter {
        Some(cutoff) if !(0.0..=1.0).contains(&cutoff) => Err(GraphError::MalformedInput(
            format!("time filter is {}, expected a value in [0, 1]", cutoff),
        )),
        _ => Ok(()),
    }
}
