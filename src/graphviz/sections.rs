//! Section builders for the DOT document.
//!
//! Each builder returns the lines of one section in a stable order:
//! graph attributes in fixed category order, then groups, nodes and edges
//! in the call graph's insertion order.

use super::attributes::{escape, quote, render_attributes, Attributes};
use super::color::ColorScheme;
use super::config::GraphvizConfig;
use super::label::render_node_label;
use crate::aggregator::{CallGraph, ProfileNode};
use crate::utils::config::generated_by_caption;

/// Whole-graph, default-node and default-edge attribute lines
pub fn generate_attributes(config: &GraphvizConfig) -> Vec<String> {
    let font_name = escape(&config.font_name).into_owned();
    let font_size = config.font_size.to_string();

    let sections: [(&str, Attributes); 3] = [
        (
            "graph",
            vec![
                ("overlap", "scalexy".to_string()),
                ("fontname", font_name.clone()),
                ("fontsize", font_size.clone()),
                ("fontcolor", "0 0 0.5".to_string()),
                ("label", escape(&generated_by_caption()).into_owned()),
            ],
        ),
        (
            "node",
            vec![
                ("fontname", font_name.clone()),
                ("fontsize", font_size.clone()),
                ("color", ".5 0 .9".to_string()),
                ("style", "filled".to_string()),
                ("shape", "rect".to_string()),
            ],
        ),
        (
            "edge",
            vec![
                ("fontname", font_name),
                ("fontsize", font_size),
                ("color", "0 0 0".to_string()),
            ],
        ),
    ];

    sections
        .iter()
        .map(|(section, attrs)| format!("{} [ {} ];", section, render_attributes(attrs)))
        .collect()
}

/// One cluster per group; empty when grouping is off or there are no groups
pub fn generate_groups(graph: &CallGraph, config: &GraphvizConfig) -> Vec<String> {
    if !config.groups {
        return Vec::new();
    }

    graph
        .groups()
        .iter()
        .map(|(group, members)| {
            let members = members
                .iter()
                .map(|name| quote(name))
                .collect::<Vec<_>>()
                .join(" ");
            let group = escape(group);

            format!(
                "subgraph \"cluster_{group}\" {{ {members}; label = \"{group}\"; \
                 node [style=filled]; fontsize = \"{size}\"; fontcolor = \"black\"; \
                 color=\"{color}\"; }}",
                group = group,
                members = members,
                size = config.group_font_size,
                color = escape(&config.group_border_color),
            )
        })
        .collect()
}

/// One record per node, colored by `colors.node`
///
/// Nodes below the time filter keep their record and color but lose their
/// label, so every edge endpoint still exists.
pub fn generate_nodes(
    graph: &CallGraph,
    config: &GraphvizConfig,
    colors: &ColorScheme,
) -> Vec<String> {
    graph
        .nodes()
        .map(|node| {
            let color = escape(&(colors.node)(node)).into_owned();
            let mut attrs: Attributes = vec![("color", color)];
            if passes_time_filter(node, config) {
                attrs.push(("label", node_label(node, config)));
            }
            entry(&node.name, &attrs)
        })
        .collect()
}

/// One record per non-root edge
pub fn generate_edges(
    graph: &CallGraph,
    config: &GraphvizConfig,
    colors: &ColorScheme,
) -> Vec<String> {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let caller = edge.caller.name()?;
            let attrs: Attributes = if config.edge_labels {
                vec![
                    ("color", escape(&(colors.edge)(edge)).into_owned()),
                    ("label", edge.count.to_string()),
                ]
            } else {
                Vec::new()
            };

            Some(format!(
                "{} -> {} [{}];",
                quote(caller),
                quote(&edge.callee),
                render_attributes(&attrs)
            ))
        })
        .collect()
}

/// `"<key>" [<attrs>];`
pub fn entry(key: &str, attrs: &[(&str, String)]) -> String {
    format!("{} [{}];", quote(key), render_attributes(attrs))
}

fn passes_time_filter(node: &ProfileNode, config: &GraphvizConfig) -> bool {
    match config.time_filter {
        Some(cutoff) => node.time.fraction >= cutoff,
        None => true,
    }
}

fn node_label(node: &ProfileNode, config: &GraphvizConfig) -> String {
    let mut label = render_node_label(&config.node_label, node);
    if let Some(suffix) = &config.memory_node_label {
        label.push_str(&render_node_label(suffix, node));
    }
    label
}
