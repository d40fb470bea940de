//! Render and source command implementations.
//!
//! The render command:
//! 1. Reads the profile JSON
//! 2. Builds the normalized call graph
//! 3. Generates the DOT document
//! 4. Runs the Graphviz tool

use super::models::{RenderArgs, SourceArgs};
use crate::aggregator::CallGraph;
use crate::graphviz::label::{format_hits, format_time, format_value};
use crate::graphviz::{generate_dot, ColorScheme, GraphvizConfig};
use crate::output::write_dot;
use crate::parser::read_profile;
use crate::render::{ensure_tool, render_graph_with_tool, RenderOutcome};
use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::path::Path;
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Profile read or validation failures
/// * Tool missing from the search path
/// * Non-zero exit from the tool
pub fn execute_render(args: &RenderArgs) -> Result<RenderOutcome> {
    let start_time = Instant::now();

    // Fail before reading anything if the tool is missing
    let tool_path = ensure_tool(&args.config.tool)
        .with_context(|| format!("Cannot render with {}", args.config.tool))?;

    info!("Step 1/3: Reading profile...");
    let graph = load_graph(&args.input, &args.config)?;

    info!("Step 2/3: Generating and rendering graph...");
    let outcome =
        render_graph_with_tool(&tool_path, &graph, &args.config, &ColorScheme::default())
            .context("Failed to render call graph")?;

    info!("Step 3/3: Done");

    if args.print_summary {
        println!("\n{}", generate_text_summary(&graph, 10));
    }

    println!(
        "✓ Generated {} with {} nodes",
        outcome.output_file.display().to_string().cyan(),
        outcome.node_count
    );

    info!(
        "Render completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(outcome)
}

/// Execute the source command
///
/// **Public** - writes the DOT document without running a tool
pub fn execute_source(args: &SourceArgs) -> Result<()> {
    let graph = load_graph(&args.input, &args.config)?;

    let document = generate_dot(&graph, &args.config, &ColorScheme::default())
        .context("Failed to generate DOT source")?;

    write_dot(&document, &args.output).context("Failed to write DOT source")?;

    println!(
        "✓ DOT source written to {}",
        args.output.display().to_string().cyan()
    );

    Ok(())
}

fn load_graph(input: &Path, config: &GraphvizConfig) -> Result<CallGraph> {
    let profile = read_profile(input)
        .with_context(|| format!("Failed to read profile {}", input.display()))?;
    Ok(CallGraph::from_profile(&profile, config.groups))
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    validate_config(&args.config)?;

    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input profile path cannot be empty");
    }

    Ok(())
}

/// Validate a resolved configuration
pub fn validate_config(config: &GraphvizConfig) -> Result<()> {
    if config.tool.trim().is_empty() {
        anyhow::bail!("Tool name cannot be empty");
    }

    if config.output_format.is_empty()
        || !config
            .output_format
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ':' || c == '_')
    {
        anyhow::bail!("Invalid output format: {:?}", config.output_format);
    }

    if config.font_size == 0 || config.group_font_size == 0 {
        anyhow::bail!("Font sizes must be greater than 0");
    }

    if let Some(cutoff) = config.time_filter {
        if !(0.0..=1.0).contains(&cutoff) {
            anyhow::bail!("time_filter must be between 0 and 1, got {}", cutoff);
        }
    }

    if config.timeout_secs == Some(0) {
        anyhow::bail!("timeout must be greater than 0 seconds");
    }

    Ok(())
}

/// Table of the hottest functions by time fraction
pub fn generate_text_summary(graph: &CallGraph, max_lines: usize) -> String {
    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort_by(|a, b| b.time.fraction.total_cmp(&a.time.fraction));

    let mut lines = Vec::new();
    lines.push(format!(
        "  {:<48} {:>10} {:>14} {:>7}",
        "Function (Hottest First)", "CALLS", "TIME (s)", "%"
    ));
    lines.push(format!("  {}", "-".repeat(82)));

    for node in nodes.iter().take(max_lines) {
        let name = if node.name.chars().count() > 48 {
            let tail: String = node
                .name
                .chars()
                .rev()
                .take(45)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{}", tail)
        } else {
            node.name.clone()
        };

        lines.push(format!(
            "  {:<48} {:>10} {:>14} {:>6.1}%",
            name,
            format_value(node.calls.value, format_hits),
            format_value(node.time.value, format_time),
            node.time.fraction * 100.0
        ));
    }

    if graph.node_count() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} functions)",
            max_lines,
            graph.node_count()
        ));
    }

    lines.join("\n")
}
