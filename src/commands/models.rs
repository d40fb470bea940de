use crate::graphviz::{load_config, GraphvizConfig};
use crate::utils::config::DEFAULT_MEMORY_NODE_LABEL;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Profile JSON to render
    pub input: PathBuf,

    /// Resolved Graphviz configuration
    pub config: GraphvizConfig,

    /// Print the hottest functions to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("profile.json"),
            config: GraphvizConfig::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the source command
#[derive(Debug, Clone)]
pub struct SourceArgs {
    /// Profile JSON to render
    pub input: PathBuf,

    /// Where the DOT source goes
    pub output: PathBuf,

    /// Resolved Graphviz configuration
    pub config: GraphvizConfig,
}

/// Styling flags shared by `render` and `source`
///
/// Every flag is optional; unset flags keep the value from `--config` or
/// the built-in default.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// TOML file with Graphviz settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// The tool from Graphviz to use, e.g. dot, neato
    #[arg(short, long)]
    pub tool: Option<String>,

    /// Image format to produce, e.g. png, svg, ps
    #[arg(short = 'f', long)]
    pub output_format: Option<String>,

    /// Name of the font to be used
    #[arg(long)]
    pub font_name: Option<String>,

    /// Size of the font to be used
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Font size of group labels
    #[arg(long)]
    pub group_font_size: Option<u32>,

    /// Border color of group clusters (HSV triple)
    #[arg(long)]
    pub group_border_color: Option<String>,

    /// Node label template
    #[arg(long)]
    pub node_label: Option<String>,

    /// Cluster functions by module
    #[arg(long)]
    pub groups: bool,

    /// Add memory in/out to node labels
    #[arg(long)]
    pub memory: bool,

    /// Hide labels of nodes below this time fraction
    #[arg(long)]
    pub time_filter: Option<f64>,

    /// Render edges without color or call-count labels
    #[arg(long)]
    pub no_edge_labels: bool,

    /// Kill the renderer after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl StyleArgs {
    /// Merge defaults, the config file and CLI flags
    ///
    /// **Public** - used by main.rs before dispatching a command
    pub fn resolve(&self) -> Result<GraphvizConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GraphvizConfig::default(),
        };

        if let Some(tool) = &self.tool {
            config.tool = tool.clone();
        }
        if let Some(format) = &self.output_format {
            config.output_format = format.clone();
        }
        if let Some(font_name) = &self.font_name {
            config.font_name = font_name.clone();
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
        if let Some(size) = self.group_font_size {
            config.group_font_size = size;
        }
        if let Some(color) = &self.group_border_color {
            config.group_border_color = color.clone();
        }
        if let Some(label) = &self.node_label {
            config.node_label = label.clone();
        }
        if self.groups {
            config.groups = true;
        }
        if self.memory && config.memory_node_label.is_none() {
            config.memory_node_label = Some(DEFAULT_MEMORY_NODE_LABEL.to_string());
        }
        if self.time_filter.is_some() {
            config.time_filter = self.time_filter;
        }
        if self.no_edge_labels {
            config.edge_labels = false;
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }

        Ok(config)
    }
}
