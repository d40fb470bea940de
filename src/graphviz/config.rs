//! Graphviz output configuration.
//!
//! Resolved once before rendering; values come from defaults, an optional
//! TOML file, and CLI overrides, in that order.

use crate::utils::config::{
    DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, DEFAULT_GROUP_BORDER_COLOR, DEFAULT_GROUP_FONT_SIZE,
    DEFAULT_NODE_LABEL, DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_FORMAT, DEFAULT_TOOL,
};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Graphviz output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphvizConfig {
    /// Graphviz tool to run, e.g. dot, neato
    pub tool: String,

    /// Final image written by the tool
    pub output_file: PathBuf,

    /// Format token passed as `-T<format>`
    pub output_format: String,

    pub font_name: String,
    pub font_size: u32,
    pub group_font_size: u32,
    pub group_border_color: String,

    /// Node label template (see `graphviz::label`)
    pub node_label: String,

    /// Appended to `node_label` when memory annotation is wanted
    pub memory_node_label: Option<String>,

    /// Nodes below this time fraction are drawn without a label
    pub time_filter: Option<f64>,

    /// Draw one cluster per group
    pub groups: bool,

    /// Color edges and label them with the call count
    pub edge_labels: bool,

    /// Directory for the transient DOT file (system temp dir if unset)
    pub temp_dir: Option<PathBuf>,

    /// Kill the tool after this many seconds
    pub timeout_secs: Option<u64>,
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            group_font_size: DEFAULT_GROUP_FONT_SIZE,
            group_border_color: DEFAULT_GROUP_BORDER_COLOR.to_string(),
            node_label: DEFAULT_NODE_LABEL.to_string(),
            memory_node_label: None,
            time_filter: None,
            groups: false,
            edge_labels: true,
            temp_dir: None,
            timeout_secs: None,
        }
    }
}

impl GraphvizConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = output_file.into();
        self
    }

    pub fn with_output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = output_format.into();
        self
    }

    pub fn with_groups(mut self, groups: bool) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_time_filter(mut self, time_filter: Option<f64>) -> Self {
        self.time_filter = time_filter;
        self
    }

    pub fn with_memory_label(mut self, memory_node_label: Option<String>) -> Self {
        self.memory_node_label = memory_node_label;
        self
    }

    pub fn with_edge_labels(mut self, edge_labels: bool) -> Self {
        self.edge_labels = edge_labels;
        self
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Load configuration from a TOML file
///
/// Missing keys keep their defaults.
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
///
/// # Example
/// ```ignore
/// let config = load_config("callgraph.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GraphvizConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GraphvizConfig = toml::from_str(&contents)?;
    Ok(config)
}
