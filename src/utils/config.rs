//! Configuration defaults and constants.

/// Graphviz layout tool used when none is configured
pub const DEFAULT_TOOL: &str = "dot";

/// Image produced when no output path is configured
pub const DEFAULT_OUTPUT_FILE: &str = "callgraph.png";

/// Output format token passed as `-T<format>`
pub const DEFAULT_OUTPUT_FORMAT: &str = "png";

pub const DEFAULT_FONT_NAME: &str = "Verdana";
pub const DEFAULT_FONT_SIZE: u32 = 7;
pub const DEFAULT_GROUP_FONT_SIZE: u32 = 10;

/// Cluster border color (hue saturation value)
pub const DEFAULT_GROUP_BORDER_COLOR: &str = ".5 0 .9";

/// Node label template; `\n` is a Graphviz line break, not a Rust escape
pub const DEFAULT_NODE_LABEL: &str = r"{func}\ncalls: {hits}\ntotal time: {total_time}";

/// Appended to node labels when memory annotation is enabled
pub const DEFAULT_MEMORY_NODE_LABEL: &str =
    r"\nmemory in: {total_memory_in}\nmemory out: {total_memory_out}";

/// Prefix for transient DOT files
pub const TEMP_FILE_PREFIX: &str = "callgraph-";
pub const TEMP_FILE_SUFFIX: &str = ".dot";

/// Caption embedded in the whole-graph label
pub fn generated_by_caption() -> String {
    format!(
        "Generated by {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}
