//! Render orchestration.
//!
//! Writes the DOT document to a uniquely named transient file, runs
//! `<tool> -T<format> -o<output> <file>` as an argument vector, and removes
//! the transient file on every exit path.

use super::tool::ensure_tool;
use crate::aggregator::CallGraph;
use crate::graphviz::{generate_dot, ColorScheme, GraphvizConfig};
use crate::output::prepare_output_path;
use crate::utils::config::{TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use crate::utils::error::RenderError;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::{Builder, NamedTempFile};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Result of a successful render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    /// Image produced by the tool
    pub output_file: PathBuf,

    /// Nodes in the rendered graph
    pub node_count: usize,
}

/// Generate and render a call graph
///
/// **Public** - main entry point for image output
///
/// The tool is resolved before anything is generated or written.
///
/// # Errors
/// * `RenderError::ToolNotFound` - Tool not on the search path
/// * `RenderError::MalformedInput` - Graph failed validation
/// * `RenderError::RenderToolFailure` - Tool exited with a non-zero status
/// * `RenderError::Timeout` - Tool exceeded the configured timeout
pub fn render_graph(
    graph: &CallGraph,
    config: &GraphvizConfig,
    colors: &ColorScheme,
) -> Result<RenderOutcome, RenderError> {
    let tool_path = ensure_tool(&config.tool)?;
    render_graph_with_tool(&tool_path, graph, config, colors)
}

/// Generate and render with a tool already resolved by `ensure_tool`
///
/// `config.tool` is only used for the logged command line.
pub fn render_graph_with_tool(
    tool_path: &Path,
    graph: &CallGraph,
    config: &GraphvizConfig,
    colors: &ColorScheme,
) -> Result<RenderOutcome, RenderError> {
    let source = generate_dot(graph, config, colors)?;
    run_tool(tool_path, &source, graph.node_count(), config)
}

/// Render an already generated document
///
/// # Example
/// ```ignore
/// let dot = generate_dot(&graph, &config, &ColorScheme::default())?;
/// let outcome = render_document(&dot, graph.node_count(), &config)?;
/// ```
pub fn render_document(
    document: &str,
    node_count: usize,
    config: &GraphvizConfig,
) -> Result<RenderOutcome, RenderError> {
    let tool_path = ensure_tool(&config.tool)?;
    run_tool(&tool_path, document, node_count, config)
}

fn run_tool(
    tool_path: &Path,
    document: &str,
    node_count: usize,
    config: &GraphvizConfig,
) -> Result<RenderOutcome, RenderError> {
    prepare_output_path(&config.output_file)?;

    // Dropping the handle on an early return also removes the file
    let mut temp = create_temp_file(config)?;
    temp.write_all(document.as_bytes())?;
    temp.flush()?;
    debug!(
        "Wrote {} bytes of DOT source to {}",
        document.len(),
        temp.path().display()
    );

    let result = invoke(tool_path, temp.path(), config);

    let temp_path = temp.path().to_path_buf();
    if let Err(e) = temp.close() {
        warn!("Failed to remove {}: {}", temp_path.display(), e);
    }

    result?;

    info!(
        "Generated {} with {} nodes.",
        config.output_file.display(),
        node_count
    );

    Ok(RenderOutcome {
        output_file: config.output_file.clone(),
        node_count,
    })
}

fn create_temp_file(config: &GraphvizConfig) -> Result<NamedTempFile, RenderError> {
    let mut builder = Builder::new();
    builder.prefix(TEMP_FILE_PREFIX).suffix(TEMP_FILE_SUFFIX);

    let file = match &config.temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    Ok(file)
}

fn invoke(tool_path: &Path, input: &Path, config: &GraphvizConfig) -> Result<(), RenderError> {
    let format_flag = format!("-T{}", config.output_format);
    let mut output_flag = OsString::from("-o");
    output_flag.push(&config.output_file);

    let command_line = format!(
        "{} {} {} {}",
        config.tool,
        format_flag,
        output_flag.to_string_lossy(),
        input.display()
    );
    info!("Running: {}", command_line);

    let mut command = Command::new(tool_path);
    command.arg(&format_flag).arg(&output_flag).arg(input);

    let status = match config.timeout() {
        Some(timeout) => wait_with_timeout(command.spawn()?, timeout, &command_line)?,
        None => command.status()?,
    };

    if !status.success() {
        return Err(RenderError::RenderToolFailure {
            command: command_line,
            code: status.code(),
        });
    }

    Ok(())
}

fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
    command_line: &str,
) -> Result<ExitStatus, RenderError> {
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if Instant::now() >= deadline {
            warn!("Killing \"{}\" after {:?}", command_line, timeout);
            if let Err(e) = child.kill() {
                warn!("Failed to kill renderer: {}", e);
            }
            if let Err(e) = child.wait() {
                warn!("Failed to reap renderer: {}", e);
            }
            return Err(RenderError::Timeout {
                command: command_line.to_string(),
                timeout,
            });
        }

        thread::sleep(POLL_INTERVAL);
    }
}
