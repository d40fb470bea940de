//! Pre-flight lookup of the Graphviz tool.

use crate::utils::error::RenderError;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// Resolve a tool name to an executable
///
/// Names containing a path separator are checked as-is; bare names are
/// searched on `PATH`.
pub fn find_executable(tool: &str) -> Option<PathBuf> {
    if tool.is_empty() {
        return None;
    }

    let candidate = Path::new(tool);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| executable_names(tool).map(move |name| dir.join(name)))
        .find(|path| is_executable(path))
}

/// Fail with `ToolNotFound` unless `tool` resolves to an executable
pub fn ensure_tool(tool: &str) -> Result<PathBuf, RenderError> {
    let path = find_executable(tool).ok_or_else(|| RenderError::ToolNotFound(tool.to_string()))?;
    debug!("Resolved tool {} to {}", tool, path.display());
    Ok(path)
}

#[cfg(unix)]
fn executable_names(tool: &str) -> impl Iterator<Item = String> {
    std::iter::once(tool.to_string())
}

#[cfg(not(unix))]
fn executable_names(tool: &str) -> impl Iterator<Item = String> {
    [tool.to_string(), format!("{}.exe", tool)].into_iter()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
