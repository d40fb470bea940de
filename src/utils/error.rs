//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading a profile input file
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Errors that can occur while generating the graph document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Errors that can occur while handing the document to the external renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Tool \"{0}\" was not found on the search path")]
    ToolNotFound(String),

    #[error("The command \"{command}\" failed with {}", describe_code(*.code))]
    RenderToolFailure { command: String, code: Option<i32> },

    #[error("The command \"{command}\" did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error(transparent)]
    MalformedInput(#[from] GraphError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("error code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),
}
