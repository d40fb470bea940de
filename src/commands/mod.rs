//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod render;
pub mod utils;

// Re-export main command functions
pub use models::{RenderArgs, SourceArgs, StyleArgs};
pub use render::{execute_render, execute_source, generate_text_summary, validate_args, validate_config};
pub use utils::display_version;
