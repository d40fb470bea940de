//! DOT source writer.
//!
//! Writes the generated document as-is, for users who want the source
//! instead of an image.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write DOT source to a file
///
/// **Public** - main entry point for source output
///
/// # Arguments
/// * `document` - DOT document from `generate_dot`
/// * `output_path` - Path to output file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
///
/// # Example
/// ```ignore
/// let dot = generate_dot(&graph, &config, &ColorScheme::default())?;
/// write_dot(&dot, "callgraph.dot")?;
/// ```
pub fn write_dot(document: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing DOT source to: {}", output_path.display());

    super::prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document.as_bytes())?;
    writer.flush()?;

    if output_path.extension().map_or(true, |ext| ext != "dot" && ext != "gv") {
        debug!(
            "Warning: File does not have a .dot or .gv extension: {}",
            output_path.display()
        );
    }

    info!("DOT source written successfully ({} bytes)", document.len());

    Ok(())
}
