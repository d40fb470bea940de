//! Callgraph Viz CLI
//!
//! Renders call-graph profiles into Graphviz documents and images.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use callgraph_viz::commands::{
    display_version, execute_render, execute_source, validate_args, validate_config, RenderArgs,
    SourceArgs, StyleArgs,
};

/// Callgraph Viz - Graphviz output for call-graph profiles
#[derive(Parser, Debug)]
#[command(name = "callgraph-viz")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a profile to an image with Graphviz
    Render {
        /// Profile JSON to render
        #[arg(short, long)]
        input: PathBuf,

        /// The generated image file
        #[arg(short, long)]
        output_file: Option<PathBuf>,

        /// Print the hottest functions to stdout
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Write the DOT source without running Graphviz
    Source {
        /// Profile JSON to render
        #[arg(short, long)]
        input: PathBuf,

        /// Where the DOT source goes
        #[arg(short, long, default_value = "callgraph.dot")]
        output: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output_file,
            summary,
            style,
        } => {
            let mut config = style.resolve()?;
            if let Some(output_file) = output_file {
                config.output_file = output_file;
            }

            let args = RenderArgs {
                input,
                config,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(&args)?;
        }

        Commands::Source {
            input,
            output,
            style,
        } => {
            let config = style.resolve()?;
            validate_config(&config)?;

            execute_source(&SourceArgs {
                input,
                output,
                config,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
