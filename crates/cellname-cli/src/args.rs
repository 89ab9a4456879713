//! Command-line argument definitions for the cellname CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, dry runs, and logging verbosity.

use std::path::{Path, PathBuf};

use clap::Parser;

use cellname::default_output_path;

/// Command-line arguments for the cellname tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input SVG file
    #[arg(help = "Path to the input SVG file")]
    pub input: String,

    /// Path to the output SVG file; defaults to the input path with an `.svg` extension
    #[arg(help = "Path to the output SVG file [default: <INPUT> with .svg extension]")]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the identifiers that would be assigned without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The path the transformed document is written to.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => default_output_path(Path::new(&self.input)),
        }
    }
}
