//! CLI logic for the cellname tool.
//!
//! This module contains the core CLI logic: load the configuration, assign
//! identifiers to the input document, and write the result.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::info;

use cellname::{Assignment, CellnameError, IdAssigner, write_svg};

/// What a successful run produced.
#[derive(Debug)]
pub enum Outcome {
    /// The transformed document was written to this path.
    Written(PathBuf),
    /// Nothing was written; these identifiers would have been assigned.
    DryRun(Vec<Assignment>),
}

/// Run the cellname CLI application
///
/// This function assigns identifiers to the cells of the input document and
/// writes the transformed SVG to the output path, unless `dry_run` is set.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CellnameError` for:
/// - Configuration loading errors
/// - A missing input file
/// - Malformed documents
/// - File I/O errors
pub fn run(args: &Args) -> Result<Outcome, CellnameError> {
    let output = args.output_path();
    info!(
        input_path = args.input,
        output_path = output.display().to_string();
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Assign identifiers
    let assigner = IdAssigner::new(app_config);
    let transformed = assigner.assign_file(Path::new(&args.input))?;

    if args.dry_run {
        info!(assigned = transformed.assignments().len(); "Dry run, nothing written");
        return Ok(Outcome::DryRun(transformed.assignments().to_vec()));
    }

    // Write output file
    let assigned = transformed.assignments().len();
    write_svg(&output, &transformed.into_svg())?;

    info!(
        output_file = output.display().to_string(),
        assigned;
        "SVG exported successfully"
    );

    Ok(Outcome::Written(output))
}
