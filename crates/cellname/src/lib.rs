//! Cellname - readable identifiers for exported diagram shapes.
//!
//! Diagram editors such as draw.io export every shape as an SVG `<g>` element
//! tagged with an opaque `data-cell-id`. Cellname derives a stable `id` for
//! each of those groups from the text drawn inside it, so stylesheets and
//! scripts can refer to `#testosterone` rather than to a generated cell number.

pub mod config;
pub mod document;

mod error;

pub use cellname_core::{identifier, slug};

pub use document::{Assignment, Transformed};
pub use error::CellnameError;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use tempfile::NamedTempFile;

use config::AppConfig;

/// Assigns identifiers to the labelled shapes of SVG diagrams.
///
/// # Examples
///
/// ```
/// use cellname::{IdAssigner, config::AppConfig};
///
/// let source = r#"<svg xmlns="http://www.w3.org/2000/svg">
///     <g data-cell-id="2"><text>Step 1: Activation</text></g>
/// </svg>"#;
///
/// let assigner = IdAssigner::new(AppConfig::default());
/// let transformed = assigner.assign(source).expect("Failed to assign ids");
///
/// assert_eq!(transformed.assignments()[0].id(), "step_1");
/// assert!(transformed.svg().contains(r#"<g id="step_1" data-cell-id="2">"#));
/// ```
#[derive(Debug, Default)]
pub struct IdAssigner {
    config: AppConfig,
}

impl IdAssigner {
    /// Create a new assigner with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Assign identifiers to the unnamed cells of an SVG document.
    ///
    /// # Arguments
    ///
    /// * `source` - The SVG document text
    ///
    /// # Errors
    ///
    /// Returns [`CellnameError::Parse`] if `source` is not well-formed XML.
    pub fn assign(&self, source: &str) -> Result<Transformed, CellnameError> {
        info!("Assigning identifiers");

        let transformed = document::assign_ids(source, &self.config)?;

        debug!(assigned = transformed.assignments().len(); "Identifiers assigned");

        Ok(transformed)
    }

    /// Read `input` and assign identifiers to its unnamed cells.
    ///
    /// # Errors
    ///
    /// Returns [`CellnameError::MissingInput`] if `input` does not exist,
    /// before anything is read, and otherwise the errors of [`Self::assign`]
    /// or of reading the file.
    pub fn assign_file(&self, input: impl AsRef<Path>) -> Result<Transformed, CellnameError> {
        let input = input.as_ref();
        if !input.exists() {
            return Err(CellnameError::MissingInput(input.to_path_buf()));
        }

        let source = fs::read_to_string(input)?;
        self.assign(&source)
    }
}

/// Default output path for `input`: the same file name with an `.svg` extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use cellname::default_output_path;
///
/// assert_eq!(default_output_path(Path::new("out/diagram.svg")), Path::new("out/diagram.svg"));
/// assert_eq!(default_output_path(Path::new("diagram.drawio")), Path::new("diagram.svg"));
/// ```
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("svg")
}

/// Write `svg` to `output`, replacing any existing file.
///
/// The document is written to a temporary file in the destination directory
/// and then moved into place, so `output` is never left half written. The
/// permissions of an existing `output` are kept; a new file gets `0o644` on
/// Unix.
///
/// # Errors
///
/// Returns [`CellnameError::Io`] if the temporary file cannot be created or
/// written, or if it cannot be moved onto `output`.
pub fn write_svg(output: impl AsRef<Path>, svg: &str) -> Result<(), CellnameError> {
    let output = output.as_ref();
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(svg.as_bytes())?;
    if let Some(permissions) = output_permissions(output)? {
        file.as_file().set_permissions(permissions)?;
    }
    file.persist(output).map_err(|err| err.error)?;

    info!(output_file = output.display().to_string(); "SVG written");

    Ok(())
}

/// Permissions for the file replacing `output`, if they need setting.
fn output_permissions(output: &Path) -> Result<Option<fs::Permissions>, CellnameError> {
    match fs::metadata(output) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
