//! Error adapter for converting CellnameError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Malformed
//! documents are shown with a snippet of the input pointing at the position
//! the XML parser stopped at.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use cellname::CellnameError;

/// Adapter for a document parse failure.
///
/// Wraps the XML error together with the document text so the failing
/// position can be rendered as a labelled span.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped parse error
    err: &'a roxmltree::Error,
    /// Source text for displaying snippets
    src: &'a str,
    /// Byte offset of the failure in `src`
    offset: usize,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a roxmltree::Error, src: &'a str, offset: usize) -> Self {
        Self { err, src, offset }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("err", &self.err)
            .field("offset", &self.offset)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed document: {}", self.err)
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("cellname::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("the input must be a well-formed SVG document"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::new(self.offset.into(), 0);
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`CellnameError`] variants without source information,
/// such as I/O, missing input and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a CellnameError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CellnameError::Io(_) => "cellname::io",
            CellnameError::MissingInput(_) => "cellname::input",
            CellnameError::Config(_) => "cellname::config",
            CellnameError::Parse { .. } => "cellname::parse",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CellnameError::MissingInput(_) => Some(Box::new("check the path given as <INPUT>")),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a diagnostic with a source snippet or a plain
/// error, providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CellnameError`] into a reportable error.
///
/// [`CellnameError::Parse`] becomes a [`Reportable::Diagnostic`] pointing at
/// the failing position; every other variant becomes a [`Reportable::Error`].
pub fn to_reportable(err: &CellnameError) -> Reportable<'_> {
    match (err, err.parse_offset()) {
        (CellnameError::Parse { err: parse_err, src }, Some(offset)) => {
            Reportable::Diagnostic(DiagnosticAdapter::new(parse_err, src, offset))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
