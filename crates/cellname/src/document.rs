//! Identifier assignment over an SVG document.
//!
//! The document is parsed once with [`roxmltree`]. Every `id` already present
//! is collected first; then each SVG `<g>` carrying the cell marker attribute
//! is visited in document order and, unless it already has an `id`, receives
//! one derived from its label.
//!
//! The output is produced by splicing the new `id` attributes into the
//! original text, so everything else in the file is kept byte for byte.

use std::ops::Range;

use log::{debug, trace};
use roxmltree::{Document, Node, ParsingOptions};

use cellname_core::identifier::UsedIds;

use crate::{config::AppConfig, error::CellnameError};

/// The SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// An identifier given to one diagram cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    cell_id: String,
    id: String,
    label: String,
}

impl Assignment {
    /// Value of the cell marker attribute.
    pub fn cell_id(&self) -> &str {
        &self.cell_id
    }

    /// The identifier written onto the cell.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The label the identifier was derived from; empty for unlabelled cells.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Result of assigning identifiers to a document.
#[derive(Debug, Clone)]
pub struct Transformed {
    svg: String,
    assignments: Vec<Assignment>,
}

impl Transformed {
    /// The rewritten document.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Identifiers given to cells, in document order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Consumes the result, returning the rewritten document.
    pub fn into_svg(self) -> String {
        self.svg
    }
}

/// Concatenates the visible text under `container`.
///
/// Each SVG `<text>` descendant contributes all of its nested text, trimmed.
/// Contributions are joined with a single space in document order; empty
/// ones are skipped.
pub fn extract_label(container: Node<'_, '_>) -> String {
    container
        .descendants()
        .filter(|node| node.has_tag_name((SVG_NS, "text")))
        .map(|text| {
            text.descendants()
                .filter(Node::is_text)
                .filter_map(|node| node.text())
                .collect::<String>()
        })
        .filter_map(|content| {
            let trimmed = content.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assigns identifiers to every unnamed cell in `source`.
///
/// # Errors
///
/// Returns [`CellnameError::Parse`] if `source` is not well-formed XML.
pub(crate) fn assign_ids(source: &str, config: &AppConfig) -> Result<Transformed, CellnameError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    // Exported diagrams carry an SVG 1.1 DOCTYPE.
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(source, options)
        .map_err(|err| CellnameError::new_parse_error(err, source))?;

    let ids = config.ids();
    let slugger = config.slug().slugger();

    let mut used = UsedIds::with_fallback(ids.fallback());
    for id in doc
        .descendants()
        .filter(Node::is_element)
        .filter_map(existing_id)
    {
        used.register(id);
    }
    debug!(count = used.len(); "Collected existing identifiers");

    let mut edits = Vec::new();
    let mut assignments = Vec::new();

    for group in doc
        .descendants()
        .filter(|node| node.has_tag_name((SVG_NS, "g")))
    {
        let Some(cell_id) = group
            .attribute(ids.marker_attribute())
            .filter(|value| !value.is_empty())
        else {
            continue;
        };

        if let Some(id) = existing_id(group) {
            trace!(cell_id, id; "Keeping existing identifier");
            used.register(id);
            continue;
        }

        let label = extract_label(group);
        let mut base = slugger.slugify(&label);
        if base.is_empty() {
            base = ids.cell_base(cell_id);
        }
        let id = used.allocate(&base);

        debug!(cell_id, id = id.as_str(), label = label.as_str(); "Assigned identifier");

        edits.push(id_edit(source, group.range().start, &id));
        assignments.push(Assignment {
            cell_id: cell_id.to_owned(),
            id,
            label,
        });
    }

    let mut svg = apply_edits(source, edits);
    if !has_xml_declaration(&svg) {
        svg.insert_str(0, XML_DECLARATION);
    }

    Ok(Transformed { svg, assignments })
}

/// Whether `text` opens with an XML declaration rather than another
/// `<?xml-...?>` processing instruction.
fn has_xml_declaration(text: &str) -> bool {
    text.strip_prefix("<?xml")
        .is_some_and(|rest| rest.starts_with([' ', '\t', '\r', '\n']))
}

/// The element's `id`, treating an empty value as absent.
fn existing_id<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attribute("id").filter(|id| !id.is_empty())
}

/// A replacement of `range` in the source text by `text`.
#[derive(Debug, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Builds the edit that gives the element starting at `start` the id `id`.
///
/// An empty `id` attribute is filled in place; otherwise a new attribute is
/// inserted right after the tag name.
fn id_edit(source: &str, start: usize, id: &str) -> Edit {
    let tag = start_tag(&source[start..]);
    let value = escape_attribute(id);

    match locate_attribute_value(tag, "id") {
        Some(range) => Edit {
            range: start + range.start..start + range.end,
            text: value,
        },
        None => {
            let at = start + tag_name_end(tag);
            Edit {
                range: at..at,
                text: format!(" id=\"{value}\""),
            }
        }
    }
}

/// Applies non-overlapping edits given in ascending source order.
fn apply_edits(source: &str, edits: Vec<Edit>) -> String {
    let extra: usize = edits.iter().map(|edit| edit.text.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut cursor = 0;
    for edit in edits {
        out.push_str(&source[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// The start tag at the beginning of `text`, up to and including its `>`.
fn start_tag(text: &str) -> &str {
    let mut quote = None;
    for (idx, ch) in text.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(open), _) if open == ch => quote = None,
            (None, '>') => return &text[..=idx],
            _ => {}
        }
    }
    text
}

/// Byte offset just past the element name of `tag`.
fn tag_name_end(tag: &str) -> usize {
    tag.char_indices()
        .skip(1)
        .find(|&(_, ch)| ch.is_whitespace() || ch == '/' || ch == '>')
        .map_or(tag.len(), |(idx, _)| idx)
}

/// Range of the value (between the quotes) of attribute `name` in `tag`.
fn locate_attribute_value(tag: &str, name: &str) -> Option<Range<usize>> {
    let bytes = tag.as_bytes();
    let mut pos = tag_name_end(tag);

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || matches!(bytes[pos], b'>' | b'/') {
            return None;
        }

        let name_start = pos;
        while pos < bytes.len() && !matches!(bytes[pos], b'=' | b'>' | b'/') {
            if bytes[pos].is_ascii_whitespace() {
                break;
            }
            pos += 1;
        }
        let attr_name = &tag[name_start..pos];

        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'=') {
            pos += 1;
        }
        let quote = *bytes.get(pos)?;
        if !matches!(quote, b'"' | b'\'') {
            return None;
        }
        let value_start = pos + 1;
        let value_end = value_start + tag[value_start..].find(quote as char)?;

        if attr_name == name {
            return Some(value_start..value_end);
        }
        pos = value_end + 1;
    }
}

/// Escapes `value` for use inside a quoted attribute.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
