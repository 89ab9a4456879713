//! Configuration types for identifier assignment.
//!
//! This module provides configuration structures that control how labels are
//! normalized and how identifiers are derived when a label is missing. All
//! types implement [`serde::Deserialize`] for loading from external sources,
//! and every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining slug and id settings.
//! - [`SlugConfig`] - Controls label normalization.
//! - [`IdsConfig`] - Controls which elements are named and the fallback names.
//!
//! # Example
//!
//! ```
//! # use cellname::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.ids().marker_attribute(), "data-cell-id");
//! ```

use serde::Deserialize;

use cellname_core::{
    identifier::DEFAULT_FALLBACK,
    slug::{MAX_SLUG_LENGTH, Slugger},
};

/// Top-level configuration combining slug and id settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Label normalization section.
    #[serde(default)]
    slug: SlugConfig,

    /// Identifier derivation section.
    #[serde(default)]
    ids: IdsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(slug: SlugConfig, ids: IdsConfig) -> Self {
        Self { slug, ids }
    }

    /// Returns the slug configuration.
    pub fn slug(&self) -> &SlugConfig {
        &self.slug
    }

    /// Returns the identifier configuration.
    pub fn ids(&self) -> &IdsConfig {
        &self.ids
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        self.slug.validate()?;
        self.ids.validate()
    }
}

/// Label normalization settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SlugConfig {
    /// Maximum slug length in characters.
    #[serde(default = "default_max_length")]
    max_length: usize,

    /// Extra literal replacements, as `[from, to]` pairs, applied after the
    /// built-in symbol table.
    #[serde(default)]
    replacements: Vec<(String, String)>,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            replacements: Vec::new(),
        }
    }
}

impl SlugConfig {
    /// Creates a new [`SlugConfig`].
    ///
    /// # Arguments
    ///
    /// * `max_length` - Maximum slug length in characters.
    /// * `replacements` - Extra `(from, to)` literal replacements.
    pub fn new(max_length: usize, replacements: Vec<(String, String)>) -> Self {
        Self {
            max_length,
            replacements,
        }
    }

    /// Returns the maximum slug length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the extra replacements.
    pub fn replacements(&self) -> &[(String, String)] {
        &self.replacements
    }

    /// Builds the [`Slugger`] described by this configuration.
    pub fn slugger(&self) -> Slugger {
        self.replacements
            .iter()
            .fold(Slugger::new(self.max_length), |slugger, (from, to)| {
                slugger.with_replacement(from, to)
            })
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_length == 0 {
            return Err("slug.max_length must be at least 1".to_string());
        }
        if self.replacements.iter().any(|(from, _)| from.is_empty()) {
            return Err("slug.replacements entries must have a non-empty source".to_string());
        }
        Ok(())
    }
}

/// Identifier derivation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IdsConfig {
    /// Attribute marking a group as a diagram cell; its value is the cell reference.
    #[serde(default = "default_marker_attribute")]
    marker_attribute: String,

    /// Prefix of the `<prefix>_<cell reference>` name used for unlabelled cells.
    #[serde(default = "default_cell_prefix")]
    cell_prefix: String,

    /// Name used when no other base is available.
    #[serde(default = "default_fallback")]
    fallback: String,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            marker_attribute: default_marker_attribute(),
            cell_prefix: default_cell_prefix(),
            fallback: default_fallback(),
        }
    }
}

impl IdsConfig {
    /// Creates a new [`IdsConfig`].
    pub fn new(
        marker_attribute: impl Into<String>,
        cell_prefix: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            marker_attribute: marker_attribute.into(),
            cell_prefix: cell_prefix.into(),
            fallback: fallback.into(),
        }
    }

    /// Returns the cell marker attribute name.
    pub fn marker_attribute(&self) -> &str {
        &self.marker_attribute
    }

    /// Returns the prefix for unlabelled cells.
    pub fn cell_prefix(&self) -> &str {
        &self.cell_prefix
    }

    /// Returns the name used when no other base is available.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Base name for a cell without a usable label.
    pub fn cell_base(&self, cell_id: &str) -> String {
        format!("{}_{}", self.cell_prefix, cell_id)
    }

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("ids.marker_attribute", &self.marker_attribute),
            ("ids.cell_prefix", &self.cell_prefix),
            ("ids.fallback", &self.fallback),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{name} must not be empty"));
            }
        }
        Ok(())
    }
}

fn default_max_length() -> usize {
    MAX_SLUG_LENGTH
}

fn default_marker_attribute() -> String {
    "data-cell-id".to_string()
}

fn default_cell_prefix() -> String {
    "cell".to_string()
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}
