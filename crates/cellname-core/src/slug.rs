//! Label to identifier normalization.
//!
//! A diagram label such as `"5α-reductase (enzyme)"` is turned into a
//! lowercase, underscore-separated token such as `"5alpha_reductase"` that is
//! safe to use as an SVG `id`.
//!
//! The normalization runs these steps in order:
//!
//! 1. Empty input yields an empty slug.
//! 2. Greek letters, arrows and typographic punctuation are replaced by ASCII
//!    spellings (see [`SYMBOL_REPLACEMENTS`]), followed by any extra
//!    replacements configured on the [`Slugger`].
//! 3. Only the text before the first newline, carriage return, `:`, `;`, `(`
//!    or `)` is kept.
//! 4. The phrase is trimmed and lowercased.
//! 5. Every run of characters outside `[a-z0-9]` becomes a single `_`.
//! 6. Leading and trailing underscores are removed.
//! 7. The slug is cut to the maximum length and any trailing `_` left by the
//!    cut is removed.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

/// Default maximum length of a slug, in characters.
pub const MAX_SLUG_LENGTH: usize = 40;

/// Literal symbol substitutions applied before any other normalization.
///
/// Both code points commonly used for alpha (`α`, `ɑ`) and mu (`µ` micro
/// sign, `μ` Greek letter) are covered.
pub const SYMBOL_REPLACEMENTS: &[(&str, &str)] = &[
    ("α", "alpha"),
    ("ɑ", "alpha"),
    ("β", "beta"),
    ("γ", "gamma"),
    ("Δ", "delta"),
    ("δ", "delta"),
    ("µ", "mu"),
    ("μ", "mu"),
    ("→", "to"),
    ("\u{2019}", ""),
    ("\u{201C}", ""),
    ("\u{201D}", ""),
    ("…", ""),
];

/// Characters that end the leading phrase of a label.
const PHRASE_DELIMITERS: [char; 6] = ['\n', '\r', ':', ';', '(', ')'];

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Normalizes `label` with the default settings.
///
/// # Examples
///
/// ```
/// use cellname_core::slug::slugify;
///
/// assert_eq!(slugify("5α-reductase (enzyme)"), "5alpha_reductase");
/// assert_eq!(slugify("Step 1: Activation"), "step_1");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(label: &str) -> String {
    Slugger::default().slugify(label)
}

/// Configurable label normalizer.
///
/// The default instance matches [`slugify`]. Extra replacements run after the
/// built-in [`SYMBOL_REPLACEMENTS`], in the order they were added.
#[derive(Debug, Clone)]
pub struct Slugger {
    max_length: usize,
    replacements: Vec<(String, String)>,
}

impl Default for Slugger {
    fn default() -> Self {
        Self::new(MAX_SLUG_LENGTH)
    }
}

impl Slugger {
    /// Creates a slugger that cuts slugs to at most `max_length` characters.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            replacements: Vec::new(),
        }
    }

    /// Adds a literal replacement applied after the built-in symbol table.
    ///
    /// An empty `from` is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use cellname_core::slug::Slugger;
    ///
    /// let slugger = Slugger::default().with_replacement("Ω", "omega");
    /// assert_eq!(slugger.slugify("Ω-3 fatty acid"), "omega_3_fatty_acid");
    /// ```
    pub fn with_replacement(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        if !from.is_empty() {
            self.replacements.push((from, to.into()));
        }
        self
    }

    /// Returns the maximum slug length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Normalizes `label` into an identifier-safe token.
    ///
    /// The result only contains `[a-z0-9_]`, never starts or ends with `_`,
    /// never contains `__`, and is at most [`Self::max_length`] characters
    /// long. It is empty when the label has no alphanumeric content before
    /// its first delimiter.
    pub fn slugify(&self, label: &str) -> String {
        if label.is_empty() {
            return String::new();
        }

        let mut text = label.to_owned();
        let extra = self
            .replacements
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()));
        for (symbol, ascii) in SYMBOL_REPLACEMENTS.iter().copied().chain(extra) {
            if text.contains(symbol) {
                text = text.replace(symbol, ascii);
            }
        }

        let phrase = match text.find(PHRASE_DELIMITERS) {
            Some(end) => &text[..end],
            None => text.as_str(),
        };
        let lowered = phrase.trim().to_lowercase();

        // `_` is outside the class, so runs of underscores collapse here too.
        let collapsed = NON_ALPHANUMERIC.replace_all(&lowered, "_");
        let mut slug = collapsed.trim_matches('_').to_owned();

        // Only ASCII is left, so byte and character lengths agree.
        if slug.len() > self.max_length {
            slug.truncate(self.max_length);
            let kept = slug.trim_end_matches('_').len();
            slug.truncate(kept);
        }

        trace!(label, slug; "Normalized label");
        slug
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strings that are already valid slugs of at most 35 characters.
    fn normalized_strategy() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,8}(_[a-z0-9]{1,8}){0,3}"
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A slug only contains lowercase ASCII letters, digits and underscores.
    fn check_charset(label: &str) -> Result<(), TestCaseError> {
        let slug = slugify(label);
        prop_assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "unexpected character in {slug:?}"
        );
        Ok(())
    }

    /// A slug never exceeds the configured length.
    fn check_length_bound(label: &str, max_length: usize) -> Result<(), TestCaseError> {
        let slug = Slugger::new(max_length).slugify(label);
        prop_assert!(slug.chars().count() <= max_length);
        Ok(())
    }

    /// A slug has no leading, trailing or doubled underscores.
    fn check_underscores(label: &str) -> Result<(), TestCaseError> {
        let slug = slugify(label);
        prop_assert!(!slug.starts_with('_'));
        prop_assert!(!slug.ends_with('_'));
        prop_assert!(!slug.contains("__"));
        Ok(())
    }

    /// Normalizing an already-normalized slug leaves it unchanged.
    fn check_idempotent(slug: &str) -> Result<(), TestCaseError> {
        prop_assert_eq!(slugify(slug), slug);
        prop_assert_eq!(slugify(&slugify(slug)), slug);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn slug_charset(label in any::<String>()) {
            check_charset(&label)?;
        }

        #[test]
        fn slug_length_bound(label in any::<String>(), max_length in 1usize..64) {
            check_length_bound(&label, max_length)?;
        }

        #[test]
        fn slug_default_length_bound(label in "[a-zA-Z0-9 αβ→-]{0,120}") {
            check_length_bound(&label, MAX_SLUG_LENGTH)?;
        }

        #[test]
        fn slug_underscores(label in any::<String>()) {
            check_underscores(&label)?;
        }

        #[test]
        fn slug_idempotent(slug in normalized_strategy()) {
            check_idempotent(&slug)?;
        }
    }
}
