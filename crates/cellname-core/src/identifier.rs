//! Tracking of claimed identifiers and allocation of unique ones.
//!
//! This module provides the [`UsedIds`] set. It is seeded with every `id`
//! already present in a document and grows by one entry for each identifier
//! handed out by [`UsedIds::allocate`]. Entries are never removed.

use indexmap::IndexSet;
use log::debug;

/// Identifier used when the base token passed to [`UsedIds::allocate`] is empty.
pub const DEFAULT_FALLBACK: &str = "node";

/// Set of identifiers already claimed within one document.
///
/// Iteration yields identifiers in the order they were claimed.
///
/// # Examples
///
/// ```
/// use cellname_core::identifier::UsedIds;
///
/// let mut used = UsedIds::new();
/// used.register("pathway");
///
/// assert_eq!(used.allocate("pathway"), "pathway_2");
/// assert_eq!(used.allocate("pathway"), "pathway_3");
/// assert_eq!(used.allocate(""), "node");
/// ```
#[derive(Debug, Clone)]
pub struct UsedIds {
    ids: IndexSet<String>,
    fallback: String,
}

impl Default for UsedIds {
    fn default() -> Self {
        Self::new()
    }
}

impl UsedIds {
    /// Creates an empty set using [`DEFAULT_FALLBACK`] for empty bases.
    pub fn new() -> Self {
        Self::with_fallback(DEFAULT_FALLBACK)
    }

    /// Creates an empty set using `fallback` in place of empty bases.
    ///
    /// # Arguments
    ///
    /// * `fallback` - Base token substituted when [`Self::allocate`] receives
    ///   an empty base. An empty `fallback` is replaced by [`DEFAULT_FALLBACK`].
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        let mut fallback = fallback.into();
        if fallback.is_empty() {
            fallback = DEFAULT_FALLBACK.to_owned();
        }
        Self {
            ids: IndexSet::new(),
            fallback,
        }
    }

    /// Records an identifier that already exists in the document.
    ///
    /// Returns `true` if the identifier was not claimed before.
    pub fn register(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Returns `true` if `id` has been claimed.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns the number of claimed identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no identifier has been claimed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over claimed identifiers in claim order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Claims a unique identifier derived from `base`.
    ///
    /// An empty `base` is replaced by the fallback. If the base is free it is
    /// returned as is; otherwise `base_2`, `base_3`, ... are tried until a
    /// free candidate is found. The returned identifier is added to the set.
    pub fn allocate(&mut self, base: &str) -> String {
        let base = if base.is_empty() {
            self.fallback.as_str()
        } else {
            base
        };

        let mut candidate = base.to_owned();
        let mut suffix = 2usize;
        while self.ids.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }

        if suffix > 2 {
            debug!(base, id = candidate.as_str(); "Resolved identifier collision");
        }

        self.ids.insert(candidate.clone());
        candidate
    }
}
