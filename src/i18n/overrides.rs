//! Per-element, per-language visual overrides.
//!
//! An element keeps the visual configuration it was created with as its
//! default and may carry an `OverrideRegistry` that replaces that default for
//! specific languages (a different font for Japanese, a bigger size for
//! English, another sprite for Chinese...).
//!
//! Authored data stores the mapping as two parallel lists; `OverrideLists` is
//! that persisted form and converts to and from the registry.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Language → override value, at most one value per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRegistry<V> {
    entries: BTreeMap<Language, V>,
}

impl<V> Default for OverrideRegistry<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> OverrideRegistry<V> {
    /// Create an empty registry; every language resolves to the default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(language, value)` pairs. A language that appears more than
    /// once keeps its last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Language, V)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Build from parallel lists, pairing them index by index.
    ///
    /// The longer list is truncated to the length of the shorter one and the
    /// dropped tail is reported with a warning.
    pub fn from_lists(languages: Vec<Language>, values: Vec<V>) -> Self {
        if languages.len() != values.len() {
            warn!(
                "Override lists differ in length ({} languages, {} values); dropping {} unmatched entries",
                languages.len(),
                values.len(),
                languages.len().abs_diff(values.len())
            );
        }
        Self::from_pairs(languages.into_iter().zip(values))
    }

    /// The override for `language`, or `default` when there is none.
    pub fn resolve<'a>(&'a self, language: Language, default: &'a V) -> &'a V {
        self.entries.get(&language).unwrap_or(default)
    }

    /// Get the override for `language`, if one is set.
    pub fn get(&self, language: Language) -> Option<&V> {
        self.entries.get(&language)
    }

    /// Set the override for `language`, returning the value it replaced.
    pub fn insert(&mut self, language: Language, value: V) -> Option<V> {
        self.entries.insert(language, value)
    }

    /// Remove the override for `language`, returning it.
    pub fn remove(&mut self, language: Language) -> Option<V> {
        self.entries.remove(&language)
    }

    /// Languages with an override, in language order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.entries.keys().copied()
    }

    /// Get the number of languages with an override.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no override is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> OverrideRegistry<V> {
    /// Export as `(language, value)` pairs, ordered by language.
    pub fn to_pairs(&self) -> Vec<(Language, V)> {
        self.entries
            .iter()
            .map(|(lang, value)| (*lang, value.clone()))
            .collect()
    }

    /// Export to the persisted parallel-list form.
    pub fn to_lists(&self) -> OverrideLists<V> {
        let (languages, values) = self.to_pairs().into_iter().unzip();
        OverrideLists { languages, values }
    }
}

impl<V> FromIterator<(Language, V)> for OverrideRegistry<V> {
    fn from_iter<I: IntoIterator<Item = (Language, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Persisted form of an `OverrideRegistry`: two lists paired by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideLists<V> {
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default = "Vec::new")]
    pub values: Vec<V>,
}

impl<V> Default for OverrideLists<V> {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<V> OverrideLists<V> {
    /// Check if both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.values.is_empty()
    }
}

impl<V> From<OverrideLists<V>> for OverrideRegistry<V> {
    fn from(lists: OverrideLists<V>) -> Self {
        OverrideRegistry::from_lists(lists.languages, lists.values)
    }
}
