//! Translation table: text key → per-language strings.
//!
//! The source language never appears as a column; its text *is* the key.

use crate::error::{LocalizationError, Result};
use crate::i18n::Language;
use std::collections::{BTreeMap, HashMap};

/// One row of the translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    key: String,
    translations: BTreeMap<Language, String>,
}

impl TranslationEntry {
    /// Create an entry with no translations.
    ///
    /// # Returns
    /// * `Err(EmptyKey)` if `key` is empty
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(LocalizationError::EmptyKey);
        }
        Ok(Self {
            key,
            translations: BTreeMap::new(),
        })
    }

    /// Builder-style variant of `set`.
    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        self.set(language, text);
        self
    }

    /// Set the translation for `language`, replacing any previous one.
    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        self.translations.insert(language, text.into());
    }

    /// Get the key, which is also the source-language text.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the translation for `language`, if any.
    pub fn get(&self, language: Language) -> Option<&str> {
        self.translations.get(&language).map(String::as_str)
    }

    /// Translations in language order.
    pub fn translations(&self) -> impl Iterator<Item = (Language, &str)> {
        self.translations
            .iter()
            .map(|(lang, text)| (*lang, text.as_str()))
    }
}

/// All loaded translations, keyed by text key.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, TranslationEntry>,
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry with the same key.
    ///
    /// # Returns
    /// `true` if an existing entry was replaced
    pub fn insert(&mut self, entry: TranslationEntry) -> bool {
        self.entries.insert(entry.key.clone(), entry).is_some()
    }

    /// Merge a batch of entries in order; later entries win on key collision.
    ///
    /// # Returns
    /// The number of entries that replaced an existing key
    pub fn merge(&mut self, entries: impl IntoIterator<Item = TranslationEntry>) -> usize {
        entries
            .into_iter()
            .map(|entry| self.insert(entry))
            .filter(|replaced| *replaced)
            .count()
    }

    /// Get the entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    /// Stored translation of `key` for `language`, if any.
    pub fn lookup(&self, key: &str, language: Language) -> Option<&str> {
        self.entries.get(key).and_then(|entry| entry.get(language))
    }

    /// Check if `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
