//! Translation table and override data validation.
//!
//! Nothing here is enforced at runtime: lookups fall back to the key and
//! override lists are truncated. The validator reports what authored data
//! would silently lose, so the preview binary and content pipelines can flag
//! it.

use crate::i18n::{Language, OverrideLists, TranslationEntry, TranslationTable};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a translation unusable
    pub errors: Vec<String>,

    /// Suspicious data that still resolves
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// Append another report's findings.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation tables and override lists.
pub struct TranslationValidator;

// Regex patterns for extraction (cached for performance)
static BRACE_PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static FORMAT_PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate every entry of `table`, in key order.
    pub fn validate_table(table: &TranslationTable, source_language: Language) -> ValidationReport {
        let mut entries: Vec<&TranslationEntry> = table.entries().collect();
        entries.sort_by(|a, b| a.key().cmp(b.key()));

        let mut report = ValidationReport::new();
        for entry in entries {
            report.merge(Self::validate_entry(entry, source_language));
        }
        report
    }

    /// Validate one entry against its key.
    ///
    /// This function checks that:
    /// - no translation is empty
    /// - no column is stored for the source language (it is never displayed)
    /// - `{name}` and `%s`-style placeholders of the key survive translation
    pub fn validate_entry(entry: &TranslationEntry, source_language: Language) -> ValidationReport {
        let mut report = ValidationReport::new();
        let key = entry.key();
        let key_placeholders = Self::extract_placeholders(key);

        for (language, text) in entry.translations() {
            if language == source_language {
                report.warnings.push(format!(
                    "'{}' stores a {} translation, which is never displayed for the source language",
                    key, language
                ));
                continue;
            }

            if text.trim().is_empty() {
                report
                    .errors
                    .push(format!("'{}' has an empty {} translation", key, language));
                continue;
            }

            let placeholders = Self::extract_placeholders(text);
            if placeholders != key_placeholders {
                report.warnings.push(format!(
                    "Placeholder mismatch in '{}' ({}): key has {:?}, translation has {:?}",
                    key, language, key_placeholders, placeholders
                ));
            }
        }

        report
    }

    /// Validate a persisted override list pair.
    ///
    /// Mismatched lengths are truncated on load and duplicate languages keep
    /// only their last value; both are reported as warnings.
    pub fn validate_override_lists<V>(lists: &OverrideLists<V>) -> ValidationReport {
        let mut report = ValidationReport::new();

        if lists.languages.len() != lists.values.len() {
            report.warnings.push(format!(
                "Override lists differ in length: {} languages, {} values",
                lists.languages.len(),
                lists.values.len()
            ));
        }

        let paired = lists.languages.len().min(lists.values.len());
        let mut seen = BTreeSet::new();
        for language in &lists.languages[..paired] {
            if !seen.insert(*language) {
                report.warnings.push(format!(
                    "Language {} appears more than once; only its last value is used",
                    language
                ));
            }
        }

        report
    }

    /// Extract `{name}` and printf-style placeholders, sorted.
    fn extract_placeholders(text: &str) -> Vec<String> {
        let brace = BRACE_PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{[A-Za-z0-9_]*\}").unwrap());
        let format = FORMAT_PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"%(?:\d+\$)?[sdf]").unwrap());

        let mut placeholders: Vec<String> = brace
            .find_iter(text)
            .chain(format.find_iter(text))
            .map(|m| m.as_str().to_string())
            .collect();
        placeholders.sort();
        placeholders
    }
}
